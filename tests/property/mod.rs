// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! - `decider_laws`: computation agreement and dimap identity
//! - `combine_laws`: routing, isolation and order independence of combine
//! - `process_laws`: react ⊆ pending over reachable workflow states

mod decider_laws;
