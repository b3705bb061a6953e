// Copyright (c) 2025 - Cowboy AI, Inc.
//! Composable Deciders, Process Managers and Projections
//!
//! This crate provides the pure domain components of an event-sourced / CQRS
//! system, together with an algebra for composing them:
//!
//! - [`View`] / [`Projection`]: evolve state from events, no decisions
//! - [`Decider`] / [`DcbDecider`] / [`AggregateDecider`]: decide events from
//!   commands and evolve state from events
//! - [`Process`] / [`DcbProcess`] / [`AggregateProcess`]: deciders that also
//!   compute the actions an event makes ready (`react`) and the complete
//!   outstanding backlog (`pending`)
//! - [`workflow`]: task-status bookkeeping for process managers
//!
//! Components are immutable values holding shared function pointers and an
//! initial state. They are cheap to clone and safe to call from any number of
//! threads at once; nothing here performs I/O, blocks or keeps mutable state.
//!
//! # Composition
//!
//! ```text
//!                 dimap / map_contra / map          combine / combine_via_tuples
//! Decider<C,..> ───────────────────────────> ... ─────────────────────────────> Decider<Either<C, C2>, ..>
//!      │                                                       ▲
//!      └─ refine: DcbDecider (Si = So) ─ AggregateDecider (Ei = Eo)
//! ```
//!
//! # Example
//!
//! ```rust
//! use cim_decider::{AggregateDecider, Either, StateComputation};
//!
//! let counter: AggregateDecider<i64, i64, i64, String> = AggregateDecider::new(
//!     |amount: &i64, _total: &i64| Ok(vec![*amount]),
//!     |total: &i64, amount: &i64| total + amount,
//!     0,
//! );
//! let toggle: AggregateDecider<bool, bool, bool, String> = AggregateDecider::new(
//!     |on: &bool, _state: &bool| Ok(vec![*on]),
//!     |_state: &bool, on: &bool| *on,
//!     false,
//! );
//!
//! let both = counter.combine_via_tuples(toggle);
//! let state = both.compute_new_state(&(0, false), &Either::Left(5)).unwrap();
//! assert_eq!(state, (5, false));
//! ```

use std::sync::Arc;

pub mod application;
pub mod computation;
pub mod decider;
pub mod either;
pub mod errors;
pub mod laws;
pub mod merge;
pub mod process;
pub mod view;
pub mod workflow;

pub use computation::{fold_events, EventComputation, StateComputation};
pub use decider::{AggregateDecider, DcbDecider, Decider};
pub use either::Either;
pub use errors::{ApplicationError, ApplicationResult};
pub use merge::{Merge, Split};
pub use process::{AggregateProcess, DcbProcess, Process};
pub use view::{Projection, View};

/// Decides which events to produce from a command and the current state
pub type DecideFn<C, Si, Eo, Err> = Arc<dyn Fn(&C, &Si) -> Result<Vec<Eo>, Err> + Send + Sync>;

/// Evolves the state by one event
pub type EvolveFn<Si, Ei, So> = Arc<dyn Fn(&Si, &Ei) -> So + Send + Sync>;

/// Computes the actions an event makes ready to execute
pub type ReactFn<Si, Ei, A> = Arc<dyn Fn(&Si, &Ei) -> Vec<A> + Send + Sync>;

/// Computes the full outstanding action backlog from state alone
pub type PendingFn<Si, A> = Arc<dyn Fn(&Si) -> Vec<A> + Send + Sync>;

/// A state-to-state function, the output state of an applicative component
pub type StateMapper<A, B> = Arc<dyn Fn(A) -> B + Send + Sync>;
