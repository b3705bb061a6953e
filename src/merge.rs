// Copyright (c) 2025 - Cowboy AI, Inc.
//! State Merging for Combined Components
//!
//! Combining two components means their states must live side by side in a
//! single value. Two strategies are supported:
//!
//! - **Intersection merge**: a caller-defined record carries the fields of
//!   both halves. The record implements [`Merge`] (assemble from halves) and
//!   [`Split`] (project the halves back out). Because the record is an
//!   ordinary struct, the compiler rejects any field-name collision.
//! - **Tuple merge**: the pair `(L, R)` implements both traits, each half
//!   opaque to the other.
//!
//! ```text
//!   Split                     Merge
//! Record ──> (L, R) ──evolve──> (L', R') ──> Record'
//! ```
//!
//! # Example
//!
//! ```rust
//! use cim_decider::{Merge, Split};
//!
//! #[derive(Clone)]
//! struct Counter { value: i64 }
//! #[derive(Clone)]
//! struct Audit { changes: usize }
//!
//! struct Dashboard { value: i64, changes: usize }
//!
//! impl Merge<Counter, Audit> for Dashboard {
//!     fn merge(left: Counter, right: Audit) -> Self {
//!         Dashboard { value: left.value, changes: right.changes }
//!     }
//! }
//!
//! impl Split<Counter, Audit> for Dashboard {
//!     fn left(&self) -> Counter { Counter { value: self.value } }
//!     fn right(&self) -> Audit { Audit { changes: self.changes } }
//! }
//! ```

/// Assemble a merged state from two halves
pub trait Merge<L, R>: Sized {
    /// Build the merged value from the left and right halves
    fn merge(left: L, right: R) -> Self;
}

/// Project a merged state back into its two halves
pub trait Split<L, R> {
    /// The half owned by the left component
    fn left(&self) -> L;

    /// The half owned by the right component
    fn right(&self) -> R;
}

impl<L, R> Merge<L, R> for (L, R) {
    fn merge(left: L, right: R) -> Self {
        (left, right)
    }
}

impl<L: Clone, R: Clone> Split<L, R> for (L, R) {
    fn left(&self) -> L {
        self.0.clone()
    }

    fn right(&self) -> R {
        self.1.clone()
    }
}
