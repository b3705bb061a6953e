// Copyright (c) 2025 - Cowboy AI, Inc.
//! Either - Tagged Union of Two Component Vocabularies
//!
//! When two components are combined, their commands, events and actions are
//! merged into a single type. `Either<L, R>` is that merged type: every value
//! belongs to exactly one side, and the constructors `Either::Left` and
//! `Either::Right` are the total injections from each side into the union.
//!
//! ```text
//! C1 ──Left──┐
//!            ├──> Either<C1, C2>
//! C2 ──Right─┘
//! ```
//!
//! Dispatch over an `Either` is always an exhaustive `match`, so a combined
//! component can never receive a value it has no branch for.

use serde::{Deserialize, Serialize};

/// A value belonging to one of two component vocabularies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "side", content = "value", rename_all = "snake_case")]
pub enum Either<L, R> {
    /// Value from the first (left) component
    Left(L),
    /// Value from the second (right) component
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Borrow the left value, if this is a `Left`
    pub fn left(&self) -> Option<&L> {
        match self {
            Either::Left(value) => Some(value),
            Either::Right(_) => None,
        }
    }

    /// Borrow the right value, if this is a `Right`
    pub fn right(&self) -> Option<&R> {
        match self {
            Either::Left(_) => None,
            Either::Right(value) => Some(value),
        }
    }

    /// True when the value belongs to the left component
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// True when the value belongs to the right component
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    /// Transform the left value, leaving a right value untouched
    pub fn map_left<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> L2,
    {
        match self {
            Either::Left(value) => Either::Left(f(value)),
            Either::Right(value) => Either::Right(value),
        }
    }

    /// Transform the right value, leaving a left value untouched
    pub fn map_right<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(value) => Either::Left(value),
            Either::Right(value) => Either::Right(f(value)),
        }
    }

    /// Eliminate the union by handling both sides
    pub fn either<T, F, G>(self, on_left: F, on_right: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Either::Left(value) => on_left(value),
            Either::Right(value) => on_right(value),
        }
    }
}
