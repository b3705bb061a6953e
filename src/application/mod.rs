// Copyright (c) 2025 - Cowboy AI, Inc.
//! Application Boundary
//!
//! The components in this crate are pure. Loading history, saving events or
//! state and delivering actions belong to the surrounding infrastructure,
//! which plugs in through the traits here.
//!
//! # Architecture
//!
//! ```text
//! Command ──> EventRepository::fetch_events ──> compute_new_events ──> EventRepository::save
//! Command ──> StateRepository::fetch_state  ──> compute_new_state  ──> StateRepository::save
//! Event   ──> ViewStateRepository::fetch_state ──> evolve          ──> ViewStateRepository::save
//! Result  ──> ... compute_new_events ──> save ──> react ──> ActionPublisher::publish
//! ```
//!
//! All traits are synchronous. Repositories take `&self` so one orchestrator
//! can be shared between threads; implementations bring their own locking.
//! The core only requires that fetched histories come back in causal order,
//! oldest first.

use crate::either::Either;

pub mod aggregate;
pub mod materialized_view;
pub mod process_manager;

pub use aggregate::{EventSourcedAggregate, StateStoredAggregate};
pub use materialized_view::MaterializedView;
pub use process_manager::{ProcessManager, ProcessOutcome};

/// Key extraction for commands, events and states
///
/// Repositories use the identifier to find the stream or record a value
/// belongs to.
pub trait Identifier {
    fn identifier(&self) -> String;
}

impl<L: Identifier, R: Identifier> Identifier for Either<L, R> {
    fn identifier(&self) -> String {
        match self {
            Either::Left(left) => left.identifier(),
            Either::Right(right) => right.identifier(),
        }
    }
}

/// Event store collaborator
pub trait EventRepository<C, Ei, Eo> {
    type Error;

    /// Ordered history (oldest first) of the stream `command` addresses
    fn fetch_events(&self, command: &C) -> Result<Vec<Ei>, Self::Error>;

    /// Append newly decided events, atomically
    fn save(&self, events: &[Eo]) -> Result<(), Self::Error>;
}

/// State store collaborator for state-stored aggregates
pub trait StateRepository<C, S> {
    type Error;

    /// Current state for `command`, or `None` if nothing was stored yet
    fn fetch_state(&self, command: &C) -> Result<Option<S>, Self::Error>;

    fn save(&self, state: &S) -> Result<(), Self::Error>;
}

/// Read-model store collaborator
pub trait ViewStateRepository<E, S> {
    type Error;

    /// Current view state `event` belongs to, or `None` for a new view
    fn fetch_state(&self, event: &E) -> Result<Option<S>, Self::Error>;

    fn save(&self, state: &S) -> Result<(), Self::Error>;
}

/// Command/action transport collaborator
pub trait ActionPublisher<A> {
    type Error;

    fn publish(&self, actions: &[A]) -> Result<(), Self::Error>;
}
