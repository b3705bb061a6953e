// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event-Sourced and State-Stored Computation
//!
//! A decider can be driven in two ways:
//!
//! ```text
//! Event-sourced:  history ──fold(evolve)──> state ──decide(command)──> events
//! State-stored:   state ──decide(command)──> events ──fold(evolve)──> state'
//! ```
//!
//! Both modes are pure: nothing is loaded, persisted or cached here. The
//! caller owns the history and the stored state.
//!
//! # Agreement
//!
//! For a component supporting both modes, for any history `h` and command `c`:
//!
//! ```text
//! compute_new_state(fold(h), c) == fold(h ++ compute_new_events(h, c))
//! ```

use tracing::debug;

/// Left fold of events through an evolve function
///
/// This is the fundamental replay operation: the state is rebuilt by
/// applying each event in order, oldest first.
///
/// # Example
///
/// ```rust
/// use cim_decider::fold_events;
///
/// let total = fold_events(|sum: &i64, amount: &i64| sum + amount, 0, &[1, 2, 3]);
/// assert_eq!(total, 6);
/// ```
pub fn fold_events<S, E, F>(evolve: F, initial_state: S, events: &[E]) -> S
where
    F: Fn(&S, &E) -> S,
{
    events
        .iter()
        .fold(initial_state, |state, event| evolve(&state, event))
}

/// Event-sourced computation
///
/// Derive the current state by folding `history` from the initial state,
/// then decide on `command`. The history is never mutated.
pub trait EventComputation<C, S, Ei, Eo, Err> {
    /// Compute the events a command produces given an ordered event history
    fn compute_new_events(&self, history: &[Ei], command: &C) -> Result<Vec<Eo>, Err>;
}

/// State-stored computation
///
/// Decide on `command` against an explicit state, then fold the resulting
/// events onto that same state.
pub trait StateComputation<C, S, E, Err> {
    /// Compute the next state from a held state and a command
    fn compute_new_state(&self, state: &S, command: &C) -> Result<S, Err>;
}

/// Record the outcome of a decision before handing it back unchanged
pub(crate) fn log_decision<Eo, Err>(result: Result<Vec<Eo>, Err>) -> Result<Vec<Eo>, Err> {
    match &result {
        Ok(events) => debug!(new_events = events.len(), "command decided"),
        Err(_) => debug!("command rejected"),
    }
    result
}
