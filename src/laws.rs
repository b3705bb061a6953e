// Copyright (c) 2025 - Cowboy AI, Inc.
//! Algebraic laws as checkable predicates
//!
//! None of these can be enforced by the engine itself, because the functions
//! involved are supplied independently by callers. They exist so tests (unit,
//! fixture or proptest) can state the contracts directly.

use crate::computation::{fold_events, EventComputation, StateComputation};
use crate::decider::AggregateDecider;
use crate::process::Process;

/// Multiset difference: every action in `reacted` with no equal partner left in `pending`
pub fn unmatched_reactions<A>(reacted: &[A], pending: &[A]) -> Vec<A>
where
    A: PartialEq + Clone,
{
    let mut available: Vec<&A> = pending.iter().collect();
    let mut unmatched = Vec::new();
    for action in reacted {
        match available.iter().position(|candidate| *candidate == action) {
            Some(index) => {
                available.swap_remove(index);
            }
            None => unmatched.push(action.clone()),
        }
    }
    unmatched
}

/// `react(state, event) ⊆ pending(evolve(state, event))`, as multisets
pub fn react_within_pending<AR, S, Ei, Eo, A, Err>(
    process: &Process<AR, S, S, Ei, Eo, A, Err>,
    state: &S,
    event: &Ei,
) -> bool
where
    A: PartialEq + Clone,
{
    let reacted = process.react(state, event);
    let backlog = process.pending(&process.evolve(state, event));
    unmatched_reactions(&reacted, &backlog).is_empty()
}

/// State-stored and event-sourced computation agree for `history` and `command`
///
/// `compute_new_state(fold(h), c) == fold(h ++ compute_new_events(h, c))`,
/// failures included.
pub fn computations_agree<C, S, E, Err>(
    decider: &AggregateDecider<C, S, E, Err>,
    history: &[E],
    command: &C,
) -> bool
where
    S: Clone + PartialEq,
    Err: PartialEq,
{
    let current = decider.fold_history(history);
    let state_stored = decider.compute_new_state(&current, command);
    let event_sourced = decider
        .compute_new_events(history, command)
        .map(|new_events| fold_events(|state, event| decider.evolve(state, event), current, &new_events));
    state_stored == event_sourced
}

/// `dimap_on_state(id, id)` decides and evolves exactly like the original
pub fn dimap_identity_holds<C, S, E, Err>(
    decider: &AggregateDecider<C, S, E, Err>,
    state: &S,
    command: &C,
) -> bool
where
    C: 'static,
    S: Clone + PartialEq + 'static,
    E: PartialEq + 'static,
    Err: PartialEq + 'static,
{
    let identity = decider
        .clone()
        .dimap_on_state(|state: &S| state.clone(), |state: S| state);

    let decided = decider.decide(command, state);
    if decided != identity.decide(command, state) || decider.initial_state() != identity.initial_state() {
        return false;
    }
    match decided {
        Ok(events) => events
            .iter()
            .all(|event| decider.evolve(state, event) == identity.evolve(state, event)),
        Err(_) => true,
    }
}
