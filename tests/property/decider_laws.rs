// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Decider Computation
//!
//! For every generated history and command, the state-stored and
//! event-sourced modes agree, and an identity dimap changes nothing.

use cim_decider::laws::{computations_agree, dimap_identity_holds};
use cim_decider::{fold_events, EventComputation, StateComputation};
use proptest::prelude::*;

use crate::fixtures::counter::*;

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate arbitrary counter commands
fn counter_command() -> impl Strategy<Value = CounterCommand> {
    prop_oneof![
        // Small amounts to avoid overflow in tests
        (0i64..100).prop_map(|amount| CounterCommand::Increment { amount }),
        (0i64..100).prop_map(|amount| CounterCommand::Decrement { amount }),
        Just(CounterCommand::Reset),
    ]
}

/// Generate arbitrary counter events, including ones no decide would emit
fn counter_event() -> impl Strategy<Value = CounterEvent> {
    prop_oneof![
        (0i64..100).prop_map(CounterEvent::incremented),
        (0i64..100).prop_map(CounterEvent::decremented),
        Just(CounterEvent::was_reset()),
    ]
}

fn history() -> impl Strategy<Value = Vec<CounterEvent>> {
    prop::collection::vec(counter_event(), 0..50)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: state-stored and event-sourced computation agree
    #[test]
    fn prop_computations_agree(history in history(), command in counter_command()) {
        prop_assert!(computations_agree(&counter_decider(), &history, &command));
    }

    /// Property: `dimap_on_state(id, id)` is the identity transform
    #[test]
    fn prop_dimap_identity(value in -100i64..100, command in counter_command()) {
        let state = CounterState { value };
        prop_assert!(dimap_identity_holds(&counter_decider(), &state, &command));
    }

    /// Property: folding is a left fold, so splitting the history anywhere
    /// and resuming from the intermediate state gives the same result
    #[test]
    fn prop_fold_resumes_from_snapshot(history in history(), split in 0usize..50) {
        let decider = counter_decider();
        let split = split.min(history.len());
        let (head, tail) = history.split_at(split);

        let snapshot = decider.fold_history(head);
        let resumed = fold_events(|s, e| decider.evolve(s, e), snapshot, tail);

        prop_assert_eq!(resumed, decider.fold_history(&history));
    }

    /// Property: a rejected command never produces partial results
    #[test]
    fn prop_failure_is_all_or_nothing(history in history(), amount in 0i64..200) {
        let decider = counter_decider();
        let command = CounterCommand::Decrement { amount };
        let current = decider.fold_history(&history);

        match decider.compute_new_events(&history, &command) {
            Ok(events) => {
                prop_assert!(current.value >= amount);
                prop_assert_eq!(events.len(), 1);
            }
            Err(error) => {
                prop_assert!(current.value < amount);
                prop_assert_eq!(decider.compute_new_state(&current, &command), Err(error));
            }
        }
    }

    /// Property: mapping the command contravariantly is the same as
    /// converting the command by hand
    #[test]
    fn prop_map_contra_on_command(history in history(), amount in 0i64..100) {
        let by_amount = counter_decider()
            .map_contra_on_command(|amount: &i64| CounterCommand::Increment { amount: *amount });

        prop_assert_eq!(
            by_amount.compute_new_events(&history, &amount),
            counter_decider().compute_new_events(&history, &CounterCommand::Increment { amount })
        );
    }
}
