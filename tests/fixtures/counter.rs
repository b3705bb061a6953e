// Copyright (c) 2025 - Cowboy AI, Inc.
//! Counter domain: the smallest aggregate worth combining

use cim_decider::application::Identifier;
use cim_decider::{AggregateDecider, Projection};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const COUNTER_ID: &str = "counter-1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CounterCommand {
    Increment { amount: i64 },
    Decrement { amount: i64 },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CounterEvent {
    Incremented { version: u32, amount: i64 },
    Decremented { version: u32, amount: i64 },
    WasReset { version: u32 },
}

impl CounterEvent {
    pub fn incremented(amount: i64) -> Self {
        CounterEvent::Incremented { version: 1, amount }
    }

    pub fn decremented(amount: i64) -> Self {
        CounterEvent::Decremented { version: 1, amount }
    }

    pub fn was_reset() -> Self {
        CounterEvent::WasReset { version: 1 }
    }
}

impl Identifier for CounterCommand {
    fn identifier(&self) -> String {
        COUNTER_ID.to_string()
    }
}

impl Identifier for CounterEvent {
    fn identifier(&self) -> String {
        COUNTER_ID.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CounterState {
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CounterError {
    #[error("counter at {value} cannot go below zero by {amount}")]
    WouldGoNegative { value: i64, amount: i64 },
}

pub fn counter_decider() -> AggregateDecider<CounterCommand, CounterState, CounterEvent, CounterError> {
    AggregateDecider::new(
        |command: &CounterCommand, state: &CounterState| match command {
            CounterCommand::Increment { amount } => Ok(vec![CounterEvent::incremented(*amount)]),
            CounterCommand::Decrement { amount } if state.value < *amount => Err(CounterError::WouldGoNegative {
                value: state.value,
                amount: *amount,
            }),
            CounterCommand::Decrement { amount } => Ok(vec![CounterEvent::decremented(*amount)]),
            CounterCommand::Reset if state.value == 0 => Ok(Vec::new()),
            CounterCommand::Reset => Ok(vec![CounterEvent::was_reset()]),
        },
        evolve_counter,
        CounterState::default(),
    )
}

pub fn evolve_counter(state: &CounterState, event: &CounterEvent) -> CounterState {
    match event {
        CounterEvent::Incremented { amount, .. } => CounterState {
            value: state.value + amount,
        },
        CounterEvent::Decremented { amount, .. } => CounterState {
            value: state.value - amount,
        },
        CounterEvent::WasReset { .. } => CounterState::default(),
    }
}

/// Number of changes a counter has seen
pub fn change_count_projection() -> Projection<usize, CounterEvent> {
    Projection::new(|count: &usize, _event: &CounterEvent| count + 1, 0)
}
