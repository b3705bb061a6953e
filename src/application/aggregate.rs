// Copyright (c) 2025 - Cowboy AI, Inc.
//! Aggregate orchestrators
//!
//! Glue a decider to a repository: load, compute, save. A rejected command
//! saves nothing.

use tracing::{debug, info};

use crate::application::{EventRepository, StateRepository};
use crate::computation::{EventComputation, StateComputation};
use crate::decider::AggregateDecider;
use crate::errors::{ApplicationError, ApplicationResult};

/// Event-sourced aggregate: history in, new events out
///
/// Works with any component offering [`EventComputation`], deciders and
/// processes alike.
#[derive(Debug, Clone)]
pub struct EventSourcedAggregate<D, R> {
    component: D,
    repository: R,
}

impl<D, R> EventSourcedAggregate<D, R> {
    pub fn new(component: D, repository: R) -> Self {
        Self {
            component,
            repository,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Replay the stream `command` addresses, decide, then append the result
    #[allow(clippy::type_complexity)]
    pub fn handle<C, S, Ei, Eo, Err>(
        &self,
        command: &C,
    ) -> ApplicationResult<Vec<Eo>, Err, <R as EventRepository<C, Ei, Eo>>::Error>
    where
        D: EventComputation<C, S, Ei, Eo, Err>,
        R: EventRepository<C, Ei, Eo>,
    {
        let history = self
            .repository
            .fetch_events(command)
            .map_err(ApplicationError::Repository)?;
        debug!("Loaded {} events", history.len());

        let events = self
            .component
            .compute_new_events(&history, command)
            .map_err(ApplicationError::Decision)?;

        self.repository
            .save(&events)
            .map_err(ApplicationError::Repository)?;
        info!("Appended {} events", events.len());
        Ok(events)
    }
}

/// State-stored aggregate: current state in, next state out
#[derive(Debug, Clone)]
pub struct StateStoredAggregate<C, S, E, Err, R> {
    decider: AggregateDecider<C, S, E, Err>,
    repository: R,
}

impl<C, S, E, Err, R> StateStoredAggregate<C, S, E, Err, R>
where
    S: Clone,
    R: StateRepository<C, S>,
{
    pub fn new(decider: AggregateDecider<C, S, E, Err>, repository: R) -> Self {
        Self {
            decider,
            repository,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Load the state (or start from the initial state), decide, evolve, save
    pub fn handle(&self, command: &C) -> ApplicationResult<S, Err, R::Error> {
        let state = match self
            .repository
            .fetch_state(command)
            .map_err(ApplicationError::Repository)?
        {
            Some(state) => state,
            None => {
                debug!("No stored state, starting from the initial state");
                self.decider.initial_state().clone()
            }
        };

        let next = self
            .decider
            .compute_new_state(&state, command)
            .map_err(ApplicationError::Decision)?;

        self.repository
            .save(&next)
            .map_err(ApplicationError::Repository)?;
        info!("Saved new aggregate state");
        Ok(next)
    }
}
