// Copyright (c) 2025 - Cowboy AI, Inc.
//! Process manager orchestrator
//!
//! ```text
//! ActionResult → fetch history → fold → decide → save events
//!                                          ↓
//!                         react (per new event) → publish actions
//! ```
//!
//! Events are saved before any action is published, so a crash in between
//! loses nothing: [`ProcessManager::backlog`] recomputes the outstanding
//! actions from state alone.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::application::{ActionPublisher, EventRepository};
use crate::errors::{ApplicationError, ApplicationResult};
use crate::process::AggregateProcess;

/// What handling one action result produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessOutcome<S, E, A> {
    pub events: Vec<E>,
    pub actions: Vec<A>,
    /// State after all new events
    pub state: S,
}

/// An event-sourced process bound to its event store and action transport
#[derive(Debug, Clone)]
pub struct ProcessManager<AR, S, E, A, Err, R, P> {
    process: AggregateProcess<AR, S, E, A, Err>,
    repository: R,
    publisher: P,
}

impl<AR, S, E, A, Err, R, P> ProcessManager<AR, S, E, A, Err, R, P>
where
    S: Clone,
    R: EventRepository<AR, E, E>,
    P: ActionPublisher<A>,
{
    pub fn new(process: AggregateProcess<AR, S, E, A, Err>, repository: R, publisher: P) -> Self {
        Self {
            process,
            repository,
            publisher,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Decide on an action result, save the events, publish what they make ready
    ///
    /// A [`ApplicationError::Publish`] failure means the events are already
    /// committed; [`ProcessManager::backlog`] still lists the unpublished actions.
    #[allow(clippy::type_complexity)]
    pub fn handle(
        &self,
        action_result: &AR,
    ) -> ApplicationResult<ProcessOutcome<S, E, A>, Err, R::Error, P::Error> {
        let history = self
            .repository
            .fetch_events(action_result)
            .map_err(ApplicationError::Repository)?;
        let mut state = self.process.fold_history(&history);
        debug!("Replayed {} process events", history.len());

        let events = self
            .process
            .decide(action_result, &state)
            .map_err(ApplicationError::Decision)?;
        self.repository
            .save(&events)
            .map_err(ApplicationError::Repository)?;

        let mut actions = Vec::new();
        for event in &events {
            actions.extend(self.process.react(&state, event));
            state = self.process.evolve(&state, event);
        }

        if !actions.is_empty() {
            self.publisher
                .publish(&actions)
                .map_err(ApplicationError::Publish)?;
        }
        info!(
            "Process handled action result: {} events, {} actions",
            events.len(),
            actions.len()
        );

        Ok(ProcessOutcome {
            events,
            actions,
            state,
        })
    }

    /// Outstanding actions for the stream `action_result` addresses
    ///
    /// Nothing is published; the caller decides whether to redeliver.
    pub fn backlog(&self, action_result: &AR) -> Result<Vec<A>, R::Error> {
        let history = self.repository.fetch_events(action_result)?;
        let state = self.process.fold_history(&history);
        Ok(self.process.pending(&state))
    }
}
