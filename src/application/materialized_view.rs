// Copyright (c) 2025 - Cowboy AI, Inc.
//! Materialized view orchestrator
//!
//! Keeps a read model current: each incoming event is evolved onto the
//! stored view state and the result is persisted.

use tracing::{debug, info};

use crate::application::ViewStateRepository;
use crate::view::Projection;

/// A projection bound to the store holding its read model
#[derive(Debug, Clone)]
pub struct MaterializedView<S, E, R> {
    projection: Projection<S, E>,
    repository: R,
}

impl<S, E, R> MaterializedView<S, E, R>
where
    S: Clone,
    R: ViewStateRepository<E, S>,
{
    pub fn new(projection: Projection<S, E>, repository: R) -> Self {
        Self {
            projection,
            repository,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Evolve the stored state by one event and save it
    ///
    /// A view nobody has stored yet starts from the projection's initial state.
    pub fn handle(&self, event: &E) -> Result<S, R::Error> {
        let state = match self.repository.fetch_state(event)? {
            Some(state) => state,
            None => {
                debug!("No stored view state, starting from the initial state");
                self.projection.initial_state().clone()
            }
        };
        let next = self.projection.evolve(&state, event);
        self.repository.save(&next)?;
        info!("Saved view state");
        Ok(next)
    }
}
