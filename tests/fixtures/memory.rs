// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory collaborators keyed by [`Identifier`]

use std::collections::HashMap;
use std::sync::Mutex;

use cim_decider::application::{
    ActionPublisher, EventRepository, Identifier, StateRepository, ViewStateRepository,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store lock poisoned")]
    Poisoned,

    #[error("store is read-only")]
    ReadOnly,
}

/// Append-only event streams, one per identifier
#[derive(Debug)]
pub struct InMemoryEventStore<E> {
    streams: Mutex<HashMap<String, Vec<E>>>,
    read_only: bool,
}

impl<E: Clone> InMemoryEventStore<E> {
    pub fn new() -> Self {
        Self {
            streams: Mutex::new(HashMap::new()),
            read_only: false,
        }
    }

    pub fn read_only() -> Self {
        Self {
            streams: Mutex::new(HashMap::new()),
            read_only: true,
        }
    }

    /// Seed a stream directly, bypassing any decider
    pub fn seed(&self, key: &str, events: Vec<E>) {
        if let Ok(mut streams) = self.streams.lock() {
            streams.entry(key.to_string()).or_default().extend(events);
        }
    }

    pub fn stream(&self, key: &str) -> Vec<E> {
        self.streams
            .lock()
            .map(|streams| streams.get(key).cloned().unwrap_or_default())
            .unwrap_or_default()
    }
}

impl<C, Ei, Eo> EventRepository<C, Ei, Eo> for InMemoryEventStore<Ei>
where
    C: Identifier,
    Ei: Clone + From<Eo>,
    Eo: Clone + Identifier,
{
    type Error = StoreError;

    fn fetch_events(&self, command: &C) -> Result<Vec<Ei>, StoreError> {
        let streams = self.streams.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(streams.get(&command.identifier()).cloned().unwrap_or_default())
    }

    fn save(&self, events: &[Eo]) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::ReadOnly);
        }
        let mut streams = self.streams.lock().map_err(|_| StoreError::Poisoned)?;
        for event in events {
            streams
                .entry(event.identifier())
                .or_default()
                .push(Ei::from(event.clone()));
        }
        Ok(())
    }
}

/// One stored state per identifier, derived from the saved state itself
#[derive(Debug)]
pub struct InMemoryStateStore<S> {
    states: Mutex<HashMap<String, S>>,
    key_of: fn(&S) -> String,
}

impl<S: Clone> InMemoryStateStore<S> {
    pub fn new(key_of: fn(&S) -> String) -> Self {
        Self {
            states: Mutex::new(HashMap::new()),
            key_of,
        }
    }

    pub fn get(&self, key: &str) -> Option<S> {
        self.states.lock().ok().and_then(|states| states.get(key).cloned())
    }
}

impl<C: Identifier, S: Clone> StateRepository<C, S> for InMemoryStateStore<S> {
    type Error = StoreError;

    fn fetch_state(&self, command: &C) -> Result<Option<S>, StoreError> {
        let states = self.states.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(states.get(&command.identifier()).cloned())
    }

    fn save(&self, state: &S) -> Result<(), StoreError> {
        let mut states = self.states.lock().map_err(|_| StoreError::Poisoned)?;
        states.insert((self.key_of)(state), state.clone());
        Ok(())
    }
}

impl<E: Identifier, S: Clone> ViewStateRepository<E, S> for InMemoryStateStore<S> {
    type Error = StoreError;

    fn fetch_state(&self, event: &E) -> Result<Option<S>, StoreError> {
        let states = self.states.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(states.get(&event.identifier()).cloned())
    }

    fn save(&self, state: &S) -> Result<(), StoreError> {
        let mut states = self.states.lock().map_err(|_| StoreError::Poisoned)?;
        states.insert((self.key_of)(state), state.clone());
        Ok(())
    }
}

/// Collects published actions in order
#[derive(Debug)]
pub struct RecordingPublisher<A> {
    published: Mutex<Vec<A>>,
}

impl<A: Clone> RecordingPublisher<A> {
    pub fn new() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
        }
    }

    pub fn published(&self) -> Vec<A> {
        self.published.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl<A: Clone> ActionPublisher<A> for RecordingPublisher<A> {
    type Error = StoreError;

    fn publish(&self, actions: &[A]) -> Result<(), StoreError> {
        self.published
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .extend_from_slice(actions);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("action transport unavailable")]
    Unavailable,
}

/// A transport that refuses every publish
#[derive(Debug, Default)]
pub struct UnavailablePublisher;

impl<A> ActionPublisher<A> for UnavailablePublisher {
    type Error = TransportError;

    fn publish(&self, _actions: &[A]) -> Result<(), TransportError> {
        Err(TransportError::Unavailable)
    }
}
