// Copyright (c) 2025 - Cowboy AI, Inc.
//! Decider - Pure Decision Making
//!
//! A decider answers two questions:
//!
//! ```text
//! decide:  (C, Si)  → Result<[Eo], Err>     which events should happen?
//! evolve:  (Si, Ei) → So                    what is the state afterwards?
//! initial_state: So                         where does the fold start?
//! ```
//!
//! Both functions are pure. `decide` may reject a command with the caller's
//! own error type; the engine never originates errors, it only routes calls
//! and hands failures back unchanged.
//!
//! # Refinement Levels
//!
//! ```text
//! Decider<C, Si, So, Ei, Eo, Err>      independent types, combinator target
//!   └─ DcbDecider<C, S, Ei, Eo, Err>   Si = So      → compute_new_events
//!        └─ AggregateDecider<C, S, E, Err>  Ei = Eo → compute_new_state
//! ```
//!
//! Every combinator is written once on [`Decider`]; the refined wrappers
//! delegate to it and re-wrap the result.
//!
//! # Combination
//!
//! - [`Decider::combine`]: commands and events become [`Either`] unions, the
//!   states are merged into a caller record through [`Merge`]/[`Split`].
//! - [`Decider::combine_via_tuples`]: same, with the state held as a pair.
//!
//! A command addressed to one side yields no events from the other side.
//! A failure from either side surfaces as that same failure.
//!
//! # Example
//!
//! ```rust
//! use cim_decider::{AggregateDecider, EventComputation, StateComputation};
//!
//! enum Command { Add(i64) }
//! #[derive(Debug, PartialEq)]
//! enum Event { Added(i64) }
//!
//! let decider: AggregateDecider<Command, i64, Event, ()> = AggregateDecider::new(
//!     |command: &Command, _state: &i64| match command {
//!         Command::Add(n) => Ok(vec![Event::Added(*n)]),
//!     },
//!     |state: &i64, event: &Event| match event {
//!         Event::Added(n) => state + n,
//!     },
//!     0,
//! );
//!
//! assert_eq!(decider.compute_new_events(&[], &Command::Add(5)), Ok(vec![Event::Added(5)]));
//! assert_eq!(decider.compute_new_state(&0, &Command::Add(5)), Ok(5));
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::computation::{fold_events, log_decision, EventComputation, StateComputation};
use crate::either::Either;
use crate::merge::{Merge, Split};
use crate::{DecideFn, EvolveFn, StateMapper};

/// Generic decider with fully independent input and output types
pub struct Decider<C, Si, So, Ei, Eo, Err> {
    decide: DecideFn<C, Si, Eo, Err>,
    evolve: EvolveFn<Si, Ei, So>,
    initial_state: So,
}

impl<C, Si, So: Clone, Ei, Eo, Err> Clone for Decider<C, Si, So, Ei, Eo, Err> {
    fn clone(&self) -> Self {
        Self {
            decide: Arc::clone(&self.decide),
            evolve: Arc::clone(&self.evolve),
            initial_state: self.initial_state.clone(),
        }
    }
}

impl<C, Si, So, Ei, Eo, Err> fmt::Debug for Decider<C, Si, So, Ei, Eo, Err> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Decider<{}, {}, {}>",
            std::any::type_name::<C>(),
            std::any::type_name::<So>(),
            std::any::type_name::<Eo>()
        )
    }
}

impl<C, Si, So, Ei, Eo, Err> Decider<C, Si, So, Ei, Eo, Err> {
    /// Create a decider from its decide and evolve functions and initial state
    pub fn new<D, F>(decide: D, evolve: F, initial_state: So) -> Self
    where
        D: Fn(&C, &Si) -> Result<Vec<Eo>, Err> + Send + Sync + 'static,
        F: Fn(&Si, &Ei) -> So + Send + Sync + 'static,
    {
        Self {
            decide: Arc::new(decide),
            evolve: Arc::new(evolve),
            initial_state,
        }
    }

    /// Decide which events a command produces in the given state
    pub fn decide(&self, command: &C, state: &Si) -> Result<Vec<Eo>, Err> {
        (self.decide)(command, state)
    }

    /// Apply one event to a state
    pub fn evolve(&self, state: &Si, event: &Ei) -> So {
        (self.evolve)(state, event)
    }

    /// The seed of the fold
    pub fn initial_state(&self) -> &So {
        &self.initial_state
    }
}

impl<C, Si, So, Ei, Eo, Err> Decider<C, Si, So, Ei, Eo, Err>
where
    C: 'static,
    Si: 'static,
    So: 'static,
    Ei: 'static,
    Eo: 'static,
    Err: 'static,
{
    /// Change the command type by pre-applying `f`
    pub fn map_contra_on_command<Cn, F>(self, f: F) -> Decider<Cn, Si, So, Ei, Eo, Err>
    where
        Cn: 'static,
        F: Fn(&Cn) -> C + Send + Sync + 'static,
    {
        let decide = self.decide;
        Decider {
            decide: Arc::new(move |command: &Cn, state: &Si| decide(&f(command), state)),
            evolve: self.evolve,
            initial_state: self.initial_state,
        }
    }

    /// Change the input event type by pre-applying `f` before evolve
    pub fn map_contra_on_event<Ein, F>(self, f: F) -> Decider<C, Si, So, Ein, Eo, Err>
    where
        Ein: 'static,
        F: Fn(&Ein) -> Ei + Send + Sync + 'static,
    {
        let evolve = self.evolve;
        Decider {
            decide: self.decide,
            evolve: Arc::new(move |state: &Si, event: &Ein| evolve(state, &f(event))),
            initial_state: self.initial_state,
        }
    }

    /// Change the output event type by post-applying `f` to decided events
    pub fn map_on_event<Eon, F>(self, f: F) -> Decider<C, Si, So, Ei, Eon, Err>
    where
        Eon: 'static,
        F: Fn(Eo) -> Eon + Send + Sync + 'static,
    {
        let decide = self.decide;
        Decider {
            decide: Arc::new(move |command: &C, state: &Si| -> Result<Vec<Eon>, Err> {
                decide(command, state).map(|events| events.into_iter().map(&f).collect())
            }),
            evolve: self.evolve,
            initial_state: self.initial_state,
        }
    }

    /// Replace the event type pair `(Ei, Eo)` with `(Ein, Eon)`
    pub fn dimap_on_event<Ein, Eon, Fl, Fr>(self, fl: Fl, fr: Fr) -> Decider<C, Si, So, Ein, Eon, Err>
    where
        Ein: 'static,
        Eon: 'static,
        Fl: Fn(&Ein) -> Ei + Send + Sync + 'static,
        Fr: Fn(Eo) -> Eon + Send + Sync + 'static,
    {
        self.map_contra_on_event(fl).map_on_event(fr)
    }

    /// Change the input state type by pre-applying `f` for both decide and evolve
    pub fn map_contra_on_state<Sin, F>(self, f: F) -> Decider<C, Sin, So, Ei, Eo, Err>
    where
        Sin: 'static,
        F: Fn(&Sin) -> Si + Send + Sync + 'static,
    {
        let to_decide = Arc::new(f);
        let to_evolve = Arc::clone(&to_decide);
        let decide = self.decide;
        let evolve = self.evolve;
        Decider {
            decide: Arc::new(move |command: &C, state: &Sin| decide(command, &to_decide(state))),
            evolve: Arc::new(move |state: &Sin, event: &Ei| evolve(&to_evolve(state), event)),
            initial_state: self.initial_state,
        }
    }

    /// Change the output state type by post-applying `f`
    ///
    /// The initial state is transformed once, here.
    pub fn map_on_state<Son, F>(self, f: F) -> Decider<C, Si, Son, Ei, Eo, Err>
    where
        Son: 'static,
        F: Fn(So) -> Son + Send + Sync + 'static,
    {
        let initial_state = f(self.initial_state);
        let evolve = self.evolve;
        Decider {
            decide: self.decide,
            evolve: Arc::new(move |state: &Si, event: &Ei| f(evolve(state, event))),
            initial_state,
        }
    }

    /// Replace the state type pair `(Si, So)` with `(Sin, Son)`
    pub fn dimap_on_state<Sin, Son, Fl, Fr>(self, fl: Fl, fr: Fr) -> Decider<C, Sin, Son, Ei, Eo, Err>
    where
        Sin: 'static,
        Son: 'static,
        Fl: Fn(&Sin) -> Si + Send + Sync + 'static,
        Fr: Fn(So) -> Son + Send + Sync + 'static,
    {
        self.map_contra_on_state(fl).map_on_state(fr)
    }

    /// Change the error type, typically to align two deciders before combining
    pub fn map_error<Err2, F>(self, f: F) -> Decider<C, Si, So, Ei, Eo, Err2>
    where
        Err2: 'static,
        F: Fn(Err) -> Err2 + Send + Sync + 'static,
    {
        let decide = self.decide;
        Decider {
            decide: Arc::new(move |command: &C, state: &Si| decide(command, state).map_err(&f)),
            evolve: self.evolve,
            initial_state: self.initial_state,
        }
    }

    /// Applicative apply on the output state
    ///
    /// Decisions of both deciders are concatenated, this one first. The first
    /// failure wins and no partial event list escapes.
    pub fn apply_on_state<Son>(
        self,
        ff: Decider<C, Si, StateMapper<So, Son>, Ei, Eo, Err>,
    ) -> Decider<C, Si, Son, Ei, Eo, Err>
    where
        Son: 'static,
    {
        let initial_state = (ff.initial_state)(self.initial_state);
        let decide = self.decide;
        let evolve = self.evolve;
        let ff_decide = ff.decide;
        let ff_evolve = ff.evolve;
        Decider {
            decide: Arc::new(move |command: &C, state: &Si| -> Result<Vec<Eo>, Err> {
                let mut events = decide(command, state)?;
                events.extend(ff_decide(command, state)?);
                Ok(events)
            }),
            evolve: Arc::new(move |state: &Si, event: &Ei| {
                ff_evolve(state, event)(evolve(state, event))
            }),
            initial_state,
        }
    }

    /// Run two deciders side by side over the same input, merging the output states
    pub fn product_on_state<So2, Sm>(
        self,
        other: Decider<C, Si, So2, Ei, Eo, Err>,
    ) -> Decider<C, Si, Sm, Ei, Eo, Err>
    where
        So2: Clone + Send + Sync + 'static,
        Sm: Merge<So, So2> + 'static,
    {
        let ff = other.map_on_state(|right: So2| -> StateMapper<So, Sm> {
            Arc::new(move |left: So| Sm::merge(left, right.clone()))
        });
        self.apply_on_state(ff)
    }

    /// [`Decider::product_on_state`] into a pair
    pub fn product_via_tuples_on_state<So2>(
        self,
        other: Decider<C, Si, So2, Ei, Eo, Err>,
    ) -> Decider<C, Si, (So, So2), Ei, Eo, Err>
    where
        So2: Clone + Send + Sync + 'static,
    {
        self.product_on_state(other)
    }

    /// Combine with another decider over the union of both vocabularies
    ///
    /// Commands and events are injected into [`Either`]; each side decides
    /// only for its own commands and evolves only its own slice of the merged
    /// state. Foreign events leave a side's slice as it was.
    pub fn combine<C2, Si2, So2, Ei2, Eo2, Sin, Son>(
        self,
        other: Decider<C2, Si2, So2, Ei2, Eo2, Err>,
    ) -> Decider<Either<C, C2>, Sin, Son, Either<Ei, Ei2>, Either<Eo, Eo2>, Err>
    where
        Si: Clone + Into<So>,
        C2: 'static,
        Si2: Clone + Into<So2> + 'static,
        So2: Clone + Send + Sync + 'static,
        Ei2: 'static,
        Eo2: 'static,
        Sin: Split<Si, Si2> + 'static,
        Son: Merge<So, So2> + 'static,
    {
        let left = self
            .lift_left::<C2, Ei2, Eo2>()
            .map_contra_on_state(|state: &Sin| Split::<Si, Si2>::left(state));
        let right = other
            .lift_right::<C, Ei, Eo>()
            .map_contra_on_state(|state: &Sin| Split::<Si, Si2>::right(state));
        left.product_on_state(right)
    }

    /// [`Decider::combine`] with the merged state held as a pair
    #[allow(clippy::type_complexity)]
    pub fn combine_via_tuples<C2, Si2, So2, Ei2, Eo2>(
        self,
        other: Decider<C2, Si2, So2, Ei2, Eo2, Err>,
    ) -> Decider<Either<C, C2>, (Si, Si2), (So, So2), Either<Ei, Ei2>, Either<Eo, Eo2>, Err>
    where
        Si: Clone + Into<So>,
        C2: 'static,
        Si2: Clone + Into<So2> + 'static,
        So2: Clone + Send + Sync + 'static,
        Ei2: 'static,
        Eo2: 'static,
    {
        self.combine(other)
    }

    #[allow(clippy::type_complexity)]
    fn lift_left<C2, Ei2, Eo2>(
        self,
    ) -> Decider<Either<C, C2>, Si, So, Either<Ei, Ei2>, Either<Eo, Eo2>, Err>
    where
        Si: Clone + Into<So>,
        C2: 'static,
        Ei2: 'static,
        Eo2: 'static,
    {
        let decide = self.decide;
        let evolve = self.evolve;
        Decider {
            decide: Arc::new(move |command: &Either<C, C2>, state: &Si| -> Result<Vec<Either<Eo, Eo2>>, Err> {
                match command {
                    Either::Left(command) => decide(command, state)
                        .map(|events| events.into_iter().map(Either::Left).collect()),
                    Either::Right(_) => Ok(Vec::new()),
                }
            }),
            evolve: Arc::new(move |state: &Si, event: &Either<Ei, Ei2>| match event {
                Either::Left(event) => evolve(state, event),
                Either::Right(_) => state.clone().into(),
            }),
            initial_state: self.initial_state,
        }
    }

    #[allow(clippy::type_complexity)]
    fn lift_right<C1, Ei1, Eo1>(
        self,
    ) -> Decider<Either<C1, C>, Si, So, Either<Ei1, Ei>, Either<Eo1, Eo>, Err>
    where
        Si: Clone + Into<So>,
        C1: 'static,
        Ei1: 'static,
        Eo1: 'static,
    {
        let decide = self.decide;
        let evolve = self.evolve;
        Decider {
            decide: Arc::new(move |command: &Either<C1, C>, state: &Si| -> Result<Vec<Either<Eo1, Eo>>, Err> {
                match command {
                    Either::Left(_) => Ok(Vec::new()),
                    Either::Right(command) => decide(command, state)
                        .map(|events| events.into_iter().map(Either::Right).collect()),
                }
            }),
            evolve: Arc::new(move |state: &Si, event: &Either<Ei1, Ei>| match event {
                Either::Left(_) => state.clone().into(),
                Either::Right(event) => evolve(state, event),
            }),
            initial_state: self.initial_state,
        }
    }
}

/// Decider whose input and output states coincide
///
/// Input and output events may still differ, which lets one decider read a
/// wider slice of history than it writes.
pub struct DcbDecider<C, S, Ei, Eo, Err>(Decider<C, S, S, Ei, Eo, Err>);

impl<C, S: Clone, Ei, Eo, Err> Clone for DcbDecider<C, S, Ei, Eo, Err> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<C, S, Ei, Eo, Err> fmt::Debug for DcbDecider<C, S, Ei, Eo, Err> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dcb{:?}", self.0)
    }
}

impl<C, S, Ei, Eo, Err> From<Decider<C, S, S, Ei, Eo, Err>> for DcbDecider<C, S, Ei, Eo, Err> {
    fn from(decider: Decider<C, S, S, Ei, Eo, Err>) -> Self {
        Self(decider)
    }
}

impl<C, S, Ei, Eo, Err> DcbDecider<C, S, Ei, Eo, Err> {
    /// Create a decider from its decide and evolve functions and initial state
    pub fn new<D, F>(decide: D, evolve: F, initial_state: S) -> Self
    where
        D: Fn(&C, &S) -> Result<Vec<Eo>, Err> + Send + Sync + 'static,
        F: Fn(&S, &Ei) -> S + Send + Sync + 'static,
    {
        Self(Decider::new(decide, evolve, initial_state))
    }

    /// Decide which events a command produces in the given state
    pub fn decide(&self, command: &C, state: &S) -> Result<Vec<Eo>, Err> {
        self.0.decide(command, state)
    }

    /// Apply one event to a state
    pub fn evolve(&self, state: &S, event: &Ei) -> S {
        self.0.evolve(state, event)
    }

    /// The seed of the fold
    pub fn initial_state(&self) -> &S {
        self.0.initial_state()
    }

    /// Borrow the underlying generic decider
    pub fn as_decider(&self) -> &Decider<C, S, S, Ei, Eo, Err> {
        &self.0
    }

    /// Unwrap into the underlying generic decider
    pub fn into_decider(self) -> Decider<C, S, S, Ei, Eo, Err> {
        self.0
    }

    /// Rebuild the state from an ordered history, oldest first
    pub fn fold_history(&self, history: &[Ei]) -> S
    where
        S: Clone,
    {
        fold_events(
            |state, event| self.evolve(state, event),
            self.initial_state().clone(),
            history,
        )
    }
}

impl<C, S, Ei, Eo, Err> DcbDecider<C, S, Ei, Eo, Err>
where
    C: 'static,
    S: 'static,
    Ei: 'static,
    Eo: 'static,
    Err: 'static,
{
    /// Change the command type by pre-applying `f`
    pub fn map_contra_on_command<Cn, F>(self, f: F) -> DcbDecider<Cn, S, Ei, Eo, Err>
    where
        Cn: 'static,
        F: Fn(&Cn) -> C + Send + Sync + 'static,
    {
        DcbDecider(self.0.map_contra_on_command(f))
    }

    /// Change the input event type by pre-applying `f` before evolve
    pub fn map_contra_on_event<Ein, F>(self, f: F) -> DcbDecider<C, S, Ein, Eo, Err>
    where
        Ein: 'static,
        F: Fn(&Ein) -> Ei + Send + Sync + 'static,
    {
        DcbDecider(self.0.map_contra_on_event(f))
    }

    /// Change the output event type by post-applying `f` to decided events
    pub fn map_on_event<Eon, F>(self, f: F) -> DcbDecider<C, S, Ei, Eon, Err>
    where
        Eon: 'static,
        F: Fn(Eo) -> Eon + Send + Sync + 'static,
    {
        DcbDecider(self.0.map_on_event(f))
    }

    /// Replace the event type pair `(Ei, Eo)` with `(Ein, Eon)`
    pub fn dimap_on_event<Ein, Eon, Fl, Fr>(self, fl: Fl, fr: Fr) -> DcbDecider<C, S, Ein, Eon, Err>
    where
        Ein: 'static,
        Eon: 'static,
        Fl: Fn(&Ein) -> Ei + Send + Sync + 'static,
        Fr: Fn(Eo) -> Eon + Send + Sync + 'static,
    {
        DcbDecider(self.0.dimap_on_event(fl, fr))
    }

    /// Present the state as another type
    pub fn dimap_on_state<Sn, Fl, Fr>(self, fl: Fl, fr: Fr) -> DcbDecider<C, Sn, Ei, Eo, Err>
    where
        Sn: 'static,
        Fl: Fn(&Sn) -> S + Send + Sync + 'static,
        Fr: Fn(S) -> Sn + Send + Sync + 'static,
    {
        DcbDecider(self.0.dimap_on_state(fl, fr))
    }

    /// Change the error type
    pub fn map_error<Err2, F>(self, f: F) -> DcbDecider<C, S, Ei, Eo, Err2>
    where
        Err2: 'static,
        F: Fn(Err) -> Err2 + Send + Sync + 'static,
    {
        DcbDecider(self.0.map_error(f))
    }

    /// Run two deciders over the same commands and events into one merged state
    pub fn product_on_state<S2, Sn>(self, other: DcbDecider<C, S2, Ei, Eo, Err>) -> DcbDecider<C, Sn, Ei, Eo, Err>
    where
        S2: Clone + Send + Sync + 'static,
        Sn: Split<S, S2> + Merge<S, S2> + 'static,
    {
        let left = self
            .0
            .map_contra_on_state(|state: &Sn| Split::<S, S2>::left(state));
        let right = other
            .0
            .map_contra_on_state(|state: &Sn| Split::<S, S2>::right(state));
        DcbDecider(left.product_on_state(right))
    }

    /// [`DcbDecider::product_on_state`] into a pair
    pub fn product_via_tuples_on_state<S2>(self, other: DcbDecider<C, S2, Ei, Eo, Err>) -> DcbDecider<C, (S, S2), Ei, Eo, Err>
    where
        S: Clone,
        S2: Clone + Send + Sync + 'static,
    {
        self.product_on_state(other)
    }

    /// Combine with another decider, merging both states into `Sn`
    #[allow(clippy::type_complexity)]
    pub fn combine<C2, S2, Ei2, Eo2, Sn>(
        self,
        other: DcbDecider<C2, S2, Ei2, Eo2, Err>,
    ) -> DcbDecider<Either<C, C2>, Sn, Either<Ei, Ei2>, Either<Eo, Eo2>, Err>
    where
        S: Clone,
        C2: 'static,
        S2: Clone + Send + Sync + 'static,
        Ei2: 'static,
        Eo2: 'static,
        Sn: Split<S, S2> + Merge<S, S2> + 'static,
    {
        DcbDecider(self.0.combine(other.0))
    }

    /// Combine with another decider, holding both states as a pair
    #[allow(clippy::type_complexity)]
    pub fn combine_via_tuples<C2, S2, Ei2, Eo2>(
        self,
        other: DcbDecider<C2, S2, Ei2, Eo2, Err>,
    ) -> DcbDecider<Either<C, C2>, (S, S2), Either<Ei, Ei2>, Either<Eo, Eo2>, Err>
    where
        S: Clone,
        C2: 'static,
        S2: Clone + Send + Sync + 'static,
        Ei2: 'static,
        Eo2: 'static,
    {
        self.combine(other)
    }
}

impl<C, S: Clone, Ei, Eo, Err> EventComputation<C, S, Ei, Eo, Err> for DcbDecider<C, S, Ei, Eo, Err> {
    fn compute_new_events(&self, history: &[Ei], command: &C) -> Result<Vec<Eo>, Err> {
        trace!(history_len = history.len(), "replaying history");
        let state = self.fold_history(history);
        log_decision(self.decide(command, &state))
    }
}

/// Decider whose states and events both coincide
///
/// Supports event-sourced and state-stored computation on the same instance.
pub struct AggregateDecider<C, S, E, Err>(DcbDecider<C, S, E, E, Err>);

impl<C, S: Clone, E, Err> Clone for AggregateDecider<C, S, E, Err> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<C, S, E, Err> fmt::Debug for AggregateDecider<C, S, E, Err> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Aggregate{:?}", self.0.as_decider())
    }
}

impl<C, S, E, Err> From<DcbDecider<C, S, E, E, Err>> for AggregateDecider<C, S, E, Err> {
    fn from(decider: DcbDecider<C, S, E, E, Err>) -> Self {
        Self(decider)
    }
}

impl<C, S, E, Err> From<Decider<C, S, S, E, E, Err>> for AggregateDecider<C, S, E, Err> {
    fn from(decider: Decider<C, S, S, E, E, Err>) -> Self {
        Self(DcbDecider(decider))
    }
}

impl<C, S, E, Err> AggregateDecider<C, S, E, Err> {
    /// Create a decider from its decide and evolve functions and initial state
    pub fn new<D, F>(decide: D, evolve: F, initial_state: S) -> Self
    where
        D: Fn(&C, &S) -> Result<Vec<E>, Err> + Send + Sync + 'static,
        F: Fn(&S, &E) -> S + Send + Sync + 'static,
    {
        Self(DcbDecider::new(decide, evolve, initial_state))
    }

    /// Decide which events a command produces in the given state
    pub fn decide(&self, command: &C, state: &S) -> Result<Vec<E>, Err> {
        self.0.decide(command, state)
    }

    /// Apply one event to a state
    pub fn evolve(&self, state: &S, event: &E) -> S {
        self.0.evolve(state, event)
    }

    /// The seed of the fold
    pub fn initial_state(&self) -> &S {
        self.0.initial_state()
    }

    /// Borrow the underlying generic decider
    pub fn as_decider(&self) -> &Decider<C, S, S, E, E, Err> {
        self.0.as_decider()
    }

    /// Relax to the event-sourced level
    pub fn into_dcb(self) -> DcbDecider<C, S, E, E, Err> {
        self.0
    }

    /// Unwrap into the underlying generic decider
    pub fn into_decider(self) -> Decider<C, S, S, E, E, Err> {
        self.0.into_decider()
    }

    /// Rebuild the state from an ordered history, oldest first
    pub fn fold_history(&self, history: &[E]) -> S
    where
        S: Clone,
    {
        self.0.fold_history(history)
    }
}

impl<C, S, E, Err> AggregateDecider<C, S, E, Err>
where
    C: 'static,
    S: 'static,
    E: 'static,
    Err: 'static,
{
    /// Change the command type by pre-applying `f`
    pub fn map_contra_on_command<Cn, F>(self, f: F) -> AggregateDecider<Cn, S, E, Err>
    where
        Cn: 'static,
        F: Fn(&Cn) -> C + Send + Sync + 'static,
    {
        AggregateDecider(self.0.map_contra_on_command(f))
    }

    /// Present the events as another type through a pair of conversions
    pub fn dimap_on_event<En, Fl, Fr>(self, fl: Fl, fr: Fr) -> AggregateDecider<C, S, En, Err>
    where
        En: 'static,
        Fl: Fn(&En) -> E + Send + Sync + 'static,
        Fr: Fn(E) -> En + Send + Sync + 'static,
    {
        AggregateDecider(self.0.dimap_on_event(fl, fr))
    }

    /// Present the state as another type
    pub fn dimap_on_state<Sn, Fl, Fr>(self, fl: Fl, fr: Fr) -> AggregateDecider<C, Sn, E, Err>
    where
        Sn: 'static,
        Fl: Fn(&Sn) -> S + Send + Sync + 'static,
        Fr: Fn(S) -> Sn + Send + Sync + 'static,
    {
        AggregateDecider(self.0.dimap_on_state(fl, fr))
    }

    /// Change the error type
    pub fn map_error<Err2, F>(self, f: F) -> AggregateDecider<C, S, E, Err2>
    where
        Err2: 'static,
        F: Fn(Err) -> Err2 + Send + Sync + 'static,
    {
        AggregateDecider(self.0.map_error(f))
    }

    /// Run two aggregates over the same commands and events into one merged state
    pub fn product_on_state<S2, Sn>(self, other: AggregateDecider<C, S2, E, Err>) -> AggregateDecider<C, Sn, E, Err>
    where
        S2: Clone + Send + Sync + 'static,
        Sn: Split<S, S2> + Merge<S, S2> + 'static,
    {
        AggregateDecider(self.0.product_on_state(other.0))
    }

    /// [`AggregateDecider::product_on_state`] into a pair
    pub fn product_via_tuples_on_state<S2>(self, other: AggregateDecider<C, S2, E, Err>) -> AggregateDecider<C, (S, S2), E, Err>
    where
        S: Clone,
        S2: Clone + Send + Sync + 'static,
    {
        self.product_on_state(other)
    }

    /// Combine with another aggregate, merging both states into `Sn`
    pub fn combine<C2, S2, E2, Sn>(
        self,
        other: AggregateDecider<C2, S2, E2, Err>,
    ) -> AggregateDecider<Either<C, C2>, Sn, Either<E, E2>, Err>
    where
        S: Clone,
        C2: 'static,
        S2: Clone + Send + Sync + 'static,
        E2: 'static,
        Sn: Split<S, S2> + Merge<S, S2> + 'static,
    {
        AggregateDecider(self.0.combine(other.0))
    }

    /// Combine with another aggregate, holding both states as a pair
    pub fn combine_via_tuples<C2, S2, E2>(
        self,
        other: AggregateDecider<C2, S2, E2, Err>,
    ) -> AggregateDecider<Either<C, C2>, (S, S2), Either<E, E2>, Err>
    where
        S: Clone,
        C2: 'static,
        S2: Clone + Send + Sync + 'static,
        E2: 'static,
    {
        self.combine(other)
    }
}

impl<C, S: Clone, E, Err> EventComputation<C, S, E, E, Err> for AggregateDecider<C, S, E, Err> {
    fn compute_new_events(&self, history: &[E], command: &C) -> Result<Vec<E>, Err> {
        self.0.compute_new_events(history, command)
    }
}

impl<C, S: Clone, E, Err> StateComputation<C, S, E, Err> for AggregateDecider<C, S, E, Err> {
    fn compute_new_state(&self, state: &S, command: &C) -> Result<S, Err> {
        let events = log_decision(self.decide(command, state))?;
        Ok(fold_events(
            |state, event| self.evolve(state, event),
            state.clone(),
            &events,
        ))
    }
}
