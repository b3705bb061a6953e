// Copyright (c) 2025 - Cowboy AI, Inc.
//! Process Manager - Decisions Plus Orchestration
//!
//! A process is a decider that also knows what should be done next:
//!
//! ```text
//! decide:  (AR, Si) → Result<[Eo], Err>   action result → events
//! evolve:  (Si, Ei) → So                  events → state
//! react:   (Si, Ei) → [A]                 actions this event makes ready
//! pending: Si       → [A]                 complete outstanding backlog
//! ```
//!
//! `react` drives immediate, event-driven orchestration. `pending` recovers
//! the same work from state alone, for polling or after a restart when the
//! triggering event is no longer at hand.
//!
//! # Process Law
//!
//! For every reachable `state` and `event`:
//!
//! ```text
//! react(state, event) ⊆ pending(evolve(state, event))     (as multisets)
//! ```
//!
//! The two functions are supplied independently by the author of a process,
//! so the engine cannot check this at runtime. Assert it in tests with
//! [`crate::laws::react_within_pending`].
//!
//! # Structure
//!
//! A [`Process`] owns a [`Decider`] and delegates decide/evolve and every
//! state/event combinator to it, adding `react` and `pending` alongside.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::computation::{fold_events, log_decision, EventComputation, StateComputation};
use crate::decider::Decider;
use crate::either::Either;
use crate::merge::{Merge, Split};
use crate::{PendingFn, ReactFn, StateMapper};

/// Generic process with fully independent input and output types
pub struct Process<AR, Si, So, Ei, Eo, A, Err> {
    decider: Decider<AR, Si, So, Ei, Eo, Err>,
    react: ReactFn<Si, Ei, A>,
    pending: PendingFn<Si, A>,
}

impl<AR, Si, So: Clone, Ei, Eo, A, Err> Clone for Process<AR, Si, So, Ei, Eo, A, Err> {
    fn clone(&self) -> Self {
        Self {
            decider: self.decider.clone(),
            react: Arc::clone(&self.react),
            pending: Arc::clone(&self.pending),
        }
    }
}

impl<AR, Si, So, Ei, Eo, A, Err> fmt::Debug for Process<AR, Si, So, Ei, Eo, A, Err> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Process<{}, {}, {}, {}>",
            std::any::type_name::<AR>(),
            std::any::type_name::<So>(),
            std::any::type_name::<Eo>(),
            std::any::type_name::<A>()
        )
    }
}

impl<AR, Si, So, Ei, Eo, A, Err> Process<AR, Si, So, Ei, Eo, A, Err> {
    /// Create a process from its four functions and initial state
    pub fn new<D, F, R, P>(decide: D, evolve: F, react: R, pending: P, initial_state: So) -> Self
    where
        D: Fn(&AR, &Si) -> Result<Vec<Eo>, Err> + Send + Sync + 'static,
        F: Fn(&Si, &Ei) -> So + Send + Sync + 'static,
        R: Fn(&Si, &Ei) -> Vec<A> + Send + Sync + 'static,
        P: Fn(&Si) -> Vec<A> + Send + Sync + 'static,
    {
        Self::from_decider(Decider::new(decide, evolve, initial_state), react, pending)
    }

    /// Extend an existing decider with react and pending
    pub fn from_decider<R, P>(decider: Decider<AR, Si, So, Ei, Eo, Err>, react: R, pending: P) -> Self
    where
        R: Fn(&Si, &Ei) -> Vec<A> + Send + Sync + 'static,
        P: Fn(&Si) -> Vec<A> + Send + Sync + 'static,
    {
        Self {
            decider,
            react: Arc::new(react),
            pending: Arc::new(pending),
        }
    }

    /// Decide which events an action result produces in the given state
    pub fn decide(&self, action_result: &AR, state: &Si) -> Result<Vec<Eo>, Err> {
        self.decider.decide(action_result, state)
    }

    /// Apply one event to a state
    pub fn evolve(&self, state: &Si, event: &Ei) -> So {
        self.decider.evolve(state, event)
    }

    /// Actions the event makes ready to execute
    pub fn react(&self, state: &Si, event: &Ei) -> Vec<A> {
        (self.react)(state, event)
    }

    /// Every action still outstanding in this state
    pub fn pending(&self, state: &Si) -> Vec<A> {
        (self.pending)(state)
    }

    /// The seed of the fold
    pub fn initial_state(&self) -> &So {
        self.decider.initial_state()
    }

    /// Borrow the decision half of this process
    pub fn as_decider(&self) -> &Decider<AR, Si, So, Ei, Eo, Err> {
        &self.decider
    }

    /// Drop react and pending, keeping only the decision half
    pub fn into_decider(self) -> Decider<AR, Si, So, Ei, Eo, Err> {
        self.decider
    }
}

impl<AR, Si, So, Ei, Eo, A, Err> Process<AR, Si, So, Ei, Eo, A, Err>
where
    AR: 'static,
    Si: 'static,
    So: 'static,
    Ei: 'static,
    Eo: 'static,
    A: 'static,
    Err: 'static,
{
    /// Change the action result type by pre-applying `f`
    pub fn map_contra_on_action_result<ARn, F>(self, f: F) -> Process<ARn, Si, So, Ei, Eo, A, Err>
    where
        ARn: 'static,
        F: Fn(&ARn) -> AR + Send + Sync + 'static,
    {
        Process {
            decider: self.decider.map_contra_on_command(f),
            react: self.react,
            pending: self.pending,
        }
    }

    /// Change the input event type by pre-applying `f` for evolve and react
    pub fn map_contra_on_event<Ein, F>(self, f: F) -> Process<AR, Si, So, Ein, Eo, A, Err>
    where
        Ein: 'static,
        F: Fn(&Ein) -> Ei + Send + Sync + 'static,
    {
        let to_evolve = Arc::new(f);
        let to_react = Arc::clone(&to_evolve);
        let react = self.react;
        Process {
            decider: self
                .decider
                .map_contra_on_event(move |event: &Ein| to_evolve(event)),
            react: Arc::new(move |state: &Si, event: &Ein| react(state, &to_react(event))),
            pending: self.pending,
        }
    }

    /// Change the output event type by post-applying `f` to decided events
    pub fn map_on_event<Eon, F>(self, f: F) -> Process<AR, Si, So, Ei, Eon, A, Err>
    where
        Eon: 'static,
        F: Fn(Eo) -> Eon + Send + Sync + 'static,
    {
        Process {
            decider: self.decider.map_on_event(f),
            react: self.react,
            pending: self.pending,
        }
    }

    /// Replace the event type pair `(Ei, Eo)` with `(Ein, Eon)`
    pub fn dimap_on_event<Ein, Eon, Fl, Fr>(self, fl: Fl, fr: Fr) -> Process<AR, Si, So, Ein, Eon, A, Err>
    where
        Ein: 'static,
        Eon: 'static,
        Fl: Fn(&Ein) -> Ei + Send + Sync + 'static,
        Fr: Fn(Eo) -> Eon + Send + Sync + 'static,
    {
        self.map_contra_on_event(fl).map_on_event(fr)
    }

    /// Change the input state type by pre-applying `f` for every function
    pub fn map_contra_on_state<Sin, F>(self, f: F) -> Process<AR, Sin, So, Ei, Eo, A, Err>
    where
        Sin: 'static,
        F: Fn(&Sin) -> Si + Send + Sync + 'static,
    {
        let to_decider = Arc::new(f);
        let to_react = Arc::clone(&to_decider);
        let to_pending = Arc::clone(&to_decider);
        let react = self.react;
        let pending = self.pending;
        Process {
            decider: self
                .decider
                .map_contra_on_state(move |state: &Sin| to_decider(state)),
            react: Arc::new(move |state: &Sin, event: &Ei| react(&to_react(state), event)),
            pending: Arc::new(move |state: &Sin| pending(&to_pending(state))),
        }
    }

    /// Change the output state type by post-applying `f`
    pub fn map_on_state<Son, F>(self, f: F) -> Process<AR, Si, Son, Ei, Eo, A, Err>
    where
        Son: 'static,
        F: Fn(So) -> Son + Send + Sync + 'static,
    {
        Process {
            decider: self.decider.map_on_state(f),
            react: self.react,
            pending: self.pending,
        }
    }

    /// Replace the state type pair `(Si, So)` with `(Sin, Son)`
    pub fn dimap_on_state<Sin, Son, Fl, Fr>(self, fl: Fl, fr: Fr) -> Process<AR, Sin, Son, Ei, Eo, A, Err>
    where
        Sin: 'static,
        Son: 'static,
        Fl: Fn(&Sin) -> Si + Send + Sync + 'static,
        Fr: Fn(So) -> Son + Send + Sync + 'static,
    {
        self.map_contra_on_state(fl).map_on_state(fr)
    }

    /// Change the action type by post-applying `f` to react and pending
    pub fn map_on_action<An, F>(self, f: F) -> Process<AR, Si, So, Ei, Eo, An, Err>
    where
        An: 'static,
        F: Fn(A) -> An + Send + Sync + 'static,
    {
        let for_react = Arc::new(f);
        let for_pending = Arc::clone(&for_react);
        let react = self.react;
        let pending = self.pending;
        Process {
            decider: self.decider,
            react: Arc::new(move |state: &Si, event: &Ei| -> Vec<An> {
                react(state, event).into_iter().map(|action| for_react(action)).collect()
            }),
            pending: Arc::new(move |state: &Si| -> Vec<An> {
                pending(state).into_iter().map(|action| for_pending(action)).collect()
            }),
        }
    }

    /// Change the error type
    pub fn map_error<Err2, F>(self, f: F) -> Process<AR, Si, So, Ei, Eo, A, Err2>
    where
        Err2: 'static,
        F: Fn(Err) -> Err2 + Send + Sync + 'static,
    {
        Process {
            decider: self.decider.map_error(f),
            react: self.react,
            pending: self.pending,
        }
    }

    /// Applicative apply on the output state
    ///
    /// Decisions combine as in [`Decider::apply_on_state`]. Reactions and
    /// backlogs of both processes are concatenated, this one first.
    pub fn apply_on_state<Son>(
        self,
        ff: Process<AR, Si, StateMapper<So, Son>, Ei, Eo, A, Err>,
    ) -> Process<AR, Si, Son, Ei, Eo, A, Err>
    where
        Son: 'static,
    {
        let react = self.react;
        let ff_react = ff.react;
        let pending = self.pending;
        let ff_pending = ff.pending;
        Process {
            decider: self.decider.apply_on_state(ff.decider),
            react: Arc::new(move |state: &Si, event: &Ei| -> Vec<A> {
                let mut actions = react(state, event);
                actions.extend(ff_react(state, event));
                actions
            }),
            pending: Arc::new(move |state: &Si| -> Vec<A> {
                let mut actions = pending(state);
                actions.extend(ff_pending(state));
                actions
            }),
        }
    }

    /// Run two processes side by side over the same input, merging the output states
    pub fn product_on_state<So2, Sm>(
        self,
        other: Process<AR, Si, So2, Ei, Eo, A, Err>,
    ) -> Process<AR, Si, Sm, Ei, Eo, A, Err>
    where
        So2: Clone + Send + Sync + 'static,
        Sm: Merge<So, So2> + 'static,
    {
        let ff = other.map_on_state(|right: So2| -> StateMapper<So, Sm> {
            Arc::new(move |left: So| Sm::merge(left, right.clone()))
        });
        self.apply_on_state(ff)
    }

    /// [`Process::product_on_state`] into a pair
    pub fn product_via_tuples_on_state<So2>(
        self,
        other: Process<AR, Si, So2, Ei, Eo, A, Err>,
    ) -> Process<AR, Si, (So, So2), Ei, Eo, A, Err>
    where
        So2: Clone + Send + Sync + 'static,
    {
        self.product_on_state(other)
    }

    /// Combine with another process over the union of both vocabularies
    ///
    /// Decisions combine as in [`Decider::combine`]. `react` is routed to the
    /// side owning the event; `pending` is the left backlog followed by the
    /// right backlog.
    #[allow(clippy::type_complexity)]
    pub fn combine<AR2, Si2, So2, Ei2, Eo2, A2, Sin, Son>(
        self,
        other: Process<AR2, Si2, So2, Ei2, Eo2, A2, Err>,
    ) -> Process<Either<AR, AR2>, Sin, Son, Either<Ei, Ei2>, Either<Eo, Eo2>, Either<A, A2>, Err>
    where
        Si: Clone + Into<So>,
        AR2: 'static,
        Si2: Clone + Into<So2> + 'static,
        So2: Clone + Send + Sync + 'static,
        Ei2: 'static,
        Eo2: 'static,
        A2: 'static,
        Sin: Split<Si, Si2> + 'static,
        Son: Merge<So, So2> + 'static,
    {
        let react_left = self.react;
        let react_right = other.react;
        let pending_left = self.pending;
        let pending_right = other.pending;
        Process {
            decider: self.decider.combine(other.decider),
            react: Arc::new(
                move |state: &Sin, event: &Either<Ei, Ei2>| -> Vec<Either<A, A2>> {
                    match event {
                        Either::Left(event) => react_left(&Split::<Si, Si2>::left(state), event)
                            .into_iter()
                            .map(Either::Left)
                            .collect(),
                        Either::Right(event) => react_right(&Split::<Si, Si2>::right(state), event)
                            .into_iter()
                            .map(Either::Right)
                            .collect(),
                    }
                },
            ),
            pending: Arc::new(move |state: &Sin| -> Vec<Either<A, A2>> {
                let mut actions: Vec<Either<A, A2>> = pending_left(&Split::<Si, Si2>::left(state))
                    .into_iter()
                    .map(Either::Left)
                    .collect();
                actions.extend(
                    pending_right(&Split::<Si, Si2>::right(state))
                        .into_iter()
                        .map(Either::Right),
                );
                actions
            }),
        }
    }

    /// [`Process::combine`] with the merged state held as a pair
    #[allow(clippy::type_complexity)]
    pub fn combine_via_tuples<AR2, Si2, So2, Ei2, Eo2, A2>(
        self,
        other: Process<AR2, Si2, So2, Ei2, Eo2, A2, Err>,
    ) -> Process<Either<AR, AR2>, (Si, Si2), (So, So2), Either<Ei, Ei2>, Either<Eo, Eo2>, Either<A, A2>, Err>
    where
        Si: Clone + Into<So>,
        AR2: 'static,
        Si2: Clone + Into<So2> + 'static,
        So2: Clone + Send + Sync + 'static,
        Ei2: 'static,
        Eo2: 'static,
        A2: 'static,
    {
        self.combine(other)
    }
}

/// Process whose input and output states coincide
pub struct DcbProcess<AR, S, Ei, Eo, A, Err>(Process<AR, S, S, Ei, Eo, A, Err>);

impl<AR, S: Clone, Ei, Eo, A, Err> Clone for DcbProcess<AR, S, Ei, Eo, A, Err> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<AR, S, Ei, Eo, A, Err> fmt::Debug for DcbProcess<AR, S, Ei, Eo, A, Err> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dcb{:?}", self.0)
    }
}

impl<AR, S, Ei, Eo, A, Err> From<Process<AR, S, S, Ei, Eo, A, Err>> for DcbProcess<AR, S, Ei, Eo, A, Err> {
    fn from(process: Process<AR, S, S, Ei, Eo, A, Err>) -> Self {
        Self(process)
    }
}

impl<AR, S, Ei, Eo, A, Err> DcbProcess<AR, S, Ei, Eo, A, Err> {
    /// Create a process from its four functions and initial state
    pub fn new<D, F, R, P>(decide: D, evolve: F, react: R, pending: P, initial_state: S) -> Self
    where
        D: Fn(&AR, &S) -> Result<Vec<Eo>, Err> + Send + Sync + 'static,
        F: Fn(&S, &Ei) -> S + Send + Sync + 'static,
        R: Fn(&S, &Ei) -> Vec<A> + Send + Sync + 'static,
        P: Fn(&S) -> Vec<A> + Send + Sync + 'static,
    {
        Self(Process::new(decide, evolve, react, pending, initial_state))
    }

    /// Decide which events an action result produces in the given state
    pub fn decide(&self, action_result: &AR, state: &S) -> Result<Vec<Eo>, Err> {
        self.0.decide(action_result, state)
    }

    /// Apply one event to a state
    pub fn evolve(&self, state: &S, event: &Ei) -> S {
        self.0.evolve(state, event)
    }

    /// Actions the event makes ready to execute
    pub fn react(&self, state: &S, event: &Ei) -> Vec<A> {
        self.0.react(state, event)
    }

    /// Every action still outstanding in this state
    pub fn pending(&self, state: &S) -> Vec<A> {
        self.0.pending(state)
    }

    /// The seed of the fold
    pub fn initial_state(&self) -> &S {
        self.0.initial_state()
    }

    /// Borrow the underlying generic process
    pub fn as_process(&self) -> &Process<AR, S, S, Ei, Eo, A, Err> {
        &self.0
    }

    /// Unwrap into the underlying generic process
    pub fn into_process(self) -> Process<AR, S, S, Ei, Eo, A, Err> {
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

impl<AR, S, Ei, Eo, A, Err> DcbProcess<AR, S, Ei, Eo, A, Err>
where
    AR: 'static,
    S: 'static,
    Ei: 'static,
    Eo: 'static,
    A: 'static,
    Err: 'static,
{
    /// Change the action result type by pre-applying `f`
    pub fn map_contra_on_action_result<ARn, F>(self, f: F) -> DcbProcess<ARn, S, Ei, Eo, A, Err>
    where
        ARn: 'static,
        F: Fn(&ARn) -> AR + Send + Sync + 'static,
    {
        DcbProcess(self.0.map_contra_on_action_result(f))
    }

    /// Change the input event type by pre-applying `f` for evolve and react
    pub fn map_contra_on_event<Ein, F>(self, f: F) -> DcbProcess<AR, S, Ein, Eo, A, Err>
    where
        Ein: 'static,
        F: Fn(&Ein) -> Ei + Send + Sync + 'static,
    {
        DcbProcess(self.0.map_contra_on_event(f))
    }

    /// Change the output event type by post-applying `f` to decided events
    pub fn map_on_event<Eon, F>(self, f: F) -> DcbProcess<AR, S, Ei, Eon, A, Err>
    where
        Eon: 'static,
        F: Fn(Eo) -> Eon + Send + Sync + 'static,
    {
        DcbProcess(self.0.map_on_event(f))
    }

    /// Replace the event type pair `(Ei, Eo)` with `(Ein, Eon)`
    pub fn dimap_on_event<Ein, Eon, Fl, Fr>(self, fl: Fl, fr: Fr) -> DcbProcess<AR, S, Ein, Eon, A, Err>
    where
        Ein: 'static,
        Eon: 'static,
        Fl: Fn(&Ein) -> Ei + Send + Sync + 'static,
        Fr: Fn(Eo) -> Eon + Send + Sync + 'static,
    {
        DcbProcess(self.0.dimap_on_event(fl, fr))
    }

    /// Present the state as another type
    pub fn dimap_on_state<Sn, Fl, Fr>(self, fl: Fl, fr: Fr) -> DcbProcess<AR, Sn, Ei, Eo, A, Err>
    where
        Sn: 'static,
        Fl: Fn(&Sn) -> S + Send + Sync + 'static,
        Fr: Fn(S) -> Sn + Send + Sync + 'static,
    {
        DcbProcess(self.0.dimap_on_state(fl, fr))
    }

    /// Change the action type by post-applying `f`
    pub fn map_on_action<An, F>(self, f: F) -> DcbProcess<AR, S, Ei, Eo, An, Err>
    where
        An: 'static,
        F: Fn(A) -> An + Send + Sync + 'static,
    {
        DcbProcess(self.0.map_on_action(f))
    }

    /// Change the error type
    pub fn map_error<Err2, F>(self, f: F) -> DcbProcess<AR, S, Ei, Eo, A, Err2>
    where
        Err2: 'static,
        F: Fn(Err) -> Err2 + Send + Sync + 'static,
    {
        DcbProcess(self.0.map_error(f))
    }

    /// Run two processes over the same inputs into one merged state
    ///
    /// Reactions and backlogs are concatenated, this process first.
    pub fn product_on_state<S2, Sn>(self, other: DcbProcess<AR, S2, Ei, Eo, A, Err>) -> DcbProcess<AR, Sn, Ei, Eo, A, Err>
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
        DcbProcess(left.product_on_state(right))
    }

    /// [`DcbProcess::product_on_state`] into a pair
    pub fn product_via_tuples_on_state<S2>(
        self,
        other: DcbProcess<AR, S2, Ei, Eo, A, Err>,
    ) -> DcbProcess<AR, (S, S2), Ei, Eo, A, Err>
    where
        S: Clone,
        S2: Clone + Send + Sync + 'static,
    {
        self.product_on_state(other)
    }

    /// Combine with another process, merging both states into `Sn`
    #[allow(clippy::type_complexity)]
    pub fn combine<AR2, S2, Ei2, Eo2, A2, Sn>(
        self,
        other: DcbProcess<AR2, S2, Ei2, Eo2, A2, Err>,
    ) -> DcbProcess<Either<AR, AR2>, Sn, Either<Ei, Ei2>, Either<Eo, Eo2>, Either<A, A2>, Err>
    where
        S: Clone,
        AR2: 'static,
        S2: Clone + Send + Sync + 'static,
        Ei2: 'static,
        Eo2: 'static,
        A2: 'static,
        Sn: Split<S, S2> + Merge<S, S2> + 'static,
    {
        DcbProcess(self.0.combine(other.0))
    }

    /// Combine with another process, holding both states as a pair
    #[allow(clippy::type_complexity)]
    pub fn combine_via_tuples<AR2, S2, Ei2, Eo2, A2>(
        self,
        other: DcbProcess<AR2, S2, Ei2, Eo2, A2, Err>,
    ) -> DcbProcess<Either<AR, AR2>, (S, S2), Either<Ei, Ei2>, Either<Eo, Eo2>, Either<A, A2>, Err>
    where
        S: Clone,
        AR2: 'static,
        S2: Clone + Send + Sync + 'static,
        Ei2: 'static,
        Eo2: 'static,
        A2: 'static,
    {
        self.combine(other)
    }
}

impl<AR, S: Clone, Ei, Eo, A, Err> EventComputation<AR, S, Ei, Eo, Err> for DcbProcess<AR, S, Ei, Eo, A, Err> {
    fn compute_new_events(&self, history: &[Ei], action_result: &AR) -> Result<Vec<Eo>, Err> {
        trace!(history_len = history.len(), "replaying process history");
        let state = self.fold_history(history);
        log_decision(self.decide(action_result, &state))
    }
}

/// Process whose states and events both coincide
pub struct AggregateProcess<AR, S, E, A, Err>(DcbProcess<AR, S, E, E, A, Err>);

impl<AR, S: Clone, E, A, Err> Clone for AggregateProcess<AR, S, E, A, Err> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<AR, S, E, A, Err> fmt::Debug for AggregateProcess<AR, S, E, A, Err> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Aggregate{:?}", self.0.as_process())
    }
}

impl<AR, S, E, A, Err> From<DcbProcess<AR, S, E, E, A, Err>> for AggregateProcess<AR, S, E, A, Err> {
    fn from(process: DcbProcess<AR, S, E, E, A, Err>) -> Self {
        Self(process)
    }
}

impl<AR, S, E, A, Err> From<Process<AR, S, S, E, E, A, Err>> for AggregateProcess<AR, S, E, A, Err> {
    fn from(process: Process<AR, S, S, E, E, A, Err>) -> Self {
        Self(DcbProcess(process))
    }
}

impl<AR, S, E, A, Err> AggregateProcess<AR, S, E, A, Err> {
    /// Create a process from its four functions and initial state
    pub fn new<D, F, R, P>(decide: D, evolve: F, react: R, pending: P, initial_state: S) -> Self
    where
        D: Fn(&AR, &S) -> Result<Vec<E>, Err> + Send + Sync + 'static,
        F: Fn(&S, &E) -> S + Send + Sync + 'static,
        R: Fn(&S, &E) -> Vec<A> + Send + Sync + 'static,
        P: Fn(&S) -> Vec<A> + Send + Sync + 'static,
    {
        Self(DcbProcess::new(decide, evolve, react, pending, initial_state))
    }

    /// Decide which events an action result produces in the given state
    pub fn decide(&self, action_result: &AR, state: &S) -> Result<Vec<E>, Err> {
        self.0.decide(action_result, state)
    }

    /// Apply one event to a state
    pub fn evolve(&self, state: &S, event: &E) -> S {
        self.0.evolve(state, event)
    }

    /// Actions the event makes ready to execute
    pub fn react(&self, state: &S, event: &E) -> Vec<A> {
        self.0.react(state, event)
    }

    /// Every action still outstanding in this state
    pub fn pending(&self, state: &S) -> Vec<A> {
        self.0.pending(state)
    }

    /// The seed of the fold
    pub fn initial_state(&self) -> &S {
        self.0.initial_state()
    }

    /// Borrow the underlying generic process
    pub fn as_process(&self) -> &Process<AR, S, S, E, E, A, Err> {
        self.0.as_process()
    }

    /// Relax to the event-sourced level
    pub fn into_dcb(self) -> DcbProcess<AR, S, E, E, A, Err> {
        self.0
    }

    /// Unwrap into the underlying generic process
    pub fn into_process(self) -> Process<AR, S, S, E, E, A, Err> {
        self.0.into_process()
    }

    /// Rebuild the state from an ordered history, oldest first
    pub fn fold_history(&self, history: &[E]) -> S
    where
        S: Clone,
    {
        self.0.fold_history(history)
    }
}

impl<AR, S, E, A, Err> AggregateProcess<AR, S, E, A, Err>
where
    AR: 'static,
    S: 'static,
    E: 'static,
    A: 'static,
    Err: 'static,
{
    /// Change the action result type by pre-applying `f`
    pub fn map_contra_on_action_result<ARn, F>(self, f: F) -> AggregateProcess<ARn, S, E, A, Err>
    where
        ARn: 'static,
        F: Fn(&ARn) -> AR + Send + Sync + 'static,
    {
        AggregateProcess(self.0.map_contra_on_action_result(f))
    }

    /// Present the events as another type through a pair of conversions
    pub fn dimap_on_event<En, Fl, Fr>(self, fl: Fl, fr: Fr) -> AggregateProcess<AR, S, En, A, Err>
    where
        En: 'static,
        Fl: Fn(&En) -> E + Send + Sync + 'static,
        Fr: Fn(E) -> En + Send + Sync + 'static,
    {
        AggregateProcess(self.0.dimap_on_event(fl, fr))
    }

    /// Present the state as another type
    pub fn dimap_on_state<Sn, Fl, Fr>(self, fl: Fl, fr: Fr) -> AggregateProcess<AR, Sn, E, A, Err>
    where
        Sn: 'static,
        Fl: Fn(&Sn) -> S + Send + Sync + 'static,
        Fr: Fn(S) -> Sn + Send + Sync + 'static,
    {
        AggregateProcess(self.0.dimap_on_state(fl, fr))
    }

    /// Change the action type by post-applying `f`
    pub fn map_on_action<An, F>(self, f: F) -> AggregateProcess<AR, S, E, An, Err>
    where
        An: 'static,
        F: Fn(A) -> An + Send + Sync + 'static,
    {
        AggregateProcess(self.0.map_on_action(f))
    }

    /// Change the error type
    pub fn map_error<Err2, F>(self, f: F) -> AggregateProcess<AR, S, E, A, Err2>
    where
        Err2: 'static,
        F: Fn(Err) -> Err2 + Send + Sync + 'static,
    {
        AggregateProcess(self.0.map_error(f))
    }

    /// Run two processes over the same inputs into one merged state
    pub fn product_on_state<S2, Sn>(self, other: AggregateProcess<AR, S2, E, A, Err>) -> AggregateProcess<AR, Sn, E, A, Err>
    where
        S2: Clone + Send + Sync + 'static,
        Sn: Split<S, S2> + Merge<S, S2> + 'static,
    {
        AggregateProcess(self.0.product_on_state(other.0))
    }

    /// [`AggregateProcess::product_on_state`] into a pair
    pub fn product_via_tuples_on_state<S2>(
        self,
        other: AggregateProcess<AR, S2, E, A, Err>,
    ) -> AggregateProcess<AR, (S, S2), E, A, Err>
    where
        S: Clone,
        S2: Clone + Send + Sync + 'static,
    {
        self.product_on_state(other)
    }

    /// Combine with another process, merging both states into `Sn`
    #[allow(clippy::type_complexity)]
    pub fn combine<AR2, S2, E2, A2, Sn>(
        self,
        other: AggregateProcess<AR2, S2, E2, A2, Err>,
    ) -> AggregateProcess<Either<AR, AR2>, Sn, Either<E, E2>, Either<A, A2>, Err>
    where
        S: Clone,
        AR2: 'static,
        S2: Clone + Send + Sync + 'static,
        E2: 'static,
        A2: 'static,
        Sn: Split<S, S2> + Merge<S, S2> + 'static,
    {
        AggregateProcess(self.0.combine(other.0))
    }

    /// Combine with another process, holding both states as a pair
    #[allow(clippy::type_complexity)]
    pub fn combine_via_tuples<AR2, S2, E2, A2>(
        self,
        other: AggregateProcess<AR2, S2, E2, A2, Err>,
    ) -> AggregateProcess<Either<AR, AR2>, (S, S2), Either<E, E2>, Either<A, A2>, Err>
    where
        S: Clone,
        AR2: 'static,
        S2: Clone + Send + Sync + 'static,
        E2: 'static,
        A2: 'static,
    {
        self.combine(other)
    }
}

impl<AR, S: Clone, E, A, Err> EventComputation<AR, S, E, E, Err> for AggregateProcess<AR, S, E, A, Err> {
    fn compute_new_events(&self, history: &[E], action_result: &AR) -> Result<Vec<E>, Err> {
        self.0.compute_new_events(history, action_result)
    }
}

impl<AR, S: Clone, E, A, Err> StateComputation<AR, S, E, Err> for AggregateProcess<AR, S, E, A, Err> {
    fn compute_new_state(&self, state: &S, action_result: &AR) -> Result<S, Err> {
        let events = log_decision(self.decide(action_result, state))?;
        Ok(fold_events(
            |state, event| self.evolve(state, event),
            state.clone(),
            &events,
        ))
    }
}
