// Copyright (c) 2025 - Cowboy AI, Inc.
//! View and Projection - Pure Event Handling
//!
//! A view evolves state from events and makes no decisions. It is the read
//! side of CQRS: a denormalized state built by folding events.
//!
//! ```text
//! (Si, E) ──evolve──> So          initial_state: So
//! ```
//!
//! # Refinement
//!
//! - [`View<Si, So, E>`]: input and output state types are independent. This
//!   is the form all combinators are written against.
//! - [`Projection<S, E>`]: input state = output state, so events can be
//!   folded. Adds [`Projection::fold_history`] and
//!   [`Projection::compute_new_state`].
//!
//! # Laws
//!
//! ```text
//! dimap_on_state(id, id)                   = id
//! map_contra_on_event(f).map_contra_on_event(g) = map_contra_on_event(f . g)
//! ```
//!
//! # Unknown events
//!
//! Events are closed enums matched exhaustively. An evolve function that has
//! nothing to do for a variant returns the state unchanged from that arm.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::computation::fold_events;
use crate::either::Either;
use crate::merge::{Merge, Split};
use crate::{EvolveFn, StateMapper};

/// Generic view with independent input and output state types
pub struct View<Si, So, E> {
    evolve: EvolveFn<Si, E, So>,
    initial_state: So,
}

impl<Si, So: Clone, E> Clone for View<Si, So, E> {
    fn clone(&self) -> Self {
        Self {
            evolve: Arc::clone(&self.evolve),
            initial_state: self.initial_state.clone(),
        }
    }
}

impl<Si, So, E> fmt::Debug for View<Si, So, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "View<{}, {}, {}>",
            std::any::type_name::<Si>(),
            std::any::type_name::<So>(),
            std::any::type_name::<E>()
        )
    }
}

impl<Si, So, E> View<Si, So, E> {
    /// Create a view from an evolve function and an initial state
    pub fn new<F>(evolve: F, initial_state: So) -> Self
    where
        F: Fn(&Si, &E) -> So + Send + Sync + 'static,
    {
        Self {
            evolve: Arc::new(evolve),
            initial_state,
        }
    }

    /// Apply one event to a state
    pub fn evolve(&self, state: &Si, event: &E) -> So {
        (self.evolve)(state, event)
    }

    /// The seed of the fold
    pub fn initial_state(&self) -> &So {
        &self.initial_state
    }
}

impl<Si: 'static, So: 'static, E: 'static> View<Si, So, E> {
    /// Change the event type by pre-applying `f`
    pub fn map_contra_on_event<En, F>(self, f: F) -> View<Si, So, En>
    where
        En: 'static,
        F: Fn(&En) -> E + Send + Sync + 'static,
    {
        let evolve = self.evolve;
        View::new(
            move |state: &Si, event: &En| evolve(state, &f(event)),
            self.initial_state,
        )
    }

    /// Change the input state type by pre-applying `f`
    pub fn map_contra_on_state<Sin, F>(self, f: F) -> View<Sin, So, E>
    where
        Sin: 'static,
        F: Fn(&Sin) -> Si + Send + Sync + 'static,
    {
        let evolve = self.evolve;
        View::new(
            move |state: &Sin, event: &E| evolve(&f(state), event),
            self.initial_state,
        )
    }

    /// Change the output state type by post-applying `f`
    ///
    /// The initial state is transformed once, here.
    pub fn map_on_state<Son, F>(self, f: F) -> View<Si, Son, E>
    where
        Son: 'static,
        F: Fn(So) -> Son + Send + Sync + 'static,
    {
        let initial_state = f(self.initial_state);
        let evolve = self.evolve;
        View::new(
            move |state: &Si, event: &E| f(evolve(state, event)),
            initial_state,
        )
    }

    /// Replace the state type pair `(Si, So)` with `(Sin, Son)`
    pub fn dimap_on_state<Sin, Son, Fl, Fr>(self, fl: Fl, fr: Fr) -> View<Sin, Son, E>
    where
        Sin: 'static,
        Son: 'static,
        Fl: Fn(&Sin) -> Si + Send + Sync + 'static,
        Fr: Fn(So) -> Son + Send + Sync + 'static,
    {
        self.map_contra_on_state(fl).map_on_state(fr)
    }

    /// Applicative apply on the output state
    ///
    /// `ff` evolves to a function which is applied to this view's evolved
    /// state. Initial states combine the same way.
    pub fn apply_on_state<Son>(self, ff: View<Si, StateMapper<So, Son>, E>) -> View<Si, Son, E>
    where
        Son: 'static,
    {
        let initial_state = (ff.initial_state)(self.initial_state);
        let evolve = self.evolve;
        let ff_evolve = ff.evolve;
        View::new(
            move |state: &Si, event: &E| ff_evolve(state, event)(evolve(state, event)),
            initial_state,
        )
    }

    /// Run two views side by side over the same input, merging the outputs
    pub fn product_on_state<So2, Sm>(self, other: View<Si, So2, E>) -> View<Si, Sm, E>
    where
        So2: Clone + Send + Sync + 'static,
        Sm: Merge<So, So2> + 'static,
    {
        let ff = other.map_on_state(|right: So2| -> StateMapper<So, Sm> {
            Arc::new(move |left: So| Sm::merge(left, right.clone()))
        });
        self.apply_on_state(ff)
    }

    /// [`View::product_on_state`] into a pair
    pub fn product_via_tuples_on_state<So2>(self, other: View<Si, So2, E>) -> View<Si, (So, So2), E>
    where
        So2: Clone + Send + Sync + 'static,
    {
        self.product_on_state(other)
    }

    /// Combine with another view into one over the union of both event types
    ///
    /// Each side only sees its own events and its own slice of the merged
    /// state; a foreign event leaves that side's slice unchanged.
    pub fn combine<Si2, So2, E2, Sin, Son>(
        self,
        other: View<Si2, So2, E2>,
    ) -> View<Sin, Son, Either<E, E2>>
    where
        Si: Clone + Into<So>,
        Si2: Clone + Into<So2> + 'static,
        So2: Clone + Send + Sync + 'static,
        E2: 'static,
        Sin: Split<Si, Si2> + 'static,
        Son: Merge<So, So2> + 'static,
    {
        let left = self
            .lift_left::<E2>()
            .map_contra_on_state(|state: &Sin| Split::<Si, Si2>::left(state));
        let right = other
            .lift_right::<E>()
            .map_contra_on_state(|state: &Sin| Split::<Si, Si2>::right(state));
        left.product_on_state(right)
    }

    /// [`View::combine`] with the merged state held as a pair
    pub fn combine_via_tuples<Si2, So2, E2>(
        self,
        other: View<Si2, So2, E2>,
    ) -> View<(Si, Si2), (So, So2), Either<E, E2>>
    where
        Si: Clone + Into<So>,
        Si2: Clone + Into<So2> + 'static,
        So2: Clone + Send + Sync + 'static,
        E2: 'static,
    {
        self.combine(other)
    }

    fn lift_left<E2: 'static>(self) -> View<Si, So, Either<E, E2>>
    where
        Si: Clone + Into<So>,
    {
        let evolve = self.evolve;
        View::new(
            move |state: &Si, event: &Either<E, E2>| match event {
                Either::Left(event) => evolve(state, event),
                Either::Right(_) => state.clone().into(),
            },
            self.initial_state,
        )
    }

    fn lift_right<E1: 'static>(self) -> View<Si, So, Either<E1, E>>
    where
        Si: Clone + Into<So>,
    {
        let evolve = self.evolve;
        View::new(
            move |state: &Si, event: &Either<E1, E>| match event {
                Either::Left(_) => state.clone().into(),
                Either::Right(event) => evolve(state, event),
            },
            self.initial_state,
        )
    }
}

/// View whose input and output states coincide, so events can be folded
pub struct Projection<S, E>(View<S, S, E>);

impl<S: Clone, E> Clone for Projection<S, E> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<S, E> fmt::Debug for Projection<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Projection<{}, {}>",
            std::any::type_name::<S>(),
            std::any::type_name::<E>()
        )
    }
}

impl<S, E> From<View<S, S, E>> for Projection<S, E> {
    fn from(view: View<S, S, E>) -> Self {
        Self(view)
    }
}

impl<S, E> Projection<S, E> {
    /// Create a projection from an evolve function and an initial state
    pub fn new<F>(evolve: F, initial_state: S) -> Self
    where
        F: Fn(&S, &E) -> S + Send + Sync + 'static,
    {
        Self(View::new(evolve, initial_state))
    }

    /// Apply one event to a state
    pub fn evolve(&self, state: &S, event: &E) -> S {
        self.0.evolve(state, event)
    }

    /// The seed of the fold
    pub fn initial_state(&self) -> &S {
        self.0.initial_state()
    }

    /// Borrow the underlying generic view
    pub fn as_view(&self) -> &View<S, S, E> {
        &self.0
    }

    /// Unwrap into the underlying generic view
    pub fn into_view(self) -> View<S, S, E> {
        self.0
    }

    /// Fold events onto a stored view state
    pub fn compute_new_state(&self, state: &S, events: &[E]) -> S
    where
        S: Clone,
    {
        trace!(events = events.len(), "projecting events");
        fold_events(|state, event| self.evolve(state, event), state.clone(), events)
    }

    /// Rebuild the view state from a full history, starting at the initial state
    pub fn fold_history(&self, events: &[E]) -> S
    where
        S: Clone,
    {
        self.compute_new_state(self.initial_state(), events)
    }
}

impl<S: 'static, E: 'static> Projection<S, E> {
    /// Change the event type by pre-applying `f`
    pub fn map_contra_on_event<En, F>(self, f: F) -> Projection<S, En>
    where
        En: 'static,
        F: Fn(&En) -> E + Send + Sync + 'static,
    {
        Projection(self.0.map_contra_on_event(f))
    }

    /// Present the state as another type through an isomorphism-like pair
    pub fn dimap_on_state<Sn, Fl, Fr>(self, fl: Fl, fr: Fr) -> Projection<Sn, E>
    where
        Sn: 'static,
        Fl: Fn(&Sn) -> S + Send + Sync + 'static,
        Fr: Fn(S) -> Sn + Send + Sync + 'static,
    {
        Projection(self.0.dimap_on_state(fl, fr))
    }

    /// Run two projections over the same events into one merged state
    pub fn product_on_state<S2, Sn>(self, other: Projection<S2, E>) -> Projection<Sn, E>
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
        Projection(left.product_on_state(right))
    }

    /// [`Projection::product_on_state`] into a pair
    pub fn product_via_tuples_on_state<S2>(self, other: Projection<S2, E>) -> Projection<(S, S2), E>
    where
        S: Clone,
        S2: Clone + Send + Sync + 'static,
    {
        self.product_on_state(other)
    }

    /// Combine into one projection over the union of both event types
    pub fn combine<S2, E2, Sn>(self, other: Projection<S2, E2>) -> Projection<Sn, Either<E, E2>>
    where
        S: Clone,
        S2: Clone + Send + Sync + 'static,
        E2: 'static,
        Sn: Split<S, S2> + Merge<S, S2> + 'static,
    {
        Projection(self.0.combine(other.0))
    }

    /// [`Projection::combine`] with the merged state held as a pair
    pub fn combine_via_tuples<S2, E2>(self, other: Projection<S2, E2>) -> Projection<(S, S2), Either<E, E2>>
    where
        S: Clone,
        S2: Clone + Send + Sync + 'static,
        E2: 'static,
    {
        self.combine(other)
    }
}
