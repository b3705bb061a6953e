// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for the application boundary
//!
//! Components never wrap the errors their `decide` functions return. Only the
//! orchestrators in [`crate::application`] need to tell a rejected decision
//! apart from a failing repository or publisher, and they do it here.

use std::convert::Infallible;

use thiserror::Error;

/// Errors surfaced while handling a command at the application boundary
///
/// `P` is the action transport's error; orchestrators that publish nothing
/// leave it at [`Infallible`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError<D, R, P = Infallible> {
    /// The decider rejected the command
    #[error("decision rejected: {0}")]
    Decision(D),

    /// Loading or saving failed
    #[error("repository error: {0}")]
    Repository(R),

    /// Events were saved but the actions they made ready could not be published
    #[error("publish error: {0}")]
    Publish(P),
}

impl<D, R, P> ApplicationError<D, R, P> {
    /// Whether the failure came from the domain rather than infrastructure
    pub fn is_decision(&self) -> bool {
        matches!(self, ApplicationError::Decision(_))
    }

    /// Whether the events were committed before the failure
    pub fn is_publish(&self) -> bool {
        matches!(self, ApplicationError::Publish(_))
    }
}

/// Result type for application operations
pub type ApplicationResult<T, D, R, P = Infallible> = Result<T, ApplicationError<D, R, P>>;
