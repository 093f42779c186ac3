//! Caller-input errors raised while validating client operations.

use lambars::control::Either;
use thiserror::Error;

use super::ClientId;

/// Rejections of caller-supplied identifiers, statuses and priorities.
///
/// None of these are fatal: each maps to a `400 Bad Request` at the API edge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The identifier does not start with an integer.
    #[error("invalid client identifier: {0:?}")]
    InvalidIdentifier(String),

    /// The identifier is well formed but no client carries it.
    #[error("client {0} not found")]
    IdentifierNotFound(ClientId),

    /// The priority is not numeric.
    #[error("invalid priority: {0}")]
    InvalidPriority(String),

    /// The status is not one of `backlog`, `in-progress`, `complete`.
    #[error("invalid status: {0:?}")]
    InvalidStatus(String),
}

/// Outcome of a pure validation step: `Left` carries the rejection.
pub type ClientResult<T> = Either<ClientError, T>;
