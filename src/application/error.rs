//! Errors surfaced by application operations.

use thiserror::Error;

use crate::domain::ClientError;
use crate::infrastructure::RepositoryError;

/// Failure of a query or workflow.
///
/// Caller mistakes and store failures are kept apart so the API edge can map
/// them to different status codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
