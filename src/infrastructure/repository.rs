//! Persistence port for client records.
//!
//! The service only needs point lookups, two kinds of filtered scans and
//! single-row updates. Every method is one statement against the store; no
//! method opens a transaction, so a multi-step workflow is a sequence of
//! independent writes.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Client, ClientId, ClientStatus, Priority};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The store rejected or failed a statement.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A stored row could not be turned into a client record.
    #[error("Decode error: {0}")]
    DecodeError(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        Self::DatabaseError(error.to_string())
    }
}

// =============================================================================
// Client Repository
// =============================================================================

/// Repository trait for client records.
///
/// Scans return rows in store-native order unless the method name says
/// otherwise.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Finds a client by its identifier.
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, RepositoryError>;

    /// Lists every client.
    async fn list(&self) -> Result<Vec<Client>, RepositoryError>;

    /// Lists the clients of one status group.
    async fn list_by_status(&self, status: ClientStatus) -> Result<Vec<Client>, RepositoryError>;

    /// Lists the clients of one status group, ascending by priority.
    ///
    /// Clients with equal priorities come back in store-native order.
    async fn list_by_status_ordered_by_priority(
        &self,
        status: ClientStatus,
    ) -> Result<Vec<Client>, RepositoryError>;

    /// Overwrites the status of one client.
    async fn update_status(
        &self,
        id: ClientId,
        status: ClientStatus,
    ) -> Result<(), RepositoryError>;

    /// Overwrites the priority of one client.
    async fn update_priority(&self, id: ClientId, priority: Priority)
    -> Result<(), RepositoryError>;

    /// Releases the underlying store handle.
    ///
    /// Called once, after the server stopped accepting requests.
    async fn close(&self) {}
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn repository_error_display() {
        let error = RepositoryError::DatabaseError("no such table: clients".to_string());
        assert_eq!(format!("{error}"), "Database error: no such table: clients");

        let error = RepositoryError::DecodeError("column `status` is NULL".to_string());
        assert_eq!(format!("{error}"), "Decode error: column `status` is NULL");
    }

    #[rstest]
    fn sqlx_errors_become_database_errors() {
        let error: RepositoryError = sqlx::Error::RowNotFound.into();
        assert!(matches!(error, RepositoryError::DatabaseError(_)));
    }
}
