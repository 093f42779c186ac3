//! In-memory client repository.
//!
//! Clients are kept in a `Vec` behind a `tokio::sync::RwLock`; insertion order
//! is the store-native order. Used by tests and by `STORAGE_MODE=in_memory`.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Client, ClientId, ClientStatus, Priority};
use crate::infrastructure::{ClientRepository, RepositoryError};

/// In-memory implementation of `ClientRepository`.
///
/// # Example
///
/// ```ignore
/// let repository = InMemoryClientRepository::with_clients(vec![
///     Client::new(ClientId::new(1), ClientStatus::Backlog, Priority::Ordinal(1)),
/// ]);
/// let found = repository.find_by_id(ClientId::new(1)).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryClientRepository {
    clients: Arc<RwLock<Vec<Client>>>,
}

impl InMemoryClientRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding `clients`, in that order.
    #[must_use]
    pub fn with_clients(clients: Vec<Client>) -> Self {
        Self {
            clients: Arc::new(RwLock::new(clients)),
        }
    }

    /// Creates a repository from a JSON array of client records.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DecodeError` if the document is not an array of
    /// records with a valid `id`, `status` and `priority`.
    pub fn from_json(document: &str) -> Result<Self, RepositoryError> {
        let clients: Vec<Client> = serde_json::from_str(document)
            .map_err(|error| RepositoryError::DecodeError(error.to_string()))?;
        Ok(Self::with_clients(clients))
    }

    /// Returns a copy of every stored client.
    pub async fn snapshot(&self) -> Vec<Client> {
        self.clients.read().await.clone()
    }

    async fn modify(
        &self,
        id: ClientId,
        change: impl FnOnce(&mut Client) + Send,
    ) -> Result<(), RepositoryError> {
        let mut clients = self.clients.write().await;
        // A missing row is a no-op, like an UPDATE matching nothing.
        if let Some(client) = clients.iter_mut().find(|client| client.id == id) {
            change(client);
        }
        Ok(())
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        let clients = self.clients.read().await;
        Ok(clients.iter().find(|client| client.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Client>, RepositoryError> {
        Ok(self.snapshot().await)
    }

    async fn list_by_status(&self, status: ClientStatus) -> Result<Vec<Client>, RepositoryError> {
        let clients = self.clients.read().await;
        Ok(clients
            .iter()
            .filter(|client| client.status == status)
            .cloned()
            .collect())
    }

    async fn list_by_status_ordered_by_priority(
        &self,
        status: ClientStatus,
    ) -> Result<Vec<Client>, RepositoryError> {
        let mut group = self.list_by_status(status).await?;
        // Stable: equal priorities keep insertion order.
        group.sort_by(|left, right| left.priority.cmp(&right.priority));
        Ok(group)
    }

    async fn update_status(
        &self,
        id: ClientId,
        status: ClientStatus,
    ) -> Result<(), RepositoryError> {
        self.modify(id, |client| client.status = status).await
    }

    async fn update_priority(
        &self,
        id: ClientId,
        priority: Priority,
    ) -> Result<(), RepositoryError> {
        self.modify(id, |client| client.priority = priority).await
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn client(id: i64, status: ClientStatus, priority: i64) -> Client {
        Client::new(ClientId::new(id), status, Priority::Ordinal(priority))
    }

    #[fixture]
    fn repository() -> InMemoryClientRepository {
        InMemoryClientRepository::with_clients(vec![
            client(1, ClientStatus::Backlog, 2),
            client(2, ClientStatus::InProgress, 1),
            client(3, ClientStatus::Backlog, 1),
            client(4, ClientStatus::Backlog, 2),
        ])
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_id_returns_matching_client(repository: InMemoryClientRepository) {
        let found = repository.find_by_id(ClientId::new(2)).await.unwrap();
        assert_eq!(found.map(|client| client.status), Some(ClientStatus::InProgress));

        let missing = repository.find_by_id(ClientId::new(99)).await.unwrap();
        assert!(missing.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn list_preserves_insertion_order(repository: InMemoryClientRepository) {
        let ids: Vec<i64> = repository
            .list()
            .await
            .unwrap()
            .iter()
            .map(|client| client.id.value())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[rstest]
    #[tokio::test]
    async fn list_by_status_filters(repository: InMemoryClientRepository) {
        let backlog = repository.list_by_status(ClientStatus::Backlog).await.unwrap();
        assert_eq!(backlog.len(), 3);
        assert!(backlog.iter().all(|client| client.status == ClientStatus::Backlog));

        let complete = repository.list_by_status(ClientStatus::Complete).await.unwrap();
        assert!(complete.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn ordered_scan_sorts_by_priority_and_keeps_ties_in_store_order(
        repository: InMemoryClientRepository,
    ) {
        let ids: Vec<i64> = repository
            .list_by_status_ordered_by_priority(ClientStatus::Backlog)
            .await
            .unwrap()
            .iter()
            .map(|client| client.id.value())
            .collect();
        assert_eq!(ids, vec![3, 1, 4]);
    }

    #[rstest]
    #[tokio::test]
    async fn updates_touch_a_single_row(repository: InMemoryClientRepository) {
        repository
            .update_status(ClientId::new(1), ClientStatus::Complete)
            .await
            .unwrap();
        repository
            .update_priority(ClientId::new(3), Priority::Fractional(0.5))
            .await
            .unwrap();

        let clients = repository.snapshot().await;
        assert_eq!(clients[0].status, ClientStatus::Complete);
        assert_eq!(clients[0].priority, Priority::Ordinal(2));
        assert_eq!(clients[2].priority, Priority::Fractional(0.5));
        assert_eq!(clients[3], client(4, ClientStatus::Backlog, 2));
    }

    #[rstest]
    #[tokio::test]
    async fn updating_a_missing_client_is_a_no_op(repository: InMemoryClientRepository) {
        let before = repository.snapshot().await;
        repository
            .update_priority(ClientId::new(99), Priority::Ordinal(1))
            .await
            .unwrap();
        assert_eq!(repository.snapshot().await, before);
    }

    #[rstest]
    #[tokio::test]
    async fn from_json_loads_records_with_attributes() {
        let repository = InMemoryClientRepository::from_json(
            r#"[{"id": 1, "name": "Stark, White and Abbott", "status": "backlog", "priority": 1}]"#,
        )
        .unwrap();

        let clients = repository.snapshot().await;
        assert_eq!(clients.len(), 1);
        assert_eq!(
            clients[0].attributes.get("name"),
            Some(&serde_json::json!("Stark, White and Abbott"))
        );
    }

    #[rstest]
    #[case(r#"{"id": 1}"#)]
    #[case(r#"[{"id": 1, "status": "archived", "priority": 1}]"#)]
    #[case(r#"[{"id": 1, "status": "backlog"}]"#)]
    fn from_json_rejects_malformed_documents(#[case] document: &str) {
        let error = InMemoryClientRepository::from_json(document).unwrap_err();
        assert!(matches!(error, RepositoryError::DecodeError(_)));
    }
}
