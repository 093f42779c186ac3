//! Update workflow: status change and priority re-sequencing.
//!
//! # Steps
//!
//! 1. Resolve the identifier (one point lookup). The loaded record is the
//!    snapshot whose status names the group to re-sequence.
//! 2. Validate the priority, if the field was sent at all (`null` included).
//! 3. Validate and write the status, if one was sent.
//! 4. Write the raw priority, then renumber the snapshot's group `1..N` in
//!    priority order.
//! 5. Return every client.
//!
//! The first failing step aborts the workflow. Steps 3 and 4 are separate
//! writes with no surrounding transaction, and a status-only update never
//! renumbers anything.
//!
//! Because the snapshot is taken before the status write, moving a client
//! and re-prioritizing it in one call renumbers the group it *left*; the
//! moved client keeps the raw priority it was sent.

use serde_json::Value;

use super::{
    ServiceError, either_to_result, parse_status_change, validate_client_id, validate_priority,
};
use crate::domain::{Client, ClientStatus, resequence};
use crate::infrastructure::{ClientRepository, RepositoryError};

/// Input of [`update_client`], as received from the caller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateClientCommand {
    pub raw_id: String,
    /// Raw `status` field; `None` when absent from the request.
    pub status: Option<Value>,
    /// Raw `priority` field; `None` only when absent. An explicit `null` is
    /// `Some(Value::Null)` and fails validation.
    pub priority: Option<Value>,
}

impl UpdateClientCommand {
    #[must_use]
    pub fn new(raw_id: impl Into<String>) -> Self {
        Self {
            raw_id: raw_id.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<Value>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<Value>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Applies a status and/or priority change and returns every client.
///
/// # Errors
///
/// - `ClientError::InvalidIdentifier` / `ClientError::IdentifierNotFound`
/// - `ClientError::InvalidPriority`
/// - `ClientError::InvalidStatus`
/// - `ServiceError::Repository` if any store call fails; writes already
///   issued are not rolled back
pub async fn update_client(
    repository: &dyn ClientRepository,
    command: UpdateClientCommand,
) -> Result<Vec<Client>, ServiceError> {
    let snapshot = validate_client_id(repository, &command.raw_id).await?;
    let priority = command
        .priority
        .as_ref()
        .map(|raw_priority| either_to_result(validate_priority(raw_priority)))
        .transpose()?;

    if let Some(status) = either_to_result(parse_status_change(command.status.as_ref()))? {
        repository.update_status(snapshot.id, status).await?;
        tracing::info!(
            client_id = %snapshot.id,
            from = %snapshot.status,
            to = %status,
            "Client status updated"
        );
    }

    if let Some(priority) = priority {
        repository.update_priority(snapshot.id, priority).await?;
        let renumbered = resequence_group(repository, snapshot.status).await?;
        tracing::info!(
            client_id = %snapshot.id,
            %priority,
            group = %snapshot.status,
            renumbered,
            "Client priority updated"
        );
    }

    Ok(repository.list().await?)
}

/// Renumbers one status group `1..N` in its current priority order.
///
/// Returns the size of the group.
async fn resequence_group(
    repository: &dyn ClientRepository,
    status: ClientStatus,
) -> Result<usize, RepositoryError> {
    let group = repository.list_by_status_ordered_by_priority(status).await?;
    let plan = resequence(&group);
    for assignment in &plan {
        repository
            .update_priority(assignment.id, assignment.priority)
            .await?;
    }
    Ok(plan.len())
}
