//! Read-side operations.

use super::{ServiceError, either_to_result, parse_status_filter, validate_client_id};
use crate::domain::Client;
use crate::infrastructure::ClientRepository;

/// Lists clients, optionally restricted to one status group.
///
/// Results come back in store order. An absent or empty filter lists every
/// client.
///
/// # Errors
///
/// - `ClientError::InvalidStatus` if the filter names an unknown status
/// - `ServiceError::Repository` if the scan fails
pub async fn list_clients(
    repository: &dyn ClientRepository,
    status_filter: Option<&str>,
) -> Result<Vec<Client>, ServiceError> {
    let clients = match either_to_result(parse_status_filter(status_filter))? {
        Some(status) => repository.list_by_status(status).await?,
        None => repository.list().await?,
    };
    Ok(clients)
}

/// Fetches one client by its raw identifier.
///
/// # Errors
///
/// - `ClientError::InvalidIdentifier` / `ClientError::IdentifierNotFound`
/// - `ServiceError::Repository` if the lookup fails
pub async fn get_client(
    repository: &dyn ClientRepository,
    raw_id: &str,
) -> Result<Client, ServiceError> {
    validate_client_id(repository, raw_id).await
}
