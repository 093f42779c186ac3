//! HTTP handlers for the client registry.
//!
//! Handlers only translate between HTTP and the application layer: they pull
//! raw input out of the request, call one application operation and turn the
//! result into JSON or an [`ApiErrorResponse`].

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};

use super::dto::{HealthResponse, ListClientsQuery, RootResponse, UpdateClientRequest};
use super::error::ApiErrorResponse;
use crate::application;
use crate::domain::Client;
use crate::infrastructure::ClientRepository;

// =============================================================================
// Application State
// =============================================================================

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub clients: Arc<dyn ClientRepository>,
}

impl AppState {
    #[must_use]
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AppState")
            .field("clients", &"Arc<dyn ClientRepository>")
            .finish()
    }
}

// =============================================================================
// Service Handlers
// =============================================================================

/// GET / - Banner.
#[allow(clippy::unused_async)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse::default())
}

/// GET /health - Health check endpoint.
#[allow(clippy::unused_async)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

// =============================================================================
// Client Handlers
// =============================================================================

/// GET /api/v1/clients - Lists clients, optionally filtered by `?status=`.
///
/// # Errors
///
/// - `400 Bad Request`: unknown status or unparsable query string
/// - `500 Internal Server Error`: store failure
pub async fn list_clients(
    State(state): State<AppState>,
    query: Result<Query<ListClientsQuery>, QueryRejection>,
) -> Result<Json<Vec<Client>>, ApiErrorResponse> {
    let Query(query) = query?;
    let clients =
        application::list_clients(state.clients.as_ref(), query.status.as_deref()).await?;
    Ok(Json(clients))
}

/// GET /api/v1/clients/{id} - Fetches one client.
///
/// # Errors
///
/// - `400 Bad Request`: malformed or unknown identifier
/// - `500 Internal Server Error`: store failure
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Client>, ApiErrorResponse> {
    let client = application::get_client(state.clients.as_ref(), &id).await?;
    Ok(Json(client))
}

/// PUT /api/v1/clients/{id} - Changes status and/or priority.
///
/// # Request Body
///
/// ```json
/// { "status": "in-progress", "priority": 1 }
/// ```
///
/// Both fields are optional. A request without a JSON content type is
/// treated as an empty body.
///
/// # Response
///
/// - `200 OK`: every client, after the update
/// - `400 Bad Request`: validation error or unparsable body
/// - `500 Internal Server Error`: store failure
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateClientRequest>, JsonRejection>,
) -> Result<Json<Vec<Client>>, ApiErrorResponse> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => UpdateClientRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };

    let clients =
        application::update_client(state.clients.as_ref(), request.into_command(id)).await?;
    Ok(Json(clients))
}
