//! Shared helpers for integration tests.
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::{backlog_trio, sqlite_repository, create_test_app, send};
//! ```
//!
//! Each integration test file is compiled as its own crate, so helpers that a
//! given file does not use would otherwise warn.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use shiptivity_api::api::{AppState, create_router};
use shiptivity_api::domain::{Client, ClientId, ClientStatus, Priority};
use shiptivity_api::infrastructure::{ClientRepository, SqliteClientRepository, SqliteConfig};

pub const CREATE_CLIENTS_TABLE: &str = "CREATE TABLE clients (
    id INTEGER PRIMARY KEY,
    name TEXT,
    description TEXT,
    status TEXT,
    priority INTEGER
)";

// =============================================================================
// Fixtures
// =============================================================================

pub fn client(id: i64, status: ClientStatus, priority: i64) -> Client {
    Client::new(ClientId::new(id), status, Priority::Ordinal(priority))
        .with_attribute("name", format!("Client {id}"))
        .with_attribute("description", Value::Null)
}

/// Three backlog clients at priorities 1, 2, 3.
pub fn backlog_trio() -> Vec<Client> {
    vec![
        client(1, ClientStatus::Backlog, 1),
        client(2, ClientStatus::Backlog, 2),
        client(3, ClientStatus::Backlog, 3),
    ]
}

/// A small board spread over every status.
pub fn board() -> Vec<Client> {
    vec![
        client(1, ClientStatus::Backlog, 1),
        client(2, ClientStatus::InProgress, 1),
        client(3, ClientStatus::Backlog, 2),
        client(4, ClientStatus::Complete, 1),
        client(5, ClientStatus::InProgress, 2),
        client(6, ClientStatus::Backlog, 3),
    ]
}

// =============================================================================
// SQLite Helpers
// =============================================================================

/// Opens a private in-memory database holding the `clients` table.
pub async fn empty_sqlite_repository() -> SqliteClientRepository {
    let config = SqliteConfig::with_url("sqlite::memory:").with_max_connections(1);
    let repository = SqliteClientRepository::connect(&config).await.unwrap();
    sqlx::query(CREATE_CLIENTS_TABLE)
        .execute(repository.pool())
        .await
        .unwrap();
    repository
}

/// Opens a private in-memory database seeded with `clients`, in order.
pub async fn sqlite_repository(clients: &[Client]) -> SqliteClientRepository {
    let repository = empty_sqlite_repository().await;
    for client in clients {
        insert_client(&repository, client).await;
    }
    repository
}

pub async fn insert_client(repository: &SqliteClientRepository, client: &Client) {
    let text = |key: &str| {
        client
            .attributes
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let statement = sqlx::query(
        "INSERT INTO clients (id, name, description, status, priority) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(client.id.value())
    .bind(text("name"))
    .bind(text("description"))
    .bind(client.status.as_str());
    let statement = match client.priority {
        Priority::Ordinal(value) => statement.bind(value),
        Priority::Fractional(value) => statement.bind(value),
    };
    statement.execute(repository.pool()).await.unwrap();
}

// =============================================================================
// HTTP Helpers
// =============================================================================

pub fn create_test_app(repository: Arc<dyn ClientRepository>) -> Router {
    create_router(AppState::new(repository))
}

/// Sends `request` and decodes the JSON response body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn put_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Ids of the `status` group in `clients`, sorted by priority.
pub fn group_order(clients: &[Client], status: ClientStatus) -> Vec<i64> {
    let mut group: Vec<&Client> = clients
        .iter()
        .filter(|client| client.status == status)
        .collect();
    group.sort_by_key(|client| client.priority);
    group.iter().map(|client| client.id.value()).collect()
}

/// Decodes a JSON array of clients as returned by the API.
pub fn decode_clients(json: Value) -> Vec<Client> {
    serde_json::from_value(json).unwrap()
}
