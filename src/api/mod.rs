//! HTTP API layer.
//!
//! - **DTOs**: request bodies and fixed responses
//! - **Handlers**: axum handlers over [`AppState`]
//! - **Error**: mapping of application errors to `{message, long_message}`
//! - **Routes**: [`create_router`]

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;

pub use dto::{HealthResponse, ListClientsQuery, RootResponse, UpdateClientRequest};
pub use error::{ApiError, ApiErrorResponse};
pub use handlers::AppState;
pub use routes::create_router;
