//! Route configuration.
//!
//! # Routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | / | `root` |
//! | GET | /health | `health_check` |
//! | GET | /api/v1/clients | `list_clients` |
//! | GET | /api/v1/clients/{id} | `get_client` |
//! | PUT | /api/v1/clients/{id} | `update_client` |

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{self, AppState};

/// Creates the router with every route, CORS and request tracing.
///
/// # Example
///
/// ```ignore
/// let state = AppState::new(repository);
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
/// axum::serve(listener, create_router(state)).await?;
/// ```
pub fn create_router(state: AppState) -> Router {
    let api_v1 = Router::new()
        .route("/clients", get(handlers::list_clients))
        .route(
            "/clients/{id}",
            get(handlers::get_client).put(handlers::update_client),
        );

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_v1)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}

fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

// =============================================================================
// Tests
// =============================================================================
