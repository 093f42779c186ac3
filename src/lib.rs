//! # shiptivity-api
//!
//! HTTP service over a board of clients stored in SQLite. Each client sits in
//! one status group (`backlog`, `in-progress`, `complete`) and carries a
//! priority that orders it within that group.
//!
//! ## Layers
//!
//! - [`domain`]: the client record, its value objects and the pure
//!   re-sequencing plan
//! - [`application`]: input validation, queries and the update workflow
//! - [`infrastructure`]: the repository port, its SQLite and in-memory
//!   adapters, and configuration
//! - [`api`]: axum routes, handlers and error responses
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shiptivity_api::api::{AppState, create_router};
//! use shiptivity_api::infrastructure::{RepositoryConfig, RepositoryFactory};
//!
//! let repository = RepositoryFactory::new(RepositoryConfig::default()).create().await?;
//! let router = create_router(AppState::new(repository));
//! ```

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
