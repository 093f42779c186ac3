//! Infrastructure layer.
//!
//! - [`ClientRepository`]: persistence port used by the application layer
//! - [`SqliteClientRepository`] / [`InMemoryClientRepository`]: its adapters
//! - [`RepositoryFactory`]: picks an adapter from [`RepositoryConfig`]
//! - [`AppConfig`]: process configuration

mod config;
mod factory;
mod in_memory;
mod repository;
mod sqlite;

pub use config::{AppConfig, LogFormat};
pub use factory::{
    ConfigurationError, FactoryError, RepositoryConfig, RepositoryFactory, StorageMode,
};
pub use in_memory::InMemoryClientRepository;
pub use repository::{ClientRepository, RepositoryError};
pub use sqlite::{SqliteClientRepository, SqliteConfig};
