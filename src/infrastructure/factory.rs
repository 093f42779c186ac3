//! Repository factory for runtime backend selection.
//!
//! Chooses between the SQLite store and the in-memory store from
//! configuration, and hands the rest of the service a
//! `Arc<dyn ClientRepository>` so handlers never see the concrete backend.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `sqlite` (default) | `in_memory`
//! - `DATABASE_URL`: SQLite URL, default `sqlite://clients.db`
//! - `DATABASE_MAX_CONNECTIONS`: pool size, default `5`
//! - `SEED_FILE`: JSON array of clients loaded into the in-memory store
//!
//! # Example
//!
//! ```ignore
//! let config = RepositoryConfig::from_env()?;
//! let repository = RepositoryFactory::new(config).create().await?;
//! let clients = repository.list().await?;
//! ```

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use super::{
    ClientRepository, InMemoryClientRepository, RepositoryError, SqliteClientRepository,
    SqliteConfig,
};

// =============================================================================
// Configuration Types
// =============================================================================

/// Backend holding the client records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// `SQLite` database file.
    #[default]
    Sqlite,
    /// Process-local store, optionally seeded from a JSON file.
    InMemory,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    /// Parses a storage mode, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidStorageMode` if the string is not recognized.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_string())),
        }
    }
}

/// Configuration for the repository factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    pub storage_mode: StorageMode,
    pub database_url: String,
    pub max_connections: u32,
    /// Seed document for `StorageMode::InMemory`. Ignored for `SQLite`.
    pub seed_file: Option<PathBuf>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        let sqlite = SqliteConfig::default();
        Self {
            storage_mode: StorageMode::default(),
            database_url: sqlite.url,
            max_connections: sqlite.max_connections,
            seed_file: None,
        }
    }
}

impl RepositoryConfig {
    /// Creates a configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates a configuration from an arbitrary variable lookup.
    ///
    /// Empty and whitespace-only values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigurationError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let storage_mode = get("STORAGE_MODE")
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or(defaults.storage_mode);

        let max_connections = get("DATABASE_MAX_CONNECTIONS")
            .map(|value| {
                value
                    .parse::<u32>()
                    .map_err(|error| ConfigurationError::InvalidValue {
                        key: "DATABASE_MAX_CONNECTIONS".to_string(),
                        message: error.to_string(),
                    })
            })
            .transpose()?
            .unwrap_or(defaults.max_connections);

        let config = Self {
            storage_mode,
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections,
            seed_file: get("SEED_FILE").map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidValue` for a zero-sized pool or a
    /// database URL without the `sqlite:` scheme.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.max_connections == 0 {
            return Err(ConfigurationError::InvalidValue {
                key: "DATABASE_MAX_CONNECTIONS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.storage_mode == StorageMode::Sqlite && !self.database_url.starts_with("sqlite:") {
            return Err(ConfigurationError::InvalidValue {
                key: "DATABASE_URL".to_string(),
                message: format!("expected a sqlite: URL, got '{}'", self.database_url),
            });
        }
        Ok(())
    }

    fn sqlite_config(&self) -> SqliteConfig {
        SqliteConfig::with_url(&self.database_url).with_max_connections(self.max_connections)
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Invalid storage mode value.
    #[error("Invalid storage mode: '{0}'. Expected 'sqlite' or 'in_memory'")]
    InvalidStorageMode(String),

    /// Invalid log format value.
    #[error("Invalid log format: '{0}'. Expected 'text' or 'json'")]
    InvalidLogFormat(String),

    /// A variable is set but cannot be used.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors that can occur during repository initialization.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The database could not be opened.
    #[error("Database connection error: {0}")]
    DatabaseConnection(String),

    /// The seed file could not be read or parsed.
    #[error("Seed file error ({}): {message}", path.display())]
    Seed { path: PathBuf, message: String },
}

// =============================================================================
// Repository Factory
// =============================================================================

/// Factory for creating the client repository selected by configuration.
#[derive(Debug, Clone)]
pub struct RepositoryFactory {
    config: RepositoryConfig,
}

impl RepositoryFactory {
    #[must_use]
    pub const fn new(config: RepositoryConfig) -> Self {
        Self { config }
    }

    /// Creates a factory from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError::Configuration` if environment configuration is invalid.
    pub fn from_env() -> Result<Self, FactoryError> {
        Ok(Self::new(RepositoryConfig::from_env()?))
    }

    #[must_use]
    pub const fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Opens the configured store.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if the database cannot be opened or the seed
    /// file cannot be loaded.
    pub async fn create(&self) -> Result<Arc<dyn ClientRepository>, FactoryError> {
        match self.config.storage_mode {
            StorageMode::Sqlite => {
                let repository = SqliteClientRepository::connect(&self.config.sqlite_config())
                    .await
                    .map_err(|error| FactoryError::DatabaseConnection(error.to_string()))?;
                tracing::info!(url = %self.config.database_url, "Using SQLite client store");
                Ok(Arc::new(repository))
            }
            StorageMode::InMemory => {
                let repository = self.create_in_memory_repository()?;
                tracing::info!("Using in-memory client store");
                Ok(Arc::new(repository))
            }
        }
    }

    fn create_in_memory_repository(&self) -> Result<InMemoryClientRepository, FactoryError> {
        let Some(path) = &self.config.seed_file else {
            return Ok(InMemoryClientRepository::new());
        };
        let seed_error = |message: String| FactoryError::Seed {
            path: path.clone(),
            message,
        };

        let document = std::fs::read_to_string(path).map_err(|error| seed_error(error.to_string()))?;
        InMemoryClientRepository::from_json(&document).map_err(|error| match error {
            RepositoryError::DatabaseError(message) | RepositoryError::DecodeError(message) => {
                seed_error(message)
            }
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
