//! Application configuration management.
//!
//! Configuration is loaded once at startup from environment variables (after
//! `.env`, if present). Every value has a default, so an empty environment
//! yields a runnable service on `0.0.0.0:3001` backed by `./clients.db`.
//!
//! # Example
//!
//! ```rust,ignore
//! let config = AppConfig::from_env()?;
//! let listener = TcpListener::bind(config.bind_address()).await?;
//! ```

use std::str::FromStr;

use super::{ConfigurationError, RepositoryConfig};

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigurationError::InvalidLogFormat(value.to_string())),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP server host address.
    pub host: String,
    /// HTTP server port.
    pub port: u16,
    pub log_format: LogFormat,
    pub repository: RepositoryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            log_format: LogFormat::default(),
            repository: RepositoryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `HOST`: Server host (optional, default: "0.0.0.0")
    /// - `PORT`: Server port (optional, default: 3001)
    /// - `LOG_FORMAT`: `text` (default) | `json`
    /// - plus the storage variables read by [`RepositoryConfig::from_lookup`]
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if a variable has an invalid value.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        // Load .env file if present (ignores errors if file doesn't exist)
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if a variable has an invalid value.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigurationError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let port = get("PORT")
            .map(|value| {
                value
                    .parse::<u16>()
                    .map_err(|error| ConfigurationError::InvalidValue {
                        key: "PORT".to_string(),
                        message: error.to_string(),
                    })
            })
            .transpose()?
            .unwrap_or(defaults.port);

        let log_format = get("LOG_FORMAT")
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or(defaults.log_format);

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            log_format,
            repository: RepositoryConfig::from_lookup(&lookup)?,
        })
    }

    /// Returns the `host:port` pair to bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
