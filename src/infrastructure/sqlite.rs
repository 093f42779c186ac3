//! SQLite client repository.
//!
//! Uses an `sqlx::SqlitePool`. Rows are read with `SELECT *` and converted
//! column by column, so columns the service does not know about survive the
//! round trip as pass-through attributes.
//!
//! # Table Schema
//!
//! The table is seeded externally; the service neither creates nor migrates it.
//!
//! ```sql
//! CREATE TABLE clients (
//!     id INTEGER PRIMARY KEY,
//!     name TEXT,
//!     description TEXT,
//!     status TEXT,
//!     priority INTEGER
//! );
//! ```

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Number, Value};
use sqlx::query::Query;
use sqlx::sqlite::{
    SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::{Column, Row, Sqlite, TypeInfo, ValueRef};

use crate::domain::{Client, ClientId, ClientStatus, Priority};
use crate::infrastructure::{ClientRepository, RepositoryError};

// =============================================================================
// SqliteConfig
// =============================================================================

/// Connection settings for the SQLite pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteConfig {
    /// `sqlite://path/to/file.db` or `sqlite::memory:`.
    pub url: String,

    /// Maximum number of pooled connections.
    ///
    /// Defaults to 5.
    pub max_connections: u32,

    /// Maximum time to wait for a connection.
    ///
    /// Defaults to 30 seconds.
    pub acquire_timeout: Duration,

    /// Whether a missing database file is created on connect.
    ///
    /// Defaults to `false`: a missing file is a configuration mistake, since
    /// the service does not create the `clients` table.
    pub create_if_missing: bool,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://clients.db".to_string(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
            create_if_missing: false,
        }
    }
}

impl SqliteConfig {
    /// Creates a configuration for `url` with default settings.
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub const fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    #[must_use]
    pub const fn with_create_if_missing(mut self, create_if_missing: bool) -> Self {
        self.create_if_missing = create_if_missing;
        self
    }

    /// Returns `true` for a private in-memory database.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:")
    }
}

// =============================================================================
// SqliteClientRepository
// =============================================================================

/// `SQLite` implementation of `ClientRepository`.
#[derive(Debug, Clone)]
pub struct SqliteClientRepository {
    pool: SqlitePool,
}

impl SqliteClientRepository {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool according to `config`.
    ///
    /// An in-memory database only lives as long as one of its connections, so
    /// for `sqlite::memory:` one connection is kept open for the pool's lifetime.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DatabaseError` if the URL is malformed or the
    /// database cannot be opened.
    pub async fn connect(config: &SqliteConfig) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(config.create_if_missing);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout);
        if config.is_in_memory() {
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;
        tracing::debug!(url = %config.url, "SQLite pool opened");
        Ok(Self::new(pool))
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn fetch_clients<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> Result<Vec<Client>, RepositoryError> {
        query
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(client_from_row)
            .collect()
    }
}

#[async_trait]
impl ClientRepository for SqliteClientRepository {
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        sqlx::query("SELECT * FROM clients WHERE id = ? LIMIT 1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?
            .as_ref()
            .map(client_from_row)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Client>, RepositoryError> {
        self.fetch_clients(sqlx::query("SELECT * FROM clients")).await
    }

    async fn list_by_status(&self, status: ClientStatus) -> Result<Vec<Client>, RepositoryError> {
        self.fetch_clients(
            sqlx::query("SELECT * FROM clients WHERE status = ?").bind(status.as_str()),
        )
        .await
    }

    async fn list_by_status_ordered_by_priority(
        &self,
        status: ClientStatus,
    ) -> Result<Vec<Client>, RepositoryError> {
        self.fetch_clients(
            sqlx::query("SELECT * FROM clients WHERE status = ? ORDER BY priority")
                .bind(status.as_str()),
        )
        .await
    }

    async fn update_status(
        &self,
        id: ClientId,
        status: ClientStatus,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE clients SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id.value())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update_priority(
        &self,
        id: ClientId,
        priority: Priority,
    ) -> Result<(), RepositoryError> {
        let statement = sqlx::query("UPDATE clients SET priority = ? WHERE id = ?");
        let statement = match priority {
            Priority::Ordinal(value) => statement.bind(value),
            Priority::Fractional(value) => statement.bind(value),
        };
        statement.bind(id.value()).execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("SQLite pool closed");
    }
}

// =============================================================================
// Row Decoding
// =============================================================================

/// Converts a `SELECT *` row into a client record.
fn client_from_row(row: &SqliteRow) -> Result<Client, RepositoryError> {
    let mut id = None;
    let mut status = None;
    let mut priority = None;
    let mut attributes = Map::new();

    for column in row.columns() {
        let value = column_value(row, column.ordinal())?;
        match column.name() {
            "id" => id = Some(decode_id(&value)?),
            "status" => status = Some(decode_status(&value)?),
            "priority" => priority = Some(decode_priority(&value)?),
            name => {
                attributes.insert(name.to_string(), value);
            }
        }
    }

    let missing = |column: &str| RepositoryError::DecodeError(format!("missing column `{column}`"));
    Ok(Client {
        id: id.ok_or_else(|| missing("id"))?,
        status: status.ok_or_else(|| missing("status"))?,
        priority: priority.ok_or_else(|| missing("priority"))?,
        attributes,
    })
}

/// Reads one column as JSON according to the value's storage class.
fn column_value(row: &SqliteRow, index: usize) -> Result<Value, RepositoryError> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let storage_class = raw.type_info().name().to_string();

    // The storage class was checked above, so the unchecked getters are sound.
    match storage_class.as_str() {
        "INTEGER" => Ok(Value::from(row.try_get_unchecked::<i64, _>(index)?)),
        "REAL" => {
            let value = row.try_get_unchecked::<f64, _>(index)?;
            Ok(Number::from_f64(value).map_or(Value::Null, Value::Number))
        }
        "TEXT" => Ok(Value::from(row.try_get_unchecked::<String, _>(index)?)),
        "BLOB" => Ok(Value::from(row.try_get_unchecked::<Vec<u8>, _>(index)?)),
        other => Err(RepositoryError::DecodeError(format!(
            "unsupported storage class `{other}` in column {index}"
        ))),
    }
}

fn decode_id(value: &Value) -> Result<ClientId, RepositoryError> {
    value
        .as_i64()
        .map(ClientId::new)
        .ok_or_else(|| RepositoryError::DecodeError(format!("invalid id {value}")))
}

fn decode_status(value: &Value) -> Result<ClientStatus, RepositoryError> {
    value
        .as_str()
        .and_then(|status| status.parse().ok())
        .ok_or_else(|| RepositoryError::DecodeError(format!("invalid status {value}")))
}

fn decode_priority(value: &Value) -> Result<Priority, RepositoryError> {
    match value {
        Value::Number(number) => Priority::from_json_number(number),
        _ => None,
    }
    .ok_or_else(|| RepositoryError::DecodeError(format!("invalid priority {value}")))
}

// =============================================================================
// Tests
// =============================================================================
