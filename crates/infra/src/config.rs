//! Store configuration loading and bootstrap.
//!
//! The backend is chosen from `DATABASE_URL`:
//!
//! - `postgres://…` / `postgresql://…` → [`PostgresProductStore`]
//! - `sqlite:…` → [`SqliteProductStore`]
//! - unset or empty → [`InMemoryProductStore`] (nothing survives a restart)
//!
//! `DATABASE_MAX_CONNECTIONS` sizes the pool (default 10).

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::product_store::{
    InMemoryProductStore, PostgresProductStore, ProductStore, SqliteProductStore, StoreError,
};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported DATABASE_URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Which storage engine backs the catalog.
#[derive(Clone, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    Postgres { url: String },
    Sqlite { url: String },
}

// Connection strings can carry credentials; keep them out of logs.
impl core::fmt::Debug for StoreBackend {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StoreBackend::InMemory => f.write_str("InMemory"),
            StoreBackend::Postgres { .. } => f.write_str("Postgres"),
            StoreBackend::Sqlite { .. } => f.write_str("Sqlite"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::InMemory,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl StoreConfig {
    /// Read `DATABASE_URL` and `DATABASE_MAX_CONNECTIONS` from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var("DATABASE_URL").ok(),
            std::env::var("DATABASE_MAX_CONNECTIONS").ok(),
        )
    }

    pub fn from_values(
        database_url: Option<String>,
        max_connections: Option<String>,
    ) -> Result<Self, ConfigError> {
        let backend = match database_url.map(|u| u.trim().to_string()) {
            None => StoreBackend::InMemory,
            Some(url) if url.is_empty() => StoreBackend::InMemory,
            Some(url) if url.starts_with("postgres://") || url.starts_with("postgresql://") => {
                StoreBackend::Postgres { url }
            }
            Some(url) if url.starts_with("sqlite:") => StoreBackend::Sqlite { url },
            Some(url) => {
                let scheme = url.split(':').next().unwrap_or_default().to_string();
                return Err(ConfigError::UnsupportedScheme(scheme));
            }
        };

        let max_connections = match max_connections {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "DATABASE_MAX_CONNECTIONS",
                        value: raw,
                    });
                }
            },
        };

        Ok(Self {
            backend,
            max_connections,
        })
    }

    /// Connect to the configured backend and make sure the schema exists.
    pub async fn open_store(&self) -> Result<Arc<dyn ProductStore>, StoreError> {
        let store: Arc<dyn ProductStore> = match &self.backend {
            StoreBackend::InMemory => {
                tracing::warn!("DATABASE_URL not set; using in-memory product store");
                Arc::new(InMemoryProductStore::new())
            }
            StoreBackend::Postgres { url } => {
                let pool = PgPoolOptions::new()
                    .max_connections(self.max_connections)
                    .connect(url)
                    .await
                    .map_err(|e| StoreError::Unavailable(format!("failed to connect to Postgres: {e}")))?;
                Arc::new(PostgresProductStore::new(pool))
            }
            StoreBackend::Sqlite { url } => {
                Arc::new(SqliteProductStore::connect(url, self.max_connections).await?)
            }
        };

        store.ensure_schema().await?;
        tracing::info!(backend = ?self.backend, max_connections = self.max_connections, "product store ready");
        Ok(store)
    }
}
