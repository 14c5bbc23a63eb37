//! Process configuration, read once at startup.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `CATALOG_BIND_ADDR` | `0.0.0.0:8080` | listen address |
//! | `CATALOG_DEFAULT_PAGE_SIZE` | `50` | page size when the request omits one |
//! | `CATALOG_MAX_PAGE_SIZE` | `100` | largest accepted `size` / `limit` |
//! | `DATABASE_URL` | unset (in-memory) | see [`catalog_infra::config`] |
//! | `DATABASE_MAX_CONNECTIONS` | `10` | pool size |

use std::net::SocketAddr;

use thiserror::Error;

use catalog_core::{DomainError, PaginationLimits};
use catalog_infra::StoreConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ApiConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("invalid pagination limits: {0}")]
    Pagination(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] catalog_infra::ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub pagination: PaginationLimits,
    pub store: StoreConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            pagination: PaginationLimits::default(),
            store: StoreConfig::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ApiConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiConfigError> {
        let raw_addr = lookup("CATALOG_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ApiConfigError::InvalidValue {
                name: "CATALOG_BIND_ADDR",
                value: raw_addr.clone(),
            })?;

        let defaults = PaginationLimits::default();
        let default_size = parse_u32(&lookup, "CATALOG_DEFAULT_PAGE_SIZE")?.unwrap_or(defaults.default_size);
        let max_size = parse_u32(&lookup, "CATALOG_MAX_PAGE_SIZE")?.unwrap_or(defaults.max_size);
        let pagination = PaginationLimits::new(default_size, max_size)?;

        let store = StoreConfig::from_values(lookup("DATABASE_URL"), lookup("DATABASE_MAX_CONNECTIONS"))?;

        Ok(Self {
            bind_addr,
            pagination,
            store,
        })
    }
}

fn parse_u32(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<u32>, ApiConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ApiConfigError::InvalidValue { name, value: raw }),
    }
}
