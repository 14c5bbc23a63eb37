//! Infrastructure layer: product storage backends and their configuration.

pub mod config;
pub mod product_store;

pub use config::{ConfigError, StoreBackend, StoreConfig};
pub use product_store::{InMemoryProductStore, ProductStore, StoreError};
