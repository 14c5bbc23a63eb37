//! Product storage boundary.
//!
//! [`ProductStore`] is the only way the service touches persisted products.
//! Three backends implement it:
//!
//! - [`InMemoryProductStore`]: tests/dev, no durability.
//! - [`PostgresProductStore`]: production.
//! - [`SqliteProductStore`]: single-node deployments and relational tests.
//!
//! All of them enforce code uniqueness atomically with the write and translate
//! backend failures into [`StoreError`] before returning.

pub mod in_memory;
pub mod postgres;
mod rows;
pub mod sqlite;
pub mod r#trait;

pub use in_memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;
pub use sqlite::SqliteProductStore;
pub use r#trait::{ProductStore, StoreError};
