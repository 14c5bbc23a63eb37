//! SQL row types and error mapping shared by the relational backends.
//!
//! ## Error Mapping
//!
//! | SQLx Error | Condition | StoreError |
//! |------------|-----------|------------|
//! | Database | unique violation (Postgres `23505`, SQLite `2067`) | `DuplicateCode` (mapped by the caller, which knows the code) |
//! | Database | anything else | `Unavailable` |
//! | PoolClosed / PoolTimedOut | N/A | `Unavailable` |
//! | RowNotFound | N/A | `Unavailable` (queries use `fetch_optional`/`fetch_all`) |
//! | Other | I/O, TLS, protocol | `Unavailable` |
//!
//! The backend message is logged here and never copied into the returned error.

use sqlx::Row;

use catalog_core::ProductId;
use catalog_products::Product;

use super::r#trait::StoreError;

#[derive(Debug)]
pub(crate) struct ProductRow {
    id: i64,
    name: String,
    code: String,
    category: String,
    price: String,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for ProductRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(ProductRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            code: row.try_get("code")?,
            category: row.try_get("category")?,
            price: row.try_get("price")?,
        })
    }
}

impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for ProductRow {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(ProductRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            code: row.try_get("code")?,
            category: row.try_get("category")?,
            price: row.try_get("price")?,
        })
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId::new(row.id),
            name: row.name,
            code: row.code,
            category: row.category,
            price: row.price,
        }
    }
}

/// Translate a backend error into a [`StoreError`], logging the detail.
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) => {
            tracing::error!(
                operation,
                code = db_err.code().as_deref().unwrap_or("-"),
                "database error: {}",
                db_err.message()
            );
        }
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
            tracing::error!(operation, "connection pool unavailable: {err}");
        }
        _ => {
            tracing::error!(operation, "sqlx error: {err}");
        }
    }
    StoreError::Unavailable(format!("{operation} failed"))
}

/// Check if an error is a unique constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
