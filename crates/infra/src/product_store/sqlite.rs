//! SQLite-backed product store.
//!
//! Uniqueness comes from the `UNIQUE` column constraint on `code`. The insert
//! is a single statement, so SQLite applies it atomically: a constraint
//! violation leaves the table untouched. The code lookup that precedes it runs
//! on the same pooled connection and only short-circuits the common case.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use tracing::instrument;

use catalog_core::ProductId;
use catalog_products::{NewProduct, Product, ProductFilter};

use super::rows::{is_unique_violation, map_sqlx_error, ProductRow};
use super::r#trait::{ProductStore, StoreError};

/// SQLite-backed product store.
#[derive(Debug, Clone)]
pub struct SqliteProductStore {
    pool: Arc<SqlitePool>,
}

impl SqliteProductStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open (creating if needed) the database file behind `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| map_sqlx_error("parse_sqlite_url", e))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| map_sqlx_error("connect_sqlite", e))?;

        Ok(Self::new(pool))
    }

    /// A private in-memory database.
    ///
    /// The pool holds one connection that is never recycled, so the database
    /// lives exactly as long as the store.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| map_sqlx_error("connect_sqlite_memory", e))?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ProductStore for SqliteProductStore {
    #[instrument(skip(self), err)]
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                name     TEXT NOT NULL,
                code     TEXT NOT NULL UNIQUE,
                category TEXT NOT NULL,
                price    TEXT NOT NULL
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_products_table", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS products_name_idx ON products (name)")
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("create_products_name_index", e))?;

        Ok(())
    }

    #[instrument(skip(self, draft), fields(code = %draft.code()))]
    async fn create(&self, draft: NewProduct) -> Result<Product, StoreError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| map_sqlx_error("acquire_connection", e))?;

        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM products WHERE code = ?1")
            .bind(draft.code())
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error("lookup_code", e))?;

        if existing.is_some() {
            tracing::info!("duplicate product code rejected");
            return Err(StoreError::duplicate_code(draft.code()));
        }

        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO products (name, code, category, price)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            "#,
        )
        .bind(draft.name())
        .bind(draft.code())
        .bind(draft.category())
        .bind(draft.price())
        .fetch_one(&mut *conn)
        .await;

        let id = match inserted {
            Ok(id) => ProductId::new(id),
            Err(e) if is_unique_violation(&e) => {
                tracing::info!("duplicate product code rejected by constraint");
                return Err(StoreError::duplicate_code(draft.code()));
            }
            Err(e) => return Err(map_sqlx_error("insert_product", e)),
        };

        tracing::info!(id = %id, "product created");
        Ok(Product::from_draft(id, draft))
    }

    #[instrument(skip(self, id), fields(id = %id))]
    async fn get_by_id(&self, id: ProductId) -> Result<Product, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, code, category, price
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_product", e))?;

        match row {
            Some(row) => {
                let row = ProductRow::from_row(&row).map_err(|e| map_sqlx_error("decode_product", e))?;
                Ok(row.into())
            }
            None => Err(StoreError::NotFound { id }),
        }
    }

    #[instrument(skip(self), fields(count = tracing::field::Empty), err)]
    async fn list_all(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, code, category, price
            FROM products
            WHERE (?1 IS NULL OR name = ?1)
              AND (?2 IS NULL OR code = ?2)
            ORDER BY id ASC
            "#,
        )
        .bind(filter.name.as_deref())
        .bind(filter.code.as_deref())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_products", e))?;

        let mut products = Vec::with_capacity(rows.len());
        for row in rows {
            let row = ProductRow::from_row(&row).map_err(|e| map_sqlx_error("decode_product", e))?;
            products.push(row.into());
        }

        tracing::Span::current().record("count", products.len());
        Ok(products)
    }
}
