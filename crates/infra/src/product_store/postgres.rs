//! Postgres-backed product store.
//!
//! Code uniqueness is enforced by the `products_code_key` UNIQUE constraint.
//! `create` runs in a transaction: a lookup on `code` short-circuits the common
//! duplicate case, and a unique violation raised by the INSERT (a concurrent
//! writer won the race) is mapped to the same `DuplicateCode` outcome after the
//! transaction has been rolled back.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use tracing::instrument;

use catalog_core::ProductId;
use catalog_products::{NewProduct, Product, ProductFilter};

use super::rows::{is_unique_violation, map_sqlx_error, ProductRow};
use super::r#trait::{ProductStore, StoreError};

/// Postgres-backed product store.
///
/// ## Thread Safety
///
/// Uses the SQLx connection pool, which is `Send + Sync`. Each operation checks
/// out its own connection (or transaction) and returns it when dropped.
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: Arc<PgPool>,
}

impl PostgresProductStore {
    /// Create a new PostgresProductStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    async fn rollback(tx: Transaction<'_, Postgres>) {
        if let Err(e) = tx.rollback().await {
            // The transaction is discarded by the server when the connection
            // goes back to the pool, so this is not fatal.
            tracing::warn!("rollback failed: {e}");
        }
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self), err)]
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id       BIGSERIAL PRIMARY KEY,
                name     TEXT NOT NULL,
                code     TEXT NOT NULL,
                category TEXT NOT NULL,
                price    TEXT NOT NULL,
                CONSTRAINT products_code_key UNIQUE (code)
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
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM products WHERE code = $1")
            .bind(draft.code())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("lookup_code", e))?;

        if existing.is_some() {
            Self::rollback(tx).await;
            tracing::info!("duplicate product code rejected");
            return Err(StoreError::duplicate_code(draft.code()));
        }

        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO products (name, code, category, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(draft.name())
        .bind(draft.code())
        .bind(draft.category())
        .bind(draft.price())
        .fetch_one(&mut *tx)
        .await;

        let id = match inserted {
            Ok(id) => id,
            Err(e) if is_unique_violation(&e) => {
                Self::rollback(tx).await;
                tracing::info!("duplicate product code rejected by constraint");
                return Err(StoreError::duplicate_code(draft.code()));
            }
            Err(e) => {
                Self::rollback(tx).await;
                return Err(map_sqlx_error("insert_product", e));
            }
        };

        tx.commit().await.map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::duplicate_code(draft.code())
            } else {
                map_sqlx_error("commit", e)
            }
        })?;

        let id = ProductId::new(id);
        tracing::info!(id = %id, "product created");
        Ok(Product::from_draft(id, draft))
    }

    #[instrument(skip(self, id), fields(id = %id))]
    async fn get_by_id(&self, id: ProductId) -> Result<Product, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, code, category, price
            FROM products
            WHERE id = $1
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
            WHERE ($1::text IS NULL OR name = $1)
              AND ($2::text IS NULL OR code = $2)
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

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use sqlx::postgres::PgPoolOptions;

    use super::*;

    /// Connects to `TEST_DATABASE_URL`; the test is skipped when it is unset.
    async fn store() -> Option<PostgresProductStore> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let pool = PgPoolOptions::new().max_connections(4).connect(&url).await.unwrap();
        let store = PostgresProductStore::new(pool);
        store.ensure_schema().await.unwrap();
        Some(store)
    }

    fn unique_code() -> String {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        format!("PG-{}-{nanos}", std::process::id())
    }

    #[tokio::test]
    async fn create_get_and_duplicate() {
        let Some(store) = store().await else { return };
        let code = unique_code();

        let created = store
            .create(NewProduct::new("Widget", code.as_str(), "tools", "9.99").unwrap())
            .await
            .unwrap();
        assert_eq!(store.get_by_id(created.id).await.unwrap(), created);

        let err = store
            .create(NewProduct::new("Gadget", code.as_str(), "tools", "1.00").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::duplicate_code(code.as_str()));

        let listed = store.list_all(&ProductFilter::by_code(code.as_str())).await.unwrap();
        assert_eq!(listed, vec![created]);
    }
}
