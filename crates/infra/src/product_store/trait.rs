use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use catalog_core::ProductId;
use catalog_products::{NewProduct, Product, ProductFilter};

/// Product store operation error.
///
/// Raw backend errors never cross this boundary: integrity violations become
/// typed variants and everything else collapses into [`StoreError::Unavailable`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A product with this code already exists. Nothing was written.
    #[error("product with code {code} already exists")]
    DuplicateCode { code: String },

    /// No product has this id.
    #[error("product {id} not found")]
    NotFound { id: ProductId },

    /// The backend failed (connection, I/O, unexpected database error).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn duplicate_code(code: impl Into<String>) -> Self {
        Self::DuplicateCode { code: code.into() }
    }
}

/// Durable product storage.
///
/// ## Uniqueness
///
/// `create` must enforce code uniqueness atomically with the write. A lookup
/// before the insert is allowed as a fast path, but the final word belongs to
/// the backend's own constraint: two callers racing on the same code must end
/// with exactly one row and one `DuplicateCode` for every other caller.
///
/// ## Sessions
///
/// Every call acquires its own connection/transaction from the backend's pool
/// and releases it before returning, on success and on every error path.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Create the products table if it does not exist yet. Idempotent.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    /// Persist a new product and return it with its assigned id.
    async fn create(&self, draft: NewProduct) -> Result<Product, StoreError>;

    /// Fetch one product.
    async fn get_by_id(&self, id: ProductId) -> Result<Product, StoreError>;

    /// Fetch every product matching `filter`, ordered by ascending id.
    async fn list_all(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        (**self).ensure_schema().await
    }

    async fn create(&self, draft: NewProduct) -> Result<Product, StoreError> {
        (**self).create(draft).await
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Product, StoreError> {
        (**self).get_by_id(id).await
    }

    async fn list_all(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        (**self).list_all(filter).await
    }
}
