//! Catalog service: the application layer between HTTP handlers and the store.
//!
//! Handlers hand over already-validated domain values; the service checks
//! pagination parameters before touching the store, delegates to
//! [`ProductStore`] and translates store outcomes into [`CatalogError`].

use std::sync::Arc;

use thiserror::Error;

use catalog_core::{
    DomainError, LimitOffsetPage, LimitOffsetParams, Page, PageParams, PaginationLimits, ProductId,
};
use catalog_infra::{ProductStore, StoreError};
use catalog_products::{NewProduct, Product, ProductFilter};

/// Failure of a catalog operation, as seen by API clients.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The product code is already taken.
    #[error("Product with code {code} already exists")]
    Conflict { code: String },

    #[error("Product {id} not found")]
    NotFound { id: ProductId },

    /// Malformed input (blank code, out-of-range pagination values).
    #[error("{0}")]
    InvalidInput(String),

    /// The store failed; details were logged where the failure happened.
    #[error("storage backend unavailable")]
    Unavailable,
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateCode { code } => CatalogError::Conflict { code },
            StoreError::NotFound { id } => CatalogError::NotFound { id },
            StoreError::Unavailable(_) => CatalogError::Unavailable,
        }
    }
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => CatalogError::InvalidInput(msg),
        }
    }
}

/// Stateless orchestration over an injected product store.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ProductStore>,
    limits: PaginationLimits,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ProductStore>, limits: PaginationLimits) -> Self {
        Self { store, limits }
    }

    pub async fn create_product(&self, input: NewProduct) -> Result<Product, CatalogError> {
        Ok(self.store.create(input).await?)
    }

    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        Ok(self.store.get_by_id(id).await?)
    }

    /// Page-based listing. `page` defaults to 1, `size` to the configured default.
    pub async fn list_products_paged(
        &self,
        filter: ProductFilter,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<Page<Product>, CatalogError> {
        let params = PageParams::new(page, size, &self.limits)?;
        let all = self.store.list_all(&filter).await?;
        Ok(Page::paginate(all, params))
    }

    /// Limit/offset listing. `limit` defaults to the configured default page
    /// size, `offset` to 0.
    pub async fn list_products_limit_offset(
        &self,
        filter: ProductFilter,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<LimitOffsetPage<Product>, CatalogError> {
        let params = LimitOffsetParams::new(limit, offset, &self.limits)?;
        let all = self.store.list_all(&filter).await?;
        Ok(LimitOffsetPage::paginate(all, params))
    }
}
