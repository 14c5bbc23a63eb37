//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the catalog service and its error type
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use catalog_infra::{ProductStore, StoreError};

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::{CatalogError, CatalogService};

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Opens the configured store and creates the products table if needed.
pub async fn build_app(config: &ApiConfig) -> Result<Router, StoreError> {
    let store = config.store.open_store().await?;
    Ok(router_with_store(store, config))
}

/// Build the router around an already-open store.
pub fn router_with_store(store: Arc<dyn ProductStore>, config: &ApiConfig) -> Router {
    let service = Arc::new(CatalogService::new(store, config.pagination));
    router(service)
}

pub fn router(service: Arc<CatalogService>) -> Router {
    let catalog = routes::router().layer(Extension(service));

    Router::new()
        .merge(routes::health_router())
        .merge(catalog)
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::log_requests)))
}
