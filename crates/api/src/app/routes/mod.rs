use axum::{routing::get, Router};

pub mod products;
pub mod system;

/// Router for all catalog endpoints (everything except `/health`).
pub fn router() -> Router {
    Router::new().nest("/products", products::router())
}

/// Liveness endpoint; does not touch the store.
pub fn health_router() -> Router {
    Router::new().route("/health", get(system::health))
}
