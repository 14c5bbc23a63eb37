use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use catalog_core::ProductId;

use crate::app::{dto, errors};
use crate::app::services::CatalogService;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/limit-offset", get(list_products_limit_offset))
        .route("/:id", get(get_product))
}

pub async fn create_product(
    Extension(service): Extension<Arc<CatalogService>>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    let draft = match body.into_draft() {
        Ok(d) => d,
        Err(e) => return errors::catalog_error_to_response(e.into()),
    };

    match service.create_product(draft).await {
        Ok(product) => (StatusCode::CREATED, Json(dto::ProductResponse::from(product))).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(service): Extension<Arc<CatalogService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"),
    };

    match service.get_product(id).await {
        Ok(product) => (StatusCode::OK, Json(dto::ProductResponse::from(product))).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(service): Extension<Arc<CatalogService>>,
    Query(query): Query<dto::PagedListQuery>,
) -> axum::response::Response {
    match service
        .list_products_paged(query.filter(), query.page, query.size)
        .await
    {
        Ok(page) => (StatusCode::OK, Json(page.map(dto::ProductResponse::from))).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn list_products_limit_offset(
    Extension(service): Extension<Arc<CatalogService>>,
    Query(query): Query<dto::LimitOffsetListQuery>,
) -> axum::response::Response {
    match service
        .list_products_limit_offset(query.filter(), query.limit, query.offset)
        .await
    {
        Ok(page) => (StatusCode::OK, Json(page.map(dto::ProductResponse::from))).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}
