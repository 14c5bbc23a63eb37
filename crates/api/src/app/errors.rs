use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::app::services::CatalogError;

pub fn catalog_error_to_response(err: CatalogError) -> axum::response::Response {
    match err {
        CatalogError::Conflict { .. } => json_error(StatusCode::CONFLICT, "conflict", err.to_string()),
        CatalogError::NotFound { .. } => json_error(StatusCode::NOT_FOUND, "not_found", err.to_string()),
        CatalogError::InvalidInput(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_input", msg),
        CatalogError::Unavailable => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            err.to_string(),
        ),
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> axum::response::Response {
        catalog_error_to_response(self)
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
