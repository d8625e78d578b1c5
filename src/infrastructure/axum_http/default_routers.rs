use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn api_info() -> impl IntoResponse {
    Json(json!({
        "message": "Storefront API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "NOT_FOUND").into_response()
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK").into_response()
}
