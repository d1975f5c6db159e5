use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    dto::ApiJson(body): dto::ApiJson<dto::RegisterRequest>,
) -> axum::response::Response {
    match services.register_user(&body.username, &body.password, body.role) {
        Ok(()) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "message": "user registered" })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    dto::ApiJson(body): dto::ApiJson<dto::LoginRequest>,
) -> axum::response::Response {
    match services.login(&body.username, &body.password) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "login successful" })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
