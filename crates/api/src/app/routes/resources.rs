use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_resources).post(create_resource))
        .route("/:name/required", put(set_required))
        .route("/:name/quantity", put(adjust_quantity))
}

pub async fn list_resources(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_resources() {
        Ok(resources) => (StatusCode::OK, Json(resources)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_resource(
    Extension(services): Extension<Arc<AppServices>>,
    dto::ApiJson(body): dto::ApiJson<dto::CreateResourceRequest>,
) -> axum::response::Response {
    match services.create_resource(&body.name, body.max_units) {
        Ok(()) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "message": "resource created" })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn set_required(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
    dto::ApiJson(body): dto::ApiJson<dto::SetRequiredRequest>,
) -> axum::response::Response {
    match services.set_required_quantity(&name, body.quantity) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "required quantity updated" })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn adjust_quantity(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
    dto::ApiJson(body): dto::ApiJson<dto::AdjustQuantityRequest>,
) -> axum::response::Response {
    match services.adjust_quantity(&name, body.change) {
        Ok(available) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "quantity updated",
                "available_quantity": available,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
