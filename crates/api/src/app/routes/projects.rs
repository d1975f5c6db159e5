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
        .route("/", get(list_projects).post(create_project))
        .route("/:name/inventory", put(update_inventory))
}

pub async fn list_projects(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_projects() {
        Ok(projects) => (StatusCode::OK, Json(projects)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_project(
    Extension(services): Extension<Arc<AppServices>>,
    dto::ApiJson(body): dto::ApiJson<dto::CreateProjectRequest>,
) -> axum::response::Response {
    match services.create_project(&body.name) {
        Ok(()) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "message": "project created" })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Path(project_name): Path<String>,
    dto::ApiJson(body): dto::ApiJson<dto::UpdateInventoryRequest>,
) -> axum::response::Response {
    match services.update_inventory(&project_name, &body.name, body.action, body.quantity) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "inventory updated" })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
