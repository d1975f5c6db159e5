use axum::Router;

pub mod auth;
pub mod projects;
pub mod resources;
pub mod system;

/// Router for everything mounted under `/api`.
pub fn router() -> Router {
    Router::new()
        .merge(auth::router())
        .nest("/projects", projects::router())
        .nest("/resources", resources::router())
}
