use axum::{routing::get, Router};

pub mod products;
pub mod system;

/// Router for every endpoint the service exposes, plus the API docs.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .merge(products::router())
        .merge(crate::app::openapi::swagger_ui())
}
