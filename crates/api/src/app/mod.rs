//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and wiring
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses
//! - `openapi.rs`: OpenAPI document + Swagger UI

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use storeroom_infra::config::CorsConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod openapi;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<services::AppServices>, cors: &CorsConfig) -> Router {
    routes::router().layer(
        ServiceBuilder::new()
            .layer(middleware::trace_layer())
            .layer(middleware::cors_layer(cors))
            .layer(Extension(services)),
    )
}
