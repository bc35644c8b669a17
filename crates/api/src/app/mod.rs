//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: shared in-memory state (asset ledger, transaction book)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs, input coercion and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router with fresh, empty state.
pub fn build_app() -> Router {
    build_app_with(Arc::new(services::AppServices::new()))
}

/// Build the router around existing state.
pub fn build_app_with(services: Arc<services::AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::trace_requests))
                .layer(Extension(services)),
        )
}
