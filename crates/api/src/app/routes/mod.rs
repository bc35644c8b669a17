use axum::{
    routing::{get, post},
    Router,
};

pub mod assets;
pub mod system;
pub mod transactions;

/// Router for the JSON API (mounted under `/api`).
pub fn router() -> Router {
    Router::new()
        .nest("/assets", assets::router())
        .nest("/transactions", transactions::router())
        .route("/metrics", get(transactions::metrics))
        .route("/reset", post(system::reset))
}
