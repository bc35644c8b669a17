use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::services::AppServices;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Development helper: wipe assets, asset history and transactions.
pub async fn reset(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    services.reset();
    Json(serde_json::json!({ "success": true, "message": "Data cleared" }))
}
