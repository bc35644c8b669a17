use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/", get(list_transactions).post(record_transaction))
}

pub async fn list_transactions(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    (StatusCode::OK, Json(services.list_transactions())).into_response()
}

pub async fn record_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::RecordTransactionRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let tx = services.record_transaction(body.into());
    (
        StatusCode::OK,
        Json(serde_json::json!({ "success": true, "tx": tx })),
    )
        .into_response()
}

pub async fn metrics(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    (StatusCode::OK, Json(services.metrics())).into_response()
}
