use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use networth_core::Money;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_assets).post(create_asset))
        .route("/add-amount", post(adjust_asset))
        .route("/history", get(asset_history))
        .route("/undo", post(undo_history_entry))
}

pub async fn list_assets(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    (StatusCode::OK, Json(services.list_assets())).into_response()
}

pub async fn create_asset(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::CreateAssetRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let price = Money::coerce(body.price.as_ref());
    let name = dto::text(body.name.as_ref()).unwrap_or_default();
    let account = dto::text(body.account.as_ref()).unwrap_or_default();

    match services.create_asset(&name, price, &account) {
        Ok((index, asset)) => (StatusCode::OK, Json(dto::asset_to_json(index, asset))).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

/// Add to (or, with a negative amount, reduce) an asset's value.
pub async fn adjust_asset(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::AdjustAssetRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let index = match dto::parse_asset_index(body.index.as_ref()) {
        Ok(i) => i,
        Err(e) => return errors::ledger_error_to_response(e),
    };
    let amount = Money::coerce(body.amount.as_ref());

    match services.adjust_asset(index, amount) {
        Ok(asset) => (StatusCode::OK, Json(dto::asset_to_json(index, asset))).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn asset_history(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    (StatusCode::OK, Json(services.asset_history())).into_response()
}

pub async fn undo_history_entry(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::UndoRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let history_id = match dto::parse_history_id(body.history_id.as_ref()) {
        Ok(id) => id,
        Err(e) => return errors::ledger_error_to_response(e),
    };

    match services.undo(history_id) {
        Ok((index, asset)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "asset": asset,
                "index": index,
                "undoneHistoryId": history_id,
            })),
        )
            .into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}
