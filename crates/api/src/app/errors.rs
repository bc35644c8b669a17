use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use networth_core::LedgerError;

/// Map a rejected ledger operation to a structured client error.
///
/// The body always carries `success: false`, a readable `error`, a stable
/// `code`, and where relevant `currentPrice` / `expected` so a UI can explain
/// the refusal.
pub fn ledger_error_to_response(err: LedgerError) -> axum::response::Response {
    let message = err.to_string();
    match &err {
        LedgerError::InvalidIndex(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_index", message)
        }
        LedgerError::InvalidHistoryId(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_history_id", message)
        }
        LedgerError::InvalidState { current_price, .. } => json_error_with(
            StatusCode::BAD_REQUEST,
            "invalid_state",
            message,
            current_price.map(|p| json!({ "currentPrice": p })),
        ),
        LedgerError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", message),
        LedgerError::AlreadyUndone(_) => {
            json_error(StatusCode::BAD_REQUEST, "already_undone", message)
        }
        LedgerError::StaleState {
            current, expected, ..
        } => json_error_with(
            StatusCode::BAD_REQUEST,
            "stale_state",
            message,
            Some(json!({ "currentPrice": current, "expected": expected })),
        ),
    }
}

/// Missing content type, unparseable JSON or a non-object body.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    json_error_with(status, code, message, None)
}

/// Like [`json_error`], merging the fields of `extra` (an object) into the body.
pub fn json_error_with(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
    extra: Option<serde_json::Value>,
) -> axum::response::Response {
    let mut body = json!({
        "success": false,
        "error": message.into(),
        "code": code,
    });
    if let (Some(serde_json::Value::Object(extra)), Some(obj)) = (extra, body.as_object_mut()) {
        obj.extend(extra);
    }
    (status, axum::Json(body)).into_response()
}
