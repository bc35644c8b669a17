use chrono::NaiveDate;
use serde::Deserialize;

use networth_core::{AssetIndex, HistoryId, LedgerError, Money};
use networth_ledger::Asset;
use networth_transactions::{NewTransaction, TransactionKind};

// -------------------------
// Request DTOs
// -------------------------
//
// Fields arrive loosely typed (numbers or numeric strings from HTML forms,
// numbers where a label is expected), so they are taken as raw JSON values
// and coerced here.

#[derive(Debug, Default, Deserialize)]
pub struct CreateAssetRequest {
    #[serde(default)]
    pub name: Option<serde_json::Value>,
    #[serde(default)]
    pub price: Option<serde_json::Value>,
    #[serde(default)]
    pub account: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdjustAssetRequest {
    #[serde(default)]
    pub index: Option<serde_json::Value>,
    #[serde(default)]
    pub amount: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UndoRequest {
    #[serde(default, rename = "historyId")]
    pub history_id: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordTransactionRequest {
    #[serde(default)]
    pub date: Option<serde_json::Value>,
    #[serde(default)]
    pub description: Option<serde_json::Value>,
    #[serde(default)]
    pub amount: Option<serde_json::Value>,
    #[serde(default)]
    pub category: Option<serde_json::Value>,
    #[serde(default, rename = "type")]
    pub kind: Option<serde_json::Value>,
}

impl From<RecordTransactionRequest> for NewTransaction {
    fn from(req: RecordTransactionRequest) -> Self {
        NewTransaction {
            // Unparseable dates fall back to today, like missing ones.
            date: text(req.date.as_ref())
                .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok()),
            description: text(req.description.as_ref()),
            amount: Money::coerce(req.amount.as_ref()),
            category: text(req.category.as_ref()),
            kind: Some(TransactionKind::parse_lenient(text(req.kind.as_ref()).as_deref())),
        }
    }
}

// -------------------------
// Input coercion
// -------------------------

/// Read a label out of a JSON string or number. Anything else counts as blank.
pub fn text(value: Option<&serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a non-negative integer out of a JSON number or numeric string.
fn whole_number(value: Option<&serde_json::Value>) -> Result<u64, String> {
    match value {
        None | Some(serde_json::Value::Null) => Err("missing".to_string()),
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                    .map(|f| f as u64)
            })
            .ok_or_else(|| format!("{n} is not a non-negative integer")),
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| format!("{s:?} is not a non-negative integer")),
        Some(other) => Err(format!("{other} is not a number")),
    }
}

pub fn parse_asset_index(value: Option<&serde_json::Value>) -> Result<AssetIndex, LedgerError> {
    let raw = whole_number(value).map_err(LedgerError::invalid_index)?;
    usize::try_from(raw)
        .map(AssetIndex::new)
        .map_err(|_| LedgerError::invalid_index(format!("{raw} is out of range")))
}

pub fn parse_history_id(value: Option<&serde_json::Value>) -> Result<HistoryId, LedgerError> {
    whole_number(value)
        .map(HistoryId::new)
        .map_err(LedgerError::invalid_history_id)
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn asset_to_json(index: AssetIndex, asset: Asset) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "asset": asset,
        "index": index,
    })
}
