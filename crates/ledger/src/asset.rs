use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use networth_core::{AssetIndex, HistoryId, Money};

pub const UNNAMED_ASSET: &str = "Unnamed";
pub const UNKNOWN_ACCOUNT: &str = "Unknown";

/// A tracked asset. Identified by its position in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    /// Current value, never below zero.
    pub price: Money,
    pub account: String,
}

/// Kind of value-changing event recorded in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Create,
    Adjust,
    Undo,
}

impl HistoryAction {
    /// Only creations and adjustments can be reversed.
    pub fn is_undoable(self) -> bool {
        matches!(self, HistoryAction::Create | HistoryAction::Adjust)
    }
}

/// One recorded value change for one asset (append-only).
///
/// `next == prev + delta` always holds. The only field that ever changes after
/// the entry is appended is `undone`, and only from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: HistoryId,
    pub asset_index: AssetIndex,
    pub action: HistoryAction,
    pub delta: Money,
    pub prev: Money,
    pub next: Money,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub undone: bool,
    /// Set on `undo` entries only: the entry that was reversed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undone_entry: Option<HistoryId>,
}

/// Replace a blank label with a placeholder.
pub(crate) fn label_or(value: &str, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}
