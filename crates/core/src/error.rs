//! Domain error model.

use thiserror::Error;

use crate::id::HistoryId;
use crate::money::Money;

/// Result type used across the ledger domain.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-level error.
///
/// Every variant rejects exactly one operation and leaves state untouched.
/// Nothing here is fatal to the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The asset index is missing, malformed or out of bounds.
    #[error("invalid asset index: {0}")]
    InvalidIndex(String),

    /// The history id could not be read as an id at all.
    #[error("invalid history id: {0}")]
    InvalidHistoryId(String),

    /// The mutation would break an invariant (negative price, dangling
    /// history reference, undo of an undo entry).
    #[error("invalid state: {reason}")]
    InvalidState {
        reason: String,
        current_price: Option<Money>,
    },

    /// No history entry carries this id.
    #[error("history entry {0} not found")]
    NotFound(HistoryId),

    /// The entry was already reversed.
    #[error("history entry {0} already undone")]
    AlreadyUndone(HistoryId),

    /// The asset changed after the entry was recorded.
    #[error(
        "asset value has changed since history entry {entry} (current: {current}, expected: {expected}); cannot safely undo"
    )]
    StaleState {
        entry: HistoryId,
        current: Money,
        expected: Money,
    },
}

impl LedgerError {
    pub fn invalid_index(msg: impl Into<String>) -> Self {
        Self::InvalidIndex(msg.into())
    }

    pub fn invalid_history_id(msg: impl Into<String>) -> Self {
        Self::InvalidHistoryId(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: msg.into(),
            current_price: None,
        }
    }

    /// An adjustment that would take the price below zero.
    pub fn below_zero(current_price: Money) -> Self {
        Self::InvalidState {
            reason: "asset price cannot go below zero".to_string(),
            current_price: Some(current_price),
        }
    }

    /// Price the caller should know about when reacting to the failure.
    pub fn current_price(&self) -> Option<Money> {
        match self {
            Self::InvalidState { current_price, .. } => *current_price,
            Self::StaleState { current, .. } => Some(*current),
            _ => None,
        }
    }
}
