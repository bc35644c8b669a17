//! Asset ledger: current asset values plus an append-only history of every
//! value change, with single-level undo.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod asset;
pub mod ledger;

pub use asset::{Asset, HistoryAction, HistoryEntry, UNKNOWN_ACCOUNT, UNNAMED_ASSET};
pub use ledger::{
    AdjustAsset, AssetAdjusted, AssetCreated, AssetLedger, CreateAsset, EntryUndone,
    LedgerCommand, LedgerEvent, LedgerReset, ResetLedger, UndoEntry,
};
