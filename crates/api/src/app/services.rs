//! Application state shared by all handlers.
//!
//! The ledger and the transaction book live behind one `RwLock`: every
//! mutation takes the write lock for its whole check-then-write sequence,
//! reads share the read lock and always see a consistent snapshot.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use networth_core::{AssetIndex, Event, HistoryId, LedgerResult, Money};
use networth_ledger::{Asset, AssetLedger, HistoryEntry};
use networth_transactions::{Metrics, NewTransaction, Transaction, TransactionBook};

#[derive(Debug, Default)]
pub struct FinanceState {
    pub ledger: AssetLedger,
    pub transactions: TransactionBook,
}

#[derive(Debug, Default)]
pub struct AppServices {
    state: RwLock<FinanceState>,
}

impl AppServices {
    pub fn new() -> Self {
        Self::default()
    }

    // Handlers never leave state half-written (commands are validated before
    // anything is applied), so a poisoned lock still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, FinanceState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FinanceState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------
    // Asset ledger
    // -------------------------

    pub fn list_assets(&self) -> Vec<Asset> {
        self.read().ledger.list_assets()
    }

    pub fn asset_history(&self) -> Vec<HistoryEntry> {
        self.read().ledger.list_history()
    }

    pub fn create_asset(
        &self,
        name: &str,
        price: Money,
        account: &str,
    ) -> LedgerResult<(AssetIndex, Asset)> {
        let (index, asset) = self.write().ledger.create(name, price, account, Utc::now())?;
        tracing::info!(index = %index, name = %asset.name, price = %asset.price, "asset created");
        Ok((index, asset))
    }

    pub fn adjust_asset(&self, index: AssetIndex, amount: Money) -> LedgerResult<Asset> {
        match self.write().ledger.adjust(index, amount, Utc::now()) {
            Ok(asset) => {
                tracing::info!(index = %index, amount = %amount, price = %asset.price, "asset adjusted");
                Ok(asset)
            }
            Err(e) => {
                tracing::warn!(index = %index, amount = %amount, "asset adjustment rejected: {e}");
                Err(e)
            }
        }
    }

    pub fn undo(&self, history_id: HistoryId) -> LedgerResult<(AssetIndex, Asset)> {
        match self.write().ledger.undo(history_id, Utc::now()) {
            Ok((index, asset)) => {
                tracing::info!(history_id = %history_id, index = %index, price = %asset.price, "history entry undone");
                Ok((index, asset))
            }
            Err(e) => {
                tracing::warn!(history_id = %history_id, "undo rejected: {e}");
                Err(e)
            }
        }
    }

    /// Clear assets, asset history and transactions in one step.
    pub fn reset(&self) {
        let mut state = self.write();
        let events = state.ledger.reset(Utc::now());
        state.transactions.clear();
        for event in &events {
            tracing::info!(event_type = event.event_type(), "all data cleared");
        }
    }

    // -------------------------
    // Transactions + metrics
    // -------------------------

    pub fn list_transactions(&self) -> Vec<Transaction> {
        self.read().transactions.list()
    }

    pub fn record_transaction(&self, input: NewTransaction) -> Transaction {
        let today = Utc::now().date_naive();
        let tx = self.write().transactions.record(input, today);
        tracing::info!(amount = %tx.amount, kind = ?tx.kind, category = %tx.category, "transaction recorded");
        tx
    }

    pub fn metrics(&self) -> Metrics {
        Metrics::compute(self.read().transactions.entries())
    }
}
