//! Transaction book (income/expense records) and the metrics derived from it.
//!
//! Independent of the asset ledger.

pub mod metrics;
pub mod transaction;

pub use metrics::{Metrics, Totals, NO_RATE};
pub use transaction::{NewTransaction, Transaction, TransactionBook, TransactionKind};
