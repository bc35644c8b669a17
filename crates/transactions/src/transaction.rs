use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use networth_core::Money;

pub const NO_DESCRIPTION: &str = "No description";
pub const DEFAULT_CATEGORY: &str = "Other";

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// `income` (any case) is income; everything else is an expense.
    pub fn parse_lenient(s: Option<&str>) -> Self {
        match s.map(|s| s.trim().to_ascii_lowercase()) {
            Some(s) if s == "income" => TransactionKind::Income,
            _ => TransactionKind::Expense,
        }
    }
}

/// A recorded income or expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// Loosely filled input for [`TransactionBook::record`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTransaction {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount: Money,
    pub category: Option<String>,
    pub kind: Option<TransactionKind>,
}

/// Append-only list of transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionBook {
    entries: Vec<Transaction>,
}

impl TransactionBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transaction, filling blanks with defaults. `today` backs a
    /// missing date.
    pub fn record(&mut self, input: NewTransaction, today: NaiveDate) -> Transaction {
        let tx = Transaction {
            date: input.date.unwrap_or(today),
            description: non_blank(input.description).unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            amount: input.amount,
            category: non_blank(input.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            kind: input.kind.unwrap_or(TransactionKind::Expense),
        };
        self.entries.push(tx.clone());
        tx
    }

    /// Snapshot, most recent first.
    pub fn list(&self) -> Vec<Transaction> {
        self.entries.iter().rev().cloned().collect()
    }

    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
