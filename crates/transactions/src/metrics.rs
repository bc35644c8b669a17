use serde::{Deserialize, Serialize};

use networth_core::Money;

use crate::transaction::{Transaction, TransactionKind};

/// Shown in place of a savings rate when there is no income.
pub const NO_RATE: &str = "—";

/// Aggregate figures over the transaction book, rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_balance: String,
    pub monthly_income: String,
    pub monthly_expenses: String,
    pub savings_rate: String,
}

/// Raw totals behind [`Metrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: Money,
    pub expenses: Money,
}

impl Totals {
    pub fn of(transactions: &[Transaction]) -> Self {
        let sum = |kind: TransactionKind| {
            transactions
                .iter()
                .filter(|t| t.kind == kind)
                .map(|t| t.amount)
                .sum::<Money>()
        };
        Self {
            income: sum(TransactionKind::Income),
            expenses: sum(TransactionKind::Expense),
        }
    }

    pub fn balance(&self) -> Money {
        Money::from_cents(self.income.cents().saturating_sub(self.expenses.cents()))
    }

    /// Share of income left after expenses, in whole percent.
    pub fn savings_rate(&self) -> Option<i64> {
        if self.income.cents() <= 0 {
            return None;
        }
        let rate = self.balance().cents() as f64 / self.income.cents() as f64 * 100.0;
        Some(rate.round() as i64)
    }
}

impl Metrics {
    pub fn compute(transactions: &[Transaction]) -> Self {
        let totals = Totals::of(transactions);
        Self {
            total_balance: totals.balance().to_string(),
            monthly_income: totals.income.to_string(),
            monthly_expenses: totals.expenses.to_string(),
            savings_rate: totals
                .savings_rate()
                .map(|r| format!("{r}%"))
                .unwrap_or_else(|| NO_RATE.to_string()),
        }
    }
}
