//! Totals derived from the transaction list

use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub income: f64,
    pub expenses: f64,
    /// income - expenses
    pub balance: f64,
}

impl Summary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let total = |kind: TransactionKind| -> f64 {
            transactions
                .iter()
                .filter(|t| t.kind == kind)
                .map(|t| t.amount)
                .sum()
        };
        let income = total(TransactionKind::Income);
        let expenses = total(TransactionKind::Expense);
        Self {
            income,
            expenses,
            balance: income - expenses,
        }
    }
}
