//! Transaction records and the newest-first transaction list

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::FinanceError;
use crate::consts::TRANSACTIONS_KEY;
use crate::persistence::Storage;
use crate::platform;

/// Income or expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Opaque unique token (UUID v4)
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Always non-negative; the kind carries the sign
    pub amount: f64,
    pub category: String,
    /// Calendar date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Creation instant, ms since epoch
    pub timestamp: i64,
    #[serde(default)]
    pub description: String,
}

/// Input for [`TransactionStore::add`]
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    /// Defaults to today when `None`
    pub date: Option<NaiveDate>,
    pub description: String,
}

impl NewTransaction {
    pub fn new(kind: TransactionKind, amount: f64, category: impl Into<String>) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            date: None,
            description: String::new(),
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Partial update; `None` fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TransactionPatch {
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl TransactionPatch {
    fn apply(self, tx: &mut Transaction) {
        if let Some(kind) = self.kind {
            tx.kind = kind;
        }
        if let Some(amount) = self.amount {
            tx.amount = amount;
        }
        if let Some(category) = self.category {
            tx.category = category;
        }
        if let Some(date) = self.date {
            tx.date = date;
        }
        if let Some(description) = self.description {
            tx.description = description;
        }
    }
}

fn validate_amount(amount: f64) -> Result<(), FinanceError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(FinanceError::InvalidAmount(amount))
    }
}

/// Transaction list, newest first, mirrored to storage after every change
#[derive(Debug)]
pub struct TransactionStore {
    items: Vec<Transaction>,
    storage: Storage,
}

impl TransactionStore {
    /// Load persisted transactions (empty when nothing is stored)
    pub fn load(storage: Storage) -> Self {
        let items: Vec<Transaction> = storage.load(TRANSACTIONS_KEY, Vec::new());
        log::info!("Loaded {} transactions", items.len());
        Self { items, storage }
    }

    pub fn list(&self) -> &[Transaction] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.items.iter().find(|t| t.id == id)
    }

    /// Record a new transaction at the front of the list
    pub fn add(&mut self, new: NewTransaction) -> Result<&Transaction, FinanceError> {
        validate_amount(new.amount)?;

        let tx = Transaction {
            id: Uuid::new_v4().to_string(),
            kind: new.kind,
            amount: new.amount,
            category: new.category,
            date: new.date.unwrap_or_else(platform::today),
            timestamp: platform::now_ms() as i64,
            description: new.description,
        };
        log::debug!("Adding {} of {}", tx.kind.as_str(), tx.amount);
        self.items.insert(0, tx);
        self.persist();
        Ok(&self.items[0])
    }

    /// Merge `patch` into the matching transaction. Returns false if absent.
    pub fn update(&mut self, id: &str, patch: TransactionPatch) -> Result<bool, FinanceError> {
        if let Some(amount) = patch.amount {
            validate_amount(amount)?;
        }
        let Some(tx) = self.items.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        patch.apply(tx);
        self.persist();
        Ok(true)
    }

    /// Remove the matching transaction. Returns false if absent.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Replace the whole list (imports)
    pub fn replace(&mut self, items: Vec<Transaction>) {
        self.items = items;
        self.persist();
    }

    /// Re-read the list from storage, discarding in-memory state
    pub fn reload(&mut self) {
        self.items = self.storage.load(TRANSACTIONS_KEY, Vec::new());
    }

    fn persist(&self) {
        self.storage.save(TRANSACTIONS_KEY, &self.items);
    }
}
