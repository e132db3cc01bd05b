//! Personal finance tracker
//!
//! `FinanceTracker` owns the category and transaction stores of one app
//! instance. Both stores share a [`Storage`] handle and write through to it
//! after every mutation.

pub mod category;
pub mod summary;
pub mod transaction;
pub mod transfer;

pub use category::{CategoryStore, DEFAULT_CATEGORIES};
pub use summary::Summary;
pub use transaction::{
    NewTransaction, Transaction, TransactionKind, TransactionPatch, TransactionStore,
};
pub use transfer::{ExportBundle, ImportDocument, ImportError, ImportReport, export_file_name};

use thiserror::Error;

use crate::consts::{CATEGORIES_KEY, TRANSACTIONS_KEY};
use crate::persistence::Storage;
use crate::platform;

#[derive(Error, Debug, PartialEq)]
pub enum FinanceError {
    #[error("amount must be a non-negative number, got {0}")]
    InvalidAmount(f64),
}

#[derive(Debug)]
pub struct FinanceTracker {
    pub transactions: TransactionStore,
    pub categories: CategoryStore,
    storage: Storage,
}

impl FinanceTracker {
    pub fn load(storage: Storage) -> Self {
        Self {
            transactions: TransactionStore::load(storage.clone()),
            categories: CategoryStore::load(storage.clone()),
            storage,
        }
    }

    pub fn summary(&self) -> Summary {
        Summary::from_transactions(self.transactions.list())
    }

    /// Snapshot of the current data
    pub fn export(&self) -> ExportBundle {
        ExportBundle {
            transactions: self.transactions.list().to_vec(),
            categories: self.categories.list().to_vec(),
            export_date: platform::datetime_from_ms(platform::now_ms()).to_rfc3339(),
        }
    }

    /// Pretty-printed export document
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.export())
    }

    pub fn export_file_name(&self) -> String {
        export_file_name(platform::today())
    }

    /// Overwrite the sections present in `json`. Missing sections are left
    /// alone.
    pub fn import_json(&mut self, json: &str) -> Result<ImportReport, ImportError> {
        let doc = ImportDocument::parse(json).inspect_err(|err| {
            log::error!("Error importing data: {err}");
        })?;

        let mut report = ImportReport::default();
        if let Some(transactions) = doc.transactions {
            report.transactions = Some(transactions.len());
            self.transactions.replace(transactions);
        }
        if let Some(categories) = doc.categories {
            report.categories = Some(categories.len());
            self.categories.replace(categories);
        }

        log::info!(
            "Imported {} transactions, {} categories",
            report.transactions.unwrap_or(0),
            report.categories.unwrap_or(0)
        );
        Ok(report)
    }

    /// Drop all persisted finance data and empty the transaction list
    pub fn clear_all(&mut self) {
        self.storage.clear(&[TRANSACTIONS_KEY, CATEGORIES_KEY]);
        self.transactions.reload();
        self.categories.reload();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{KeyValueStore, PersistenceError};

    fn tracker() -> FinanceTracker {
        FinanceTracker::load(Storage::in_memory())
    }

    #[test]
    fn test_export_then_import_into_fresh_tracker() {
        let mut source = tracker();
        source
            .transactions
            .add(NewTransaction::new(TransactionKind::Income, 100.0, "Salary"))
            .unwrap();
        source.categories.add("Books");
        let json = source.export_json().unwrap();

        let mut target = tracker();
        let report = target.import_json(&json).unwrap();
        assert_eq!(report.transactions, Some(1));
        assert_eq!(report.categories, Some(DEFAULT_CATEGORIES.len() + 1));
        assert_eq!(target.transactions.list(), source.transactions.list());
        assert!(target.categories.contains("Books"));
        assert_eq!(target.summary().income, 100.0);
    }

    #[test]
    fn test_export_document_shape() {
        let json = tracker().export_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["transactions"].is_array());
        assert!(value["categories"].is_array());
        assert!(value["exportDate"].is_string());
    }

    #[test]
    fn test_import_missing_section_keeps_existing() {
        let mut tracker = tracker();
        tracker
            .transactions
            .add(NewTransaction::new(TransactionKind::Expense, 3.0, "Dining"))
            .unwrap();

        let report = tracker.import_json(r#"{"categories":["Only"]}"#).unwrap();
        assert_eq!(report.transactions, None);
        assert_eq!(tracker.transactions.len(), 1);
        assert_eq!(tracker.categories.list(), ["Only"]);
    }

    /// Backend that can neither read nor write
    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
            Err(PersistenceError::Unavailable)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable)
        }
        fn remove(&self, _key: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable)
        }
    }

    #[test]
    fn test_import_applies_in_memory_when_storage_fails() {
        let mut tracker = FinanceTracker::load(Storage::new(FailingStore));
        tracker
            .transactions
            .add(NewTransaction::new(TransactionKind::Income, 50.0, "Salary"))
            .unwrap();

        let report = tracker.import_json(r#"{"categories":["Only"]}"#).unwrap();
        assert_eq!(report.categories, Some(1));
        assert_eq!(tracker.transactions.len(), 1);
        assert_eq!(tracker.categories.list(), ["Only"]);
        assert_eq!(tracker.summary().income, 50.0);
    }

    #[test]
    fn test_import_parse_failure_reports_error() {
        let mut tracker = tracker();
        let err = tracker.import_json("{\"transactions\": 5}").unwrap_err();
        assert!(matches!(err, ImportError::Parse(_)));
        assert_eq!(tracker.categories.list().len(), DEFAULT_CATEGORIES.len());
    }

    #[test]
    fn test_clear_all() {
        let mut tracker = tracker();
        tracker
            .transactions
            .add(NewTransaction::new(TransactionKind::Expense, 3.0, "Dining"))
            .unwrap();
        tracker.categories.remove("Dining");

        tracker.clear_all();
        assert!(tracker.transactions.is_empty());
        assert!(tracker.categories.contains("Dining"));
    }
}
