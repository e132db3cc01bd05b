//! Export/import of finance data as a single JSON document

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::transaction::Transaction;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("invalid import document: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::Parse(err.to_string())
    }
}

/// Exported document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<String>,
    /// ISO-8601 instant of the export
    pub export_date: String,
}

/// Accepted import document. Either section may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDocument {
    pub transactions: Option<Vec<Transaction>>,
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub export_date: Option<String>,
}

impl ImportDocument {
    pub fn parse(json: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// What an import overwrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Number of transactions written, if the section was present
    pub transactions: Option<usize>,
    /// Number of categories written, if the section was present
    pub categories: Option<usize>,
}

/// Suggested download name, e.g. `expense-tracker-2026-02-18.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("expense-tracker-{}.json", date.format("%Y-%m-%d"))
}
