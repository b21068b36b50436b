//! Import N26 bank statements into beancount
//!
//! This crate turns the CSV statements exported by N26 into beancount
//! transactions. It recognizes the export's header in several languages and
//! layouts, maps each row to a transaction (splitting out currency exchange
//! fees), and can classify transactions by payee.
//!
//! # Overview
//!
//! The import flow follows beancount's importer protocol: every importer
//! implements the [`Importer`] trait (`identify`, `account`, `date`,
//! `extract`), and an [`ImporterRegistry`] picks the right one per file.
//!
//! # Example
//!
//! ```rust,no_run
//! use n26_importer::{Importer, N26Config, N26Importer};
//! use std::path::Path;
//!
//! let config = N26Config::new("DE99999999999999999999", "Assets:N26")
//!     .account_patterns("Expenses:Food:Groceries", ["REWE", "LIDL"])
//!     .exchange_fees_account("Expenses:Fees:Exchange");
//! let importer = N26Importer::new(config)?;
//!
//! let path = Path::new("n26-csv-transactions.csv");
//! if importer.identify(path) {
//!     let result = importer.extract(path)?;
//!     println!("{} transactions", result.transactions.len());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod classifier;
pub mod config;
pub mod error;
pub mod header;
pub mod n26_importer;
pub mod patterns;
pub mod registry;
pub mod schema;

use anyhow::Result;
use chrono::NaiveDate;
use n26_core::Transaction;
use std::path::Path;

pub use classifier::PayeeClassifier;
pub use config::N26Config;
pub use error::ImportError;
pub use n26_importer::N26Importer;
pub use patterns::{accounts_to_payees, payees_to_accounts, scan_ledger, LedgerEntry};
pub use registry::ImporterRegistry;
pub use schema::{FieldKey, HeaderSchema, Layout};

/// Result of an import operation.
#[derive(Debug, Clone)]
pub struct ImportResult {
    /// The extracted transactions.
    pub transactions: Vec<Transaction>,
    /// Warnings encountered during import.
    pub warnings: Vec<String>,
}

impl ImportResult {
    /// Create a new import result.
    pub const fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            warnings: Vec::new(),
        }
    }

    /// Create an empty import result.
    pub const fn empty() -> Self {
        Self {
            transactions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add a warning to the result.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

/// Trait for file importers.
///
/// Implementors recognize one statement format and turn files of that
/// format into transactions for one ledger account.
pub trait Importer: Send + Sync {
    /// Returns the name of this importer.
    fn name(&self) -> &str;

    /// Check if this importer can handle the given file.
    ///
    /// This method should be fast - it typically checks file extension,
    /// header patterns, or other quick heuristics.
    fn identify(&self, path: &Path) -> bool;

    /// The ledger account statements of this importer belong to.
    fn account(&self, path: &Path) -> &str;

    /// The statement's date (the latest transaction date), if known.
    fn date(&self, _path: &Path) -> Result<Option<NaiveDate>> {
        Ok(None)
    }

    /// Extract transactions from the given file.
    fn extract(&self, path: &Path) -> Result<ImportResult>;

    /// Returns a description of what this importer handles.
    fn description(&self) -> &str {
        self.name()
    }
}

/// Extract transactions from decoded file contents (useful for testing).
pub fn extract_from_string(content: &str, config: &N26Config) -> Result<ImportResult> {
    let transactions = N26Importer::new(config.clone())?.extract_from_str(content, "<string>")?;
    Ok(ImportResult::new(transactions))
}
