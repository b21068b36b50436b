//! Ledger types for n26 statement imports
//!
//! This crate provides the beancount-shaped records produced by the importer:
//!
//! - [`Amount`] - A decimal number with a currency
//! - [`CostSpec`] - Conversion rate attached to a posting
//! - [`Posting`] - One account leg of a transaction
//! - [`Transaction`] - A dated, flagged list of postings
//!
//! and [`format_transaction`] to render them as beancount text.
//!
//! # Example
//!
//! ```
//! use n26_core::{format_transaction, Amount, FormatConfig, Posting, Transaction};
//! use rust_decimal_macros::dec;
//! use chrono::NaiveDate;
//!
//! let txn = Transaction::new(NaiveDate::from_ymd_opt(2019, 10, 10).unwrap(), "Muster GmbH")
//!     .with_payee("MAX MUSTERMANN")
//!     .with_posting(Posting::new("Assets:N26", Amount::new(dec!(-12.34), "EUR")))
//!     .with_posting(Posting::auto("Expenses:Misc"));
//!
//! let text = format_transaction(&txn, &FormatConfig::default());
//! assert!(text.starts_with("2019-10-10 * \"MAX MUSTERMANN\" \"Muster GmbH\""));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod amount;
pub mod cost;
pub mod directive;
pub mod format;

pub use amount::Amount;
pub use cost::CostSpec;
pub use directive::{sort_transactions, MetaValue, Metadata, Posting, Transaction};
pub use format::{format_transaction, FormatConfig};

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
