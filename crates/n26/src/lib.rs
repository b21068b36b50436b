//! Command-line tools for N26 statements.
//!
//! The `bean-n26` binary drives the importers configured in a TOML file:
//!
//! - `bean-n26 identify FILE...`: which configured importer handles a file
//! - `bean-n26 extract FILE...`: print the transactions of statements
//! - `bean-n26 date FILE...`: latest booking date of statements
//! - `bean-n26 patterns LEDGER --by account`: payee patterns from a ledger
//!
//! # Example Usage
//!
//! ```bash
//! bean-n26 --config pyproject.toml extract n26-csv-transactions.csv >> ledger.beancount
//! bean-n26 patterns ledger.beancount --by account -o patterns.json
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod config;
