//! Error types for the N26 importer.
//!
//! A header that matches none of the known layouts is not an error: the
//! importer reports it as "not my file" through `identify` / an empty
//! result. Everything here aborts the operation that raised it.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building an importer or extracting a statement.
#[derive(Debug, Error)]
pub enum ImportError {
    /// No header table exists for the requested language.
    #[error("language {0} is not supported (yet)")]
    UnsupportedLanguage(String),

    /// The configured file encoding is not a known encoding label.
    #[error("unknown file encoding: {0}")]
    UnsupportedEncoding(String),

    /// The same payee pattern was assigned to two accounts.
    #[error("pattern {pattern:?} is assigned to both {first} and {second}")]
    DuplicatePattern {
        /// The offending pattern string.
        pattern: String,
        /// Account the pattern was first seen under.
        first: String,
        /// Account that claimed it again.
        second: String,
    },

    /// A payee pattern is not a valid regular expression.
    #[error("invalid pattern {pattern:?} for account {account}: {source}")]
    InvalidPattern {
        /// The pattern string as configured.
        pattern: String,
        /// Account the pattern belongs to.
        account: String,
        /// The regex compile error.
        #[source]
        source: regex::Error,
    },

    /// A conversion row needs a fee split but no fee account is configured.
    #[error("line {line}: exchange fee needs a fee account, but exchange_fees_account is not set")]
    MissingFeeAccount {
        /// 1-based line number in the statement.
        line: usize,
    },

    /// A date field could not be parsed as `YYYY-MM-DD`.
    #[error("line {line}: invalid date {value:?}")]
    InvalidDate {
        /// 1-based line number in the statement.
        line: usize,
        /// The raw field value.
        value: String,
        /// The chrono parse error.
        #[source]
        source: chrono::ParseError,
    },

    /// A number field could not be parsed as a decimal.
    #[error("line {line}: invalid {field} {value:?}")]
    InvalidAmount {
        /// 1-based line number in the statement.
        line: usize,
        /// Column label of the field.
        field: String,
        /// The raw field value.
        value: String,
    },

    /// A field the row needs is empty.
    #[error("line {line}: {field} is empty")]
    MissingField {
        /// 1-based line number in the statement.
        line: usize,
        /// Column label of the field.
        field: String,
    },

    /// The header row lacks a column the resolved layout requires.
    #[error("column {0:?} not found in header")]
    MissingColumn(String),

    /// The CSV reader rejected a record.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// IO error reading a statement.
    #[error("failed to read file {}: {source}", .path.display())]
    Io {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl ImportError {
    /// Whether this error comes from importer configuration rather than data.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedLanguage(_)
                | Self::UnsupportedEncoding(_)
                | Self::DuplicatePattern { .. }
                | Self::InvalidPattern { .. }
                | Self::MissingFeeAccount { .. }
        )
    }
}
