//! `bean-n26 extract` - Print the transactions of N26 statements.
//!
//! Files no configured importer recognizes are skipped with a warning.
//! Transactions of all files are merged and sorted by date before printing.
//!
//! # Usage
//!
//! ```bash
//! bean-n26 extract n26-csv-transactions.csv >> ledger.beancount
//! bean-n26 --section joint extract joint.csv --format json
//! ```

use super::OutputFormat;
use anyhow::{Context, Result};
use n26_core::{format_transaction, sort_transactions, FormatConfig, Transaction};
use n26_importer::ImporterRegistry;
use std::io::Write;
use std::path::PathBuf;

/// Extract every recognized file and write the merged transactions.
pub fn run<W: Write>(
    registry: &ImporterRegistry,
    files: &[PathBuf],
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let mut transactions: Vec<Transaction> = Vec::new();
    let mut extracted_files = 0;

    for file in files {
        let Some(importer) = registry.identify(file) else {
            tracing::warn!(file = %file.display(), "not an N26 statement, skipping");
            continue;
        };

        let result = importer
            .extract(file)
            .with_context(|| format!("failed to extract {}", file.display()))?;

        for warning in &result.warnings {
            eprintln!("warning: {warning}");
        }
        extracted_files += 1;
        transactions.extend(result.transactions);
    }

    sort_transactions(&mut transactions);

    match format {
        OutputFormat::Text => {
            let fmt_config = FormatConfig::default();
            for txn in &transactions {
                write!(out, "{}", format_transaction(txn, &fmt_config))?;
                writeln!(out)?;
            }
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&transactions)?)?;
        }
    }

    eprintln!(
        "Extracted {} transactions from {extracted_files} of {} files",
        transactions.len(),
        files.len()
    );
    Ok(())
}
