//! `bean-n26 patterns` - Generate payee patterns from an existing ledger.
//!
//! The `--by account` mapping has the shape of `account_patterns` and can be
//! pasted into a configuration section.

use super::PatternKey;
use anyhow::{Context, Result};
use n26_importer::{accounts_to_payees, payees_to_accounts, scan_ledger};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Scan `ledger` and write the requested mapping as JSON.
pub fn run<W: Write>(ledger: &Path, by: PatternKey, out: &mut W) -> Result<()> {
    let content = fs::read_to_string(ledger)
        .with_context(|| format!("failed to read {}", ledger.display()))?;
    let entries = scan_ledger(&content);

    let mapping = match by {
        PatternKey::Payee => payees_to_accounts(&entries),
        PatternKey::Account => accounts_to_payees(&entries),
    };
    tracing::info!(
        ledger = %ledger.display(),
        transactions = entries.len(),
        keys = mapping.len(),
        "generated payee patterns"
    );

    writeln!(out, "{}", serde_json::to_string_pretty(&mapping)?)?;
    Ok(())
}
