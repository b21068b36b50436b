//! `bean-n26 date` - Print the latest booking date of statements.

use anyhow::{Context, Result};
use n26_importer::ImporterRegistry;
use std::io::Write;
use std::path::PathBuf;

/// Print `FILE: YYYY-MM-DD` for every recognized file with transactions.
pub fn run<W: Write>(registry: &ImporterRegistry, files: &[PathBuf], out: &mut W) -> Result<()> {
    for file in files {
        let Some(importer) = registry.identify(file) else {
            tracing::warn!(file = %file.display(), "not an N26 statement, skipping");
            continue;
        };
        let date = importer
            .date(file)
            .with_context(|| format!("failed to read date from {}", file.display()))?;
        match date {
            Some(date) => writeln!(out, "{}: {date}", file.display())?,
            None => tracing::warn!(file = %file.display(), "statement has no transactions"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use n26_importer::{N26Config, N26Importer};

    const HEADER: &str = "\"Date\",\"Payee\",\"Account number\",\"Transaction type\",\"Payment reference\",\"Amount (EUR)\",\"Amount (Foreign Currency)\",\"Type Foreign Currency\",\"Exchange Rate\"\n";

    fn registry() -> ImporterRegistry {
        let mut registry = ImporterRegistry::new();
        registry.register(N26Importer::new(N26Config::new("DE99", "Assets:N26")).unwrap());
        registry
    }

    #[test]
    fn test_latest_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("n26.csv");
        std::fs::write(
            &path,
            format!(
                "{HEADER}\"2020-02-01\",\"A\",\"\",\"x\",\"\",\"-1.00\",\"\",\"\",\"\"\n\
                 \"2020-03-15\",\"B\",\"\",\"x\",\"\",\"-2.00\",\"\",\"\",\"\"\n\
                 \"2020-01-10\",\"C\",\"\",\"x\",\"\",\"-3.00\",\"\",\"\",\"\"\n"
            ),
        )
        .unwrap();

        let mut out = Vec::new();
        run(&registry(), &[path.clone()], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{}: 2020-03-15\n", path.display())
        );
    }

    #[test]
    fn test_header_only_statement_prints_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("n26.csv");
        std::fs::write(&path, HEADER).unwrap();

        let mut out = Vec::new();
        run(&registry(), &[path], &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_bad_date_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("n26.csv");
        std::fs::write(
            &path,
            format!("{HEADER}\"10.10.2019\",\"A\",\"\",\"x\",\"\",\"-1.00\",\"\",\"\",\"\"\n"),
        )
        .unwrap();

        let err = run(&registry(), &[path], &mut Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("10.10.2019"));
    }
}
