//! `bean-n26 identify` - Print the importer handling each file.

use anyhow::Result;
use n26_importer::ImporterRegistry;
use std::io::Write;
use std::path::PathBuf;

/// Print `FILE: <importer>` for every recognized file.
pub fn run<W: Write>(registry: &ImporterRegistry, files: &[PathBuf], out: &mut W) -> Result<()> {
    for file in files {
        match registry.identify(file) {
            Some(importer) => writeln!(out, "{}: {}", file.display(), importer.name())?,
            None => tracing::warn!(file = %file.display(), "not an N26 statement, skipping"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use n26_importer::{N26Config, N26Importer};

    #[test]
    fn test_identify_files() {
        let dir = tempfile::tempdir().unwrap();
        let statement = dir.path().join("n26.csv");
        std::fs::write(
            &statement,
            "\"Datum\",\"Empfänger\",\"Kontonummer\",\"Transaktionstyp\",\"Verwendungszweck\",\"Betrag (EUR)\",\"Betrag (Fremdwährung)\",\"Fremdwährung\",\"Wechselkurs\"\n",
        )
        .unwrap();
        let other = dir.path().join("other.csv");
        std::fs::write(&other, "date,amount\n").unwrap();

        let mut registry = ImporterRegistry::new();
        registry.register(
            N26Importer::new(N26Config::new("DE99", "Assets:N26").language("de")).unwrap(),
        );

        let mut out = Vec::new();
        run(&registry, &[statement.clone(), other], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{}: N26 DE99\n", statement.display())
        );
    }
}
