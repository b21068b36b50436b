//! Registry for importers.
//!
//! N26 exports carry no IBAN, so two configured accounts with the same
//! language recognize the same files. The registry resolves that by
//! registration order and logs the ambiguity.

use crate::{ImportResult, Importer};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;
use std::sync::Arc;

/// Importers in registration order.
pub struct ImporterRegistry {
    importers: Vec<Arc<dyn Importer>>,
}

impl std::fmt::Debug for ImporterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImporterRegistry")
            .field("len", &self.importers.len())
            .finish_non_exhaustive()
    }
}

impl ImporterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            importers: Vec::new(),
        }
    }

    /// Register a new importer.
    pub fn register(&mut self, importer: impl Importer + 'static) {
        tracing::debug!(importer = importer.name(), "registering importer");
        self.importers.push(Arc::new(importer));
    }

    /// Every importer that recognizes the file, in registration order.
    pub fn matching(&self, path: &Path) -> Vec<Arc<dyn Importer>> {
        self.importers
            .iter()
            .filter(|importer| importer.identify(path))
            .cloned()
            .collect()
    }

    /// The first importer that recognizes the file.
    pub fn identify(&self, path: &Path) -> Option<Arc<dyn Importer>> {
        let mut matching = self.matching(path).into_iter();
        let first = matching.next();
        match &first {
            None => tracing::debug!(file = %path.display(), "no importer recognizes file"),
            Some(chosen) => {
                let others: Vec<String> = matching.map(|i| i.name().to_string()).collect();
                if !others.is_empty() {
                    tracing::warn!(
                        file = %path.display(),
                        chosen = chosen.name(),
                        ?others,
                        "several importers recognize file, using the first"
                    );
                }
            }
        }
        first
    }

    fn importer_for(&self, path: &Path) -> Result<Arc<dyn Importer>> {
        self.identify(path)
            .with_context(|| format!("no importer recognizes {}", path.display()))
    }

    /// Extract transactions with the importer that recognizes the file.
    pub fn extract(&self, path: &Path) -> Result<ImportResult> {
        self.importer_for(path)?
            .extract(path)
            .with_context(|| format!("failed to extract {}", path.display()))
    }

    /// Statement date with the importer that recognizes the file.
    pub fn date(&self, path: &Path) -> Result<Option<NaiveDate>> {
        self.importer_for(path)?
            .date(path)
            .with_context(|| format!("failed to read date from {}", path.display()))
    }

    /// Name and description of every registered importer.
    pub fn list_importers(&self) -> Vec<(&str, &str)> {
        self.importers
            .iter()
            .map(|i| (i.name(), i.description()))
            .collect()
    }

    /// Number of registered importers.
    pub fn len(&self) -> usize {
        self.importers.len()
    }

    /// Whether no importer is registered.
    pub fn is_empty(&self) -> bool {
        self.importers.is_empty()
    }
}

impl Default for ImporterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
