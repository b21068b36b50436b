//! Loading importer sections from a TOML file.
//!
//! Each section configures one N26 account. In a `pyproject.toml` the
//! sections live under `[tool.beancount-n26.<section>]`; a standalone file
//! may put them at the top level instead:
//!
//! ```toml
//! [tool.beancount-n26.ec]
//! iban = "DE99999999999999999999"
//! account_name = "Assets:N26"
//! language = "de"
//! exchange_fees_account = "Expenses:Fees:Exchange"
//!
//! [tool.beancount-n26.ec.account_patterns]
//! "Expenses:Food:Groceries" = ["REWE", "LIDL"]
//! ```

use n26_importer::N26Config;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the table under `[tool]` holding the sections.
pub const TOOL_TABLE: &str = "beancount-n26";

/// Default configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "pyproject.toml";

/// Errors from loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}", .path.display())]
    Read {
        /// Configuration file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The file is not valid TOML.
    #[error("failed to parse {}", .path.display())]
    Parse {
        /// Configuration file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },

    /// The file has no importer sections.
    #[error("tool.beancount-n26 not found in {}", .0.display())]
    MissingTable(PathBuf),

    /// A section does not describe an importer.
    #[error("invalid section `{section}`")]
    InvalidSection {
        /// Section name.
        section: String,
        /// Underlying error.
        #[source]
        source: toml::de::Error,
    },

    /// A requested section is not in the file.
    #[error("section `{0}` not found in the configuration")]
    UnknownSection(String),
}

/// Importer sections by name.
pub type Sections = BTreeMap<String, N26Config>;

/// Read and parse the sections of a configuration file.
pub fn load(path: &Path) -> Result<Sections, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, path)
}

/// Parse the sections of configuration file contents.
///
/// `path` is only used for error messages and to tell a `pyproject.toml`
/// (which must carry `[tool.beancount-n26]`) from a standalone file.
pub fn parse(content: &str, path: &Path) -> Result<Sections, ConfigError> {
    let mut root: toml::Table = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let tool_table = root
        .get_mut("tool")
        .and_then(toml::Value::as_table_mut)
        .and_then(|tool| tool.remove(TOOL_TABLE));

    let table = match tool_table {
        Some(toml::Value::Table(table)) => table,
        Some(_) => return Err(ConfigError::MissingTable(path.to_path_buf())),
        None if is_pyproject(path) || root.contains_key("tool") => {
            return Err(ConfigError::MissingTable(path.to_path_buf()));
        }
        None => root,
    };

    let mut sections = Sections::new();
    for (name, value) in table {
        if !value.is_table() {
            tracing::debug!(key = %name, "skipping non-table configuration key");
            continue;
        }
        let config: N26Config = value
            .try_into()
            .map_err(|source| ConfigError::InvalidSection {
                section: name.clone(),
                source,
            })?;
        sections.insert(name, config);
    }

    if sections.is_empty() {
        return Err(ConfigError::MissingTable(path.to_path_buf()));
    }
    Ok(sections)
}

/// Keep only the named sections; all of them when `names` is empty.
pub fn select(mut sections: Sections, names: &[String]) -> Result<Sections, ConfigError> {
    if names.is_empty() {
        return Ok(sections);
    }
    names
        .iter()
        .map(|name| {
            sections
                .remove_entry(name)
                .ok_or_else(|| ConfigError::UnknownSection(name.clone()))
        })
        .collect()
}

fn is_pyproject(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name == DEFAULT_CONFIG_FILE)
}
