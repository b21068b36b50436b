//! Command implementations for `bean-n26`.
//!
//! [`main`] parses the command line, installs logging and dispatches to the
//! subcommand modules. Each module holds the full implementation of one
//! subcommand and writes its output to a caller-supplied writer.

pub mod date_cmd;
pub mod extract_cmd;
pub mod identify_cmd;
pub mod patterns_cmd;

use crate::config::{self, DEFAULT_CONFIG_FILE};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use n26_importer::{Importer, ImporterRegistry, N26Importer};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Import N26 bank statements into beancount.
#[derive(Parser, Debug)]
#[command(name = "bean-n26")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file holding the importer sections
    #[arg(short, long, global = true, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Only use this section (can be specified multiple times)
    #[arg(short, long = "section", value_name = "NAME", global = true)]
    pub sections: Vec<String>,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the importer handling each file
    Identify {
        /// Statement files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the transactions of statement files
    Extract {
        /// Statement files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format (text or json)
        #[arg(long, short = 'f', value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the latest booking date of statement files
    Date {
        /// Statement files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Generate payee patterns from an existing ledger
    Patterns {
        /// The beancount file to read
        ledger: PathBuf,

        /// Key of the generated mapping
        #[arg(long, value_enum, default_value = "account")]
        by: PatternKey,

        /// Write the JSON to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Output format for extracted transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Beancount text (default)
    #[default]
    Text,
    /// JSON array of transactions
    Json,
}

/// Key of a generated pattern mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PatternKey {
    /// Payee → accounts it was booked against
    Payee,
    /// Account → payees booked against it
    Account,
}

/// Main entry point for `bean-n26`.
pub fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Logs go to stderr; stdout carries the ledger output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,n26=info,n26_importer=info"))
    };

    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(args: &Args) -> Result<()> {
    let mut stdout = io::stdout().lock();

    match &args.command {
        Command::Identify { files } => {
            let registry = load_registry(&args.config, &args.sections)?;
            identify_cmd::run(&registry, files, &mut stdout)
        }
        Command::Extract { files, format } => {
            let registry = load_registry(&args.config, &args.sections)?;
            extract_cmd::run(&registry, files, *format, &mut stdout)
        }
        Command::Date { files } => {
            let registry = load_registry(&args.config, &args.sections)?;
            date_cmd::run(&registry, files, &mut stdout)
        }
        Command::Patterns { ledger, by, output } => match output {
            Some(path) => {
                let mut file = std::fs::File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                patterns_cmd::run(ledger, *by, &mut file)?;
                file.flush()?;
                eprintln!("Wrote patterns to {}", path.display());
                Ok(())
            }
            None => patterns_cmd::run(ledger, *by, &mut stdout),
        },
    }
}

/// Build one importer per configured section.
pub fn load_registry(config_path: &Path, sections: &[String]) -> Result<ImporterRegistry> {
    let sections = config::select(config::load(config_path)?, sections)?;

    let mut registry = ImporterRegistry::new();
    for (name, section) in sections {
        let importer = N26Importer::new(section)
            .with_context(|| format!("invalid section `{name}` in {}", config_path.display()))?;
        tracing::debug!(section = %name, importer = importer.name(), "registered importer");
        registry.register(importer);
    }
    Ok(registry)
}
