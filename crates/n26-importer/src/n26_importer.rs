//! N26 CSV statement importer.

use crate::classifier::PayeeClassifier;
use crate::config::N26Config;
use crate::error::ImportError;
use crate::header::{self, Column, ColumnMap};
use crate::schema::{self, HeaderSchema};
use crate::{ImportResult, Importer};
use chrono::NaiveDate;
use csv::StringRecord;
use encoding_rs::Encoding;
use n26_core::{Amount, CostSpec, MetaValue, Posting, Transaction};
use rust_decimal::Decimal;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Flag set on every imported transaction.
pub const FLAG: char = '*';

/// Date format of the statement's date column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Importer for CSV statements exported from N26.
///
/// Construction validates the whole configuration (language, encoding,
/// payee patterns), so a built importer only fails on file contents.
#[derive(Debug)]
pub struct N26Importer {
    config: N26Config,
    name: String,
    description: String,
    encoding: &'static Encoding,
    classifier: PayeeClassifier,
}

/// File contents decoded with the configured encoding.
struct Decoded {
    content: String,
    had_errors: bool,
}

impl N26Importer {
    /// Create an importer, validating the configuration.
    pub fn new(config: N26Config) -> Result<Self, ImportError> {
        if !schema::is_language_supported(&config.language) {
            return Err(ImportError::UnsupportedLanguage(config.language));
        }

        let encoding = Encoding::for_label(config.file_encoding.trim().as_bytes())
            .ok_or_else(|| ImportError::UnsupportedEncoding(config.file_encoding.clone()))?;

        let classifier = PayeeClassifier::new(&config.account_patterns)?;

        Ok(Self {
            name: format!("N26 {}", config.iban),
            description: format!("N26 CSV statement ({}) for {}", config.language, config.account_name),
            config,
            encoding,
            classifier,
        })
    }

    /// The configuration this importer was built from.
    pub const fn config(&self) -> &N26Config {
        &self.config
    }

    /// The compiled payee classifier.
    pub const fn classifier(&self) -> &PayeeClassifier {
        &self.classifier
    }

    /// Check a raw header line against the layouts of the configured language.
    pub fn is_valid_header(&self, line: &str) -> bool {
        self.resolve_header(line).is_some()
    }

    /// Resolve the layout from the first line of `content`.
    pub fn resolve_header(&self, content: &str) -> Option<&'static HeaderSchema> {
        let first_line = content.lines().next().unwrap_or("");
        header::resolve(&self.config.language, first_line)
    }

    /// Extract transactions from decoded statement contents.
    ///
    /// Returns no transactions when the header is not an N26 header. Any
    /// malformed row aborts the whole extraction.
    pub fn extract_from_str(
        &self,
        content: &str,
        filename: &str,
    ) -> Result<Vec<Transaction>, ImportError> {
        let Some(schema) = self.resolve_header(content) else {
            return Ok(Vec::new());
        };

        let mut reader = csv_reader(content);
        let columns = ColumnMap::new(schema, reader.headers()?)?;

        let mut transactions = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result?;
            transactions.push(self.map_row(&columns, &record, index, filename)?);
        }
        Ok(transactions)
    }

    /// Latest booking date in decoded statement contents.
    ///
    /// `None` when the header is not recognized or there are no rows.
    pub fn date_from_str(&self, content: &str) -> Result<Option<NaiveDate>, ImportError> {
        let Some(schema) = self.resolve_header(content) else {
            return Ok(None);
        };

        let mut reader = csv_reader(content);
        let columns = ColumnMap::new(schema, reader.headers()?)?;

        let mut latest = None;
        for (index, result) in reader.records().enumerate() {
            let record = result?;
            let date = parse_date(columns.date(), &record, line_of(&record, index))?;
            latest = latest.max(Some(date));
        }
        Ok(latest)
    }

    /// Build the transaction for one data row.
    fn map_row(
        &self,
        columns: &ColumnMap,
        record: &StringRecord,
        index: usize,
        filename: &str,
    ) -> Result<Transaction, ImportError> {
        let line = line_of(record, index);
        let date = parse_date(columns.date(), record, line)?;
        let payee = columns.payee().get(record);
        let narration = columns.payment_reference().get(record);

        let mut txn = Transaction::new(date, narration)
            .with_flag(FLAG)
            .with_meta("filename", MetaValue::String(filename.to_string()))
            .with_meta("lineno", MetaValue::Number(Decimal::from(index)));

        if !payee.is_empty() {
            txn = txn.with_payee(payee);
        }

        for posting in self.amount_postings(columns, record, line)? {
            txn = txn.with_posting(posting);
        }

        if let Some(account) = self.classifier.classify(payee) {
            txn = txn.with_posting(Posting::auto(account));
        }

        Ok(txn)
    }

    /// Postings carrying the row's money.
    ///
    /// - home amount only: one posting in the home currency
    /// - no home amount: one posting in the original currency
    /// - home amount plus original amount, currency and rate: the bank's
    ///   exchange fee is split out and the rest is booked at the rate
    fn amount_postings(
        &self,
        columns: &ColumnMap,
        record: &StringRecord,
        line: usize,
    ) -> Result<Vec<Posting>, ImportError> {
        let account = self.config.account_name.as_str();
        let home = self.config.currency.as_str();
        let foreign_currency = columns.type_foreign_currency().trimmed(record);

        if columns.amount_eur().trimmed(record).is_empty() {
            let number = parse_decimal(columns.amount_foreign_currency(), record, line)?;
            if foreign_currency.is_empty() {
                return Err(ImportError::MissingField {
                    line,
                    field: columns.type_foreign_currency().label().to_string(),
                });
            }
            return Ok(vec![Posting::new(
                account,
                Amount::new(number, foreign_currency),
            )]);
        }

        let amount_home = parse_decimal(columns.amount_eur(), record, line)?;

        let is_conversion = !columns.amount_foreign_currency().trimmed(record).is_empty()
            && !columns.exchange_rate().trimmed(record).is_empty()
            && !foreign_currency.is_empty();
        if !is_conversion {
            return Ok(vec![Posting::new(account, Amount::new(amount_home, home))]);
        }

        let amount_foreign = parse_decimal(columns.amount_foreign_currency(), record, line)?;
        let rate = parse_decimal(columns.exchange_rate(), record, line)?;
        let converted = amount_foreign
            .checked_div(rate)
            .ok_or_else(|| invalid_amount(columns.exchange_rate(), record, line))?;
        let fee = Amount::new(amount_home + converted.abs(), home);

        let mut postings = Vec::with_capacity(3);
        if !fee.number.is_zero() {
            let fee_account = self
                .config
                .exchange_fees_account
                .as_deref()
                .ok_or(ImportError::MissingFeeAccount { line })?;
            postings.push(Posting::new(account, -&fee));
            postings.push(Posting::new(fee_account, fee.clone()));
        }
        postings.push(
            Posting::new(account, Amount::new(amount_home - fee.number, home))
                .with_cost(CostSpec::per_unit(rate, foreign_currency)),
        );
        Ok(postings)
    }

    /// Read and decode a whole statement.
    fn read_file(&self, path: &Path) -> Result<Decoded, ImportError> {
        let bytes = fs::read(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (content, _, had_errors) = self.encoding.decode(&bytes);
        Ok(Decoded {
            content: content.into_owned(),
            had_errors,
        })
    }

    /// Read and decode only the header line of a statement.
    fn read_header_line(&self, path: &Path) -> Result<String, ImportError> {
        let io_error = |source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_error)?;
        let mut bytes = Vec::new();
        BufReader::new(file)
            .read_until(b'\n', &mut bytes)
            .map_err(io_error)?;
        let (line, _, _) = self.encoding.decode(&bytes);
        Ok(line.into_owned())
    }
}

impl Importer for N26Importer {
    fn name(&self) -> &str {
        &self.name
    }

    fn identify(&self, path: &Path) -> bool {
        match self.read_header_line(path) {
            Ok(line) => self.is_valid_header(&line),
            Err(e) => {
                tracing::debug!(file = %path.display(), error = %e, "cannot identify file");
                false
            }
        }
    }

    fn account(&self, _path: &Path) -> &str {
        &self.config.account_name
    }

    fn date(&self, path: &Path) -> anyhow::Result<Option<NaiveDate>> {
        let decoded = self.read_file(path)?;
        Ok(self.date_from_str(&decoded.content)?)
    }

    fn extract(&self, path: &Path) -> anyhow::Result<ImportResult> {
        let decoded = self.read_file(path)?;
        let filename = path.display().to_string();
        let transactions = self.extract_from_str(&decoded.content, &filename)?;
        tracing::info!(
            file = %filename,
            importer = %self.name,
            transactions = transactions.len(),
            "extracted statement"
        );

        let mut result = ImportResult::new(transactions);
        if decoded.had_errors && !result.transactions.is_empty() {
            result = result.with_warning(format!(
                "{filename}: some bytes are not valid {}; they were replaced",
                self.encoding.name()
            ));
        }
        Ok(result)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

fn csv_reader(content: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .quote(b'"')
        .from_reader(content.as_bytes())
}

/// 1-based line of a record, falling back to header + row index.
fn line_of(record: &StringRecord, index: usize) -> usize {
    record
        .position()
        .map_or(index + 2, |pos| pos.line() as usize)
}

fn parse_date(column: &Column, record: &StringRecord, line: usize) -> Result<NaiveDate, ImportError> {
    let value = column.trimmed(record);
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| ImportError::InvalidDate {
        line,
        value: value.to_string(),
        source,
    })
}

fn parse_decimal(column: &Column, record: &StringRecord, line: usize) -> Result<Decimal, ImportError> {
    Decimal::from_str(column.trimmed(record)).map_err(|_| invalid_amount(column, record, line))
}

fn invalid_amount(column: &Column, record: &StringRecord, line: usize) -> ImportError {
    ImportError::InvalidAmount {
        line,
        field: column.label().to_string(),
        value: column.trimmed(record).to_string(),
    }
}
