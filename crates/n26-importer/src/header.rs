//! Header resolution and typed column access.
//!
//! [`resolve`] picks the layout a statement uses from its first line.
//! [`ColumnMap`] then turns the CSV reader's header record into column
//! indices once per file, so rows are read through named accessors
//! instead of label lookups.

use crate::error::ImportError;
use crate::schema::{schemas_for, FieldKey, HeaderSchema};
use csv::StringRecord;

/// Split a raw header line on commas and strip surrounding quotes.
///
/// Headers never contain commas, so no CSV quoting rules are applied.
/// Whitespace around the whole line (including the line ending) is ignored.
pub fn split_header_line(line: &str) -> Vec<&str> {
    line.trim()
        .split(',')
        .map(|column| column.trim_matches('"'))
        .collect()
}

/// Find the layout whose header equals `line` for the given language.
///
/// Every layout contributes its full label list and, if it has optional
/// columns, the list without them. The first exact positional match wins.
pub fn resolve(language: &str, line: &str) -> Option<&'static HeaderSchema> {
    let actual = split_header_line(line);
    let found = schemas_for(language).find(|schema| {
        schema
            .variants()
            .iter()
            .any(|expected| *expected == actual)
    });

    match found {
        Some(schema) => {
            tracing::debug!(language, layout = ?schema.layout, "matched statement header");
        }
        None => {
            tracing::debug!(language, columns = actual.len(), "header matches no known layout");
        }
    }
    found
}

/// Column indices of the fields the row mapper reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    date: Column,
    payee: Column,
    payment_reference: Column,
    amount_eur: Column,
    amount_foreign_currency: Column,
    type_foreign_currency: Column,
    exchange_rate: Column,
}

/// A resolved column: its index and the label it was found under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    index: usize,
    label: &'static str,
}

impl Column {
    /// Header label of the column.
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Value of this column in `record` as written (empty if the record is short).
    pub fn get<'r>(&self, record: &'r StringRecord) -> &'r str {
        record.get(self.index).unwrap_or("")
    }

    /// Value with surrounding whitespace removed, for dates, numbers and codes.
    pub fn trimmed<'r>(&self, record: &'r StringRecord) -> &'r str {
        self.get(record).trim()
    }
}

impl ColumnMap {
    /// Resolve the schema's labels against a parsed header record.
    pub fn new(schema: &HeaderSchema, headers: &StringRecord) -> Result<Self, ImportError> {
        let require = |key: FieldKey| -> Result<Column, ImportError> {
            let label = schema
                .label(key)
                .ok_or_else(|| ImportError::MissingColumn(key.as_str().to_string()))?;
            headers
                .iter()
                .position(|h| h.trim().trim_matches('"') == label)
                .map(|index| Column { index, label })
                .ok_or_else(|| ImportError::MissingColumn(label.to_string()))
        };

        Ok(Self {
            date: require(FieldKey::Date)?,
            payee: require(FieldKey::Payee)?,
            payment_reference: require(FieldKey::PaymentReference)?,
            amount_eur: require(FieldKey::AmountEur)?,
            amount_foreign_currency: require(FieldKey::AmountForeignCurrency)?,
            type_foreign_currency: require(FieldKey::TypeForeignCurrency)?,
            exchange_rate: require(FieldKey::ExchangeRate)?,
        })
    }

    /// Booking date column.
    pub const fn date(&self) -> &Column {
        &self.date
    }

    /// Payee column.
    pub const fn payee(&self) -> &Column {
        &self.payee
    }

    /// Payment reference column.
    pub const fn payment_reference(&self) -> &Column {
        &self.payment_reference
    }

    /// Home-currency amount column.
    pub const fn amount_eur(&self) -> &Column {
        &self.amount_eur
    }

    /// Original-currency amount column.
    pub const fn amount_foreign_currency(&self) -> &Column {
        &self.amount_foreign_currency
    }

    /// Original currency code column.
    pub const fn type_foreign_currency(&self) -> &Column {
        &self.type_foreign_currency
    }

    /// Exchange rate column.
    pub const fn exchange_rate(&self) -> &Column {
        &self.exchange_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Layout, SCHEMAS};

    const EN_HEADER: &str = "\"Date\",\"Payee\",\"Account number\",\"Transaction type\",\"Payment reference\",\"Category\",\"Amount (EUR)\",\"Amount (Foreign Currency)\",\"Type Foreign Currency\",\"Exchange Rate\"";

    #[test]
    fn test_split_header_line() {
        assert_eq!(
            split_header_line("\"Date\",\"Payee\",Amount\r\n"),
            vec!["Date", "Payee", "Amount"]
        );
    }

    #[test]
    fn test_resolve_ignores_whitespace_around_header_line() {
        let line = format!("  {EN_HEADER}   \r\n");
        assert!(resolve("en", &line).is_some());
    }

    #[test]
    fn test_resolve_en_legacy() {
        let schema = resolve("en", EN_HEADER).unwrap();
        assert_eq!(schema.language, "en");
        assert_eq!(schema.layout, Layout::Legacy);
    }

    #[test]
    fn test_resolve_without_optional_column() {
        let line = EN_HEADER.replace("\"Category\",", "");
        let schema = resolve("en", &line).unwrap();
        assert_eq!(schema.layout, Layout::Legacy);
    }

    #[test]
    fn test_resolve_en_updated() {
        let line = "\"Booking Date\",\"Value Date\",\"Partner Name\",\"Partner Iban\",\"Type\",\"Payment Reference\",\"Account Name\",\"Amount (EUR)\",\"Original Amount\",\"Original Currency\",\"Exchange Rate\"";
        let schema = resolve("en", line).unwrap();
        assert_eq!(schema.layout, Layout::Updated);
    }

    #[test]
    fn test_resolve_rejects_other_language() {
        assert!(resolve("de", EN_HEADER).is_none());
        assert!(resolve("fr", EN_HEADER).is_none());
    }

    #[test]
    fn test_resolve_rejects_reordered_or_partial_header() {
        assert!(resolve("en", "\"Payee\",\"Date\"").is_none());
        assert!(resolve("en", "").is_none());
        let extra = format!("{EN_HEADER},\"Balance\"");
        assert!(resolve("en", &extra).is_none());
    }

    #[test]
    fn test_every_variant_resolves_to_itself_only() {
        for schema in SCHEMAS {
            for variant in schema.variants() {
                let line = variant
                    .iter()
                    .map(|l| format!("\"{l}\""))
                    .collect::<Vec<_>>()
                    .join(",");
                assert_eq!(resolve(schema.language, &line), Some(schema));
                for other in ["en", "de", "fr"] {
                    if other != schema.language {
                        assert!(resolve(other, &line).is_none(), "{line} under {other}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_column_map_reads_by_label() {
        let schema = resolve("en", EN_HEADER).unwrap();
        // Same labels, different order than the schema
        let headers = StringRecord::from(vec![
            "Payee",
            "Date",
            "Amount (EUR)",
            "Payment reference",
            "Amount (Foreign Currency)",
            "Type Foreign Currency",
            "Exchange Rate",
        ]);
        let columns = ColumnMap::new(schema, &headers).unwrap();
        let record = StringRecord::from(vec![
            "MAX MUSTERMANN",
            "2019-10-10",
            " -10.0 ",
            "Muster GmbH",
            "",
            "",
            "",
        ]);
        assert_eq!(columns.date().get(&record), "2019-10-10");
        assert_eq!(columns.payee().get(&record), "MAX MUSTERMANN");
        assert_eq!(columns.amount_eur().get(&record), " -10.0 ");
        assert_eq!(columns.amount_eur().trimmed(&record), "-10.0");
        assert_eq!(columns.amount_eur().label(), "Amount (EUR)");
    }

    #[test]
    fn test_column_map_missing_required_column() {
        let schema = resolve("en", EN_HEADER).unwrap();
        let headers = StringRecord::from(vec!["Date", "Payee"]);
        let err = ColumnMap::new(schema, &headers).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn(label) if label == "Payment reference"));
    }
}
