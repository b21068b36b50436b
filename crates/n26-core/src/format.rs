//! Beancount text formatter.
//!
//! Renders imported transactions with amounts right-aligned to a
//! configurable column, the way they are appended to a ledger file.

use crate::{Amount, CostSpec, MetaValue, Posting, Transaction};

/// Metadata keys that record where a transaction was imported from.
///
/// They stay on the record but are not written to the ledger.
pub const HIDDEN_META_KEYS: &[&str] = &["filename", "lineno"];

/// Formatter configuration.
#[derive(Debug, Clone)]
pub struct FormatConfig {
    /// Column to align amounts to (default: 60).
    pub amount_column: usize,
    /// Indentation for postings.
    pub indent: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            amount_column: 60,
            indent: "  ".to_string(),
        }
    }
}

impl FormatConfig {
    /// Create a new config with both column and indent settings.
    #[must_use]
    pub fn new(column: usize, indent_width: usize) -> Self {
        Self {
            amount_column: column,
            indent: " ".repeat(indent_width),
        }
    }
}

/// Format a transaction.
pub fn format_transaction(txn: &Transaction, config: &FormatConfig) -> String {
    let mut out = format!("{} {}", txn.date, txn.flag);

    if let Some(payee) = &txn.payee {
        out.push_str(&format!(" \"{}\"", escape_string(payee)));
    }
    out.push_str(&format!(" \"{}\"", escape_string(&txn.narration)));

    for tag in &txn.tags {
        out.push_str(&format!(" #{tag}"));
    }
    for link in &txn.links {
        out.push_str(&format!(" ^{link}"));
    }
    out.push('\n');

    for (key, value) in &txn.meta {
        if HIDDEN_META_KEYS.contains(&key.as_str()) {
            continue;
        }
        out.push_str(&format!(
            "{}{}: {}\n",
            config.indent,
            key,
            format_meta_value(value)
        ));
    }

    for posting in &txn.postings {
        out.push_str(&format_posting(posting, config));
        out.push('\n');
    }

    out
}

/// Format a posting with amount alignment.
fn format_posting(posting: &Posting, config: &FormatConfig) -> String {
    let mut line = format!("{}{}", config.indent, posting.account);

    if let Some(units) = &posting.units {
        let amount_str = format_amount(units);

        // Pad so the amount ends at the configured column
        let target_col = config.amount_column.saturating_sub(amount_str.len());
        let current_len = line.chars().count();
        if current_len + 2 <= target_col {
            line.push_str(&" ".repeat(target_col - current_len));
        } else {
            line.push_str("  ");
        }
        line.push_str(&amount_str);

        if let Some(cost) = &posting.cost {
            line.push(' ');
            line.push_str(&format_cost_spec(cost));
        }
    }

    line
}

/// Format an amount.
fn format_amount(amount: &Amount) -> String {
    format!("{} {}", amount.number, amount.currency)
}

/// Format a cost specification.
fn format_cost_spec(spec: &CostSpec) -> String {
    spec.to_string()
}

/// Format a metadata value.
fn format_meta_value(value: &MetaValue) -> String {
    match value {
        MetaValue::String(s) => format!("\"{}\"", escape_string(s)),
        MetaValue::Number(n) => n.to_string(),
    }
}

/// Escape a string for output (handle quotes and backslashes).
fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_format_simple_transaction() {
        let txn = Transaction::new(date(2019, 10, 10), "Muster GmbH")
            .with_payee("MAX MUSTERMANN")
            .with_posting(Posting::new("Assets:N26", Amount::new(dec!(-12.34), "EUR")))
            .with_posting(Posting::auto("Expenses:Misc"));

        let formatted = format_transaction(&txn, &FormatConfig::new(40, 2));
        let expected = "2019-10-10 * \"MAX MUSTERMANN\" \"Muster GmbH\"\n\
                        \x20 Assets:N26                  -12.34 EUR\n\
                        \x20 Expenses:Misc\n";
        assert_eq!(formatted, expected);
    }

    #[test]
    fn test_format_without_payee() {
        let txn = Transaction::new(date(2020, 1, 3), "Card payment")
            .with_posting(Posting::new("Assets:N26", Amount::new(dec!(5), "EUR")));
        let formatted = format_transaction(&txn, &FormatConfig::default());
        assert!(formatted.starts_with("2020-01-03 * \"Card payment\"\n"));
    }

    #[test]
    fn test_format_escapes_quotes_and_renders_tags() {
        let mut txn = Transaction::new(date(2020, 1, 3), "Ref \"42\"").with_payee("Bob's \"Bar\"");
        txn.tags.push("trip".to_string());
        txn.links.push("n26-2020".to_string());
        let formatted = format_transaction(&txn, &FormatConfig::default());
        assert_eq!(
            formatted,
            "2020-01-03 * \"Bob's \\\"Bar\\\"\" \"Ref \\\"42\\\"\" #trip ^n26-2020\n"
        );
    }

    #[test]
    fn test_format_cost_follows_amount() {
        let txn = Transaction::new(date(2020, 1, 3), "Zurich")
            .with_posting(
                Posting::new("Assets:N26", Amount::new(dec!(-9.42), "EUR"))
                    .with_cost(CostSpec::per_unit(dec!(0.9687), "CHF")),
            );
        let formatted = format_transaction(&txn, &FormatConfig::default());
        assert!(formatted.contains("-9.42 EUR {0.9687 CHF}\n"));
    }

    #[test]
    fn test_format_hides_import_metadata() {
        let txn = Transaction::new(date(2020, 1, 3), "x")
            .with_meta("filename", MetaValue::String("/tmp/a.csv".to_string()))
            .with_meta("lineno", MetaValue::Number(dec!(4)))
            .with_meta("category", MetaValue::String("Bars".to_string()));
        let formatted = format_transaction(&txn, &FormatConfig::default());
        assert!(!formatted.contains("filename"));
        assert!(!formatted.contains("lineno"));
        assert!(formatted.contains("  category: \"Bars\"\n"));
    }

    #[test]
    fn test_long_account_gets_minimum_gap() {
        let txn = Transaction::new(date(2020, 1, 3), "x").with_posting(Posting::new(
            "Expenses:Some:Very:Long:Account:Name",
            Amount::new(dec!(1), "EUR"),
        ));
        let formatted = format_transaction(&txn, &FormatConfig::new(20, 2));
        assert!(formatted.contains("Expenses:Some:Very:Long:Account:Name  1 EUR"));
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("hello"), "hello");
        assert_eq!(escape_string("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_string("line1\nline2"), "line1\\nline2");
    }
}
