//! Configuration for the N26 importer.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Settings for one N26 account.
///
/// Deserializes from the keys used in a `[tool.beancount-n26.<section>]`
/// table; the setters cover programmatic construction.
///
/// ```
/// use n26_importer::N26Config;
///
/// let config = N26Config::new("DE99999999999999999999", "Assets:N26")
///     .language("de")
///     .account_patterns("Expenses:Food", ["REWE", "LIDL"])
///     .exchange_fees_account("Expenses:Fees:Exchange");
/// assert_eq!(config.language, "de");
/// assert_eq!(config.account_patterns["Expenses:Food"].len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct N26Config {
    /// IBAN of the statement's account.
    pub iban: String,
    /// Ledger account the statement's amounts are posted to.
    pub account_name: String,
    /// Language of the export's header row.
    #[serde(default = "default_language")]
    pub language: String,
    /// Encoding label of the CSV file (WHATWG label, e.g. `utf-8`).
    #[serde(default = "default_file_encoding")]
    pub file_encoding: String,
    /// Currency of the `Amount (EUR)` column.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Account → payee patterns used to classify transactions.
    #[serde(default)]
    pub account_patterns: BTreeMap<String, Vec<String>>,
    /// Account receiving currency exchange fees.
    #[serde(default)]
    pub exchange_fees_account: Option<String>,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_file_encoding() -> String {
    "utf-8".to_string()
}

fn default_currency() -> String {
    "EUR".to_string()
}

impl N26Config {
    /// Start a configuration with defaults for everything but IBAN and account.
    pub fn new(iban: impl Into<String>, account_name: impl Into<String>) -> Self {
        Self {
            iban: iban.into(),
            account_name: account_name.into(),
            language: default_language(),
            file_encoding: default_file_encoding(),
            currency: default_currency(),
            account_patterns: BTreeMap::new(),
            exchange_fees_account: None,
        }
    }

    /// Set the header language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the file encoding label.
    #[must_use]
    pub fn file_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.file_encoding = encoding.into();
        self
    }

    /// Set the home currency.
    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Add payee patterns for an account.
    #[must_use]
    pub fn account_patterns<I, S>(mut self, account: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.account_patterns
            .entry(account.into())
            .or_default()
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Set the exchange fee account.
    #[must_use]
    pub fn exchange_fees_account(mut self, account: impl Into<String>) -> Self {
        self.exchange_fees_account = Some(account.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = N26Config::new("DE00", "Assets:N26");
        assert_eq!(config.language, "en");
        assert_eq!(config.file_encoding, "utf-8");
        assert_eq!(config.currency, "EUR");
        assert!(config.account_patterns.is_empty());
        assert!(config.exchange_fees_account.is_none());
    }

    #[test]
    fn test_account_patterns_accumulate() {
        let config = N26Config::new("DE00", "Assets:N26")
            .account_patterns("Expenses:Food", ["REWE"])
            .account_patterns("Expenses:Food", vec!["LIDL".to_string()]);
        assert_eq!(
            config.account_patterns["Expenses:Food"],
            vec!["REWE".to_string(), "LIDL".to_string()]
        );
    }

    #[test]
    fn test_deserialize_from_toml() {
        let config: N26Config = toml::from_str(
            r#"
            iban = "DE99999999999999999999"
            account_name = "Assets:N26"
            language = "fr"
            exchange_fees_account = "Expenses:Fees"

            [account_patterns]
            "Expenses:Misc" = ["MAX MUSTERMANN"]
            "#,
        )
        .unwrap();

        assert_eq!(config.iban, "DE99999999999999999999");
        assert_eq!(config.language, "fr");
        assert_eq!(config.file_encoding, "utf-8");
        assert_eq!(config.exchange_fees_account.as_deref(), Some("Expenses:Fees"));
        assert_eq!(
            config.account_patterns["Expenses:Misc"],
            vec!["MAX MUSTERMANN".to_string()]
        );
    }

    #[test]
    fn test_deserialize_requires_iban() {
        let result: Result<N26Config, _> = toml::from_str(r#"account_name = "Assets:N26""#);
        assert!(result.is_err());
    }
}
