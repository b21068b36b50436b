//! Payee based account classification.

use crate::error::ImportError;
use regex::{Regex, RegexBuilder};
use std::collections::{BTreeMap, HashMap};

/// A compiled payee pattern and the account it assigns.
#[derive(Debug, Clone)]
pub struct PayeePattern {
    pattern: String,
    account: String,
    regex: Regex,
}

impl PayeePattern {
    /// The pattern as configured.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The account assigned on match.
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Whether the pattern matches at the start of `payee`, ignoring case.
    pub fn matches(&self, payee: &str) -> bool {
        self.regex.is_match(payee)
    }
}

/// Assigns a secondary account to a transaction from its payee.
///
/// Patterns are tried in account-name order, then in the order they were
/// listed for the account. The first match wins.
#[derive(Debug, Clone, Default)]
pub struct PayeeClassifier {
    patterns: Vec<PayeePattern>,
}

impl PayeeClassifier {
    /// Compile the account → patterns mapping.
    ///
    /// Fails if a pattern is listed under two different accounts or does not
    /// compile. A pattern repeated under the same account is kept once.
    pub fn new(account_patterns: &BTreeMap<String, Vec<String>>) -> Result<Self, ImportError> {
        let mut owners: HashMap<&str, &str> = HashMap::new();
        let mut patterns = Vec::new();

        for (account, account_list) in account_patterns {
            for pattern in account_list {
                match owners.get(pattern.as_str()) {
                    Some(owner) if *owner == account.as_str() => continue,
                    Some(owner) => {
                        return Err(ImportError::DuplicatePattern {
                            pattern: pattern.clone(),
                            first: (*owner).to_string(),
                            second: account.clone(),
                        });
                    }
                    None => {}
                }
                owners.insert(pattern, account);

                // Anchor at the start only, like a prefix match
                let regex = RegexBuilder::new(&format!("^(?:{pattern})"))
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| ImportError::InvalidPattern {
                        pattern: pattern.clone(),
                        account: account.clone(),
                        source,
                    })?;

                patterns.push(PayeePattern {
                    pattern: pattern.clone(),
                    account: account.clone(),
                    regex,
                });
            }
        }

        tracing::debug!(patterns = patterns.len(), "compiled payee patterns");
        Ok(Self { patterns })
    }

    /// Account for `payee`, if any pattern matches.
    pub fn classify(&self, payee: &str) -> Option<&str> {
        let hit = self.patterns.iter().find(|p| p.matches(payee))?;
        tracing::debug!(payee, pattern = %hit.pattern, account = %hit.account, "classified payee");
        Some(&hit.account)
    }

    /// Compiled patterns in evaluation order.
    pub fn patterns(&self) -> &[PayeePattern] {
        &self.patterns
    }

    /// Number of compiled patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if no patterns are configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
