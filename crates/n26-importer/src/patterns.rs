//! Payee pattern generation from an existing ledger.
//!
//! Past transactions already say which account a payee belongs to. This
//! module reads a beancount file, pairs each transaction's payee with the
//! account of its second posting, and builds the mappings used to seed
//! `account_patterns`.
//!
//! Only transaction headers and their indented posting lines are read;
//! everything else in the file is skipped.

use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

/// Key used for transactions without a payee.
pub const NO_PAYEE: &str = "null";

/// A transaction as seen by the ledger scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Payee, if the header had one and it was not empty.
    pub payee: Option<String>,
    /// Posting accounts in order.
    pub accounts: Vec<String>,
}

impl LedgerEntry {
    /// The counter account: the account of the second posting.
    pub fn counter_account(&self) -> Option<&str> {
        self.accounts.get(1).map(String::as_str)
    }
}

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_header, r"^\d{4}-\d{2}-\d{2}\s+(?:txn|[*!&#?%PSTCURM])(?:\s|$)(.*)$");
re!(re_string, r#""((?:[^"\\]|\\.)*)""#);
re!(re_posting, r"^\s+(?:[!*]\s+)?([A-Z][A-Za-z0-9-]*(?::[A-Z0-9][A-Za-z0-9-]*)+)");

/// Scan beancount source text for transactions.
pub fn scan_ledger(content: &str) -> Vec<LedgerEntry> {
    let mut entries = Vec::new();
    let mut current: Option<LedgerEntry> = None;

    for line in content.lines() {
        if let Some(caps) = re_header().captures(line) {
            entries.extend(current.take());
            current = Some(LedgerEntry {
                payee: payee_of(&caps[1]),
                accounts: Vec::new(),
            });
            continue;
        }

        let indented = line.starts_with(' ') || line.starts_with('\t');
        if !indented {
            entries.extend(current.take());
            continue;
        }

        if let (Some(entry), Some(caps)) = (current.as_mut(), re_posting().captures(line)) {
            entry.accounts.push(caps[1].to_string());
        }
    }
    entries.extend(current);

    tracing::debug!(transactions = entries.len(), "scanned ledger");
    entries
}

/// Payee from the text after the flag: with two strings the first one is
/// the payee, with one string there is only a narration.
fn payee_of(rest: &str) -> Option<String> {
    // Tags, links and comments come after the strings
    let strings: Vec<String> = re_string()
        .captures_iter(rest)
        .map(|c| unescape(&c[1]))
        .collect();
    match strings.as_slice() {
        [payee, _, ..] if !payee.is_empty() => Some(payee.clone()),
        _ => None,
    }
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Lower-cased payee → sorted accounts it was booked against.
///
/// Transactions with fewer than two postings are skipped. Payee-less
/// transactions are grouped under [`NO_PAYEE`].
pub fn payees_to_accounts(entries: &[LedgerEntry]) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for entry in entries {
        let Some(account) = entry.counter_account() else {
            continue;
        };
        let payee = entry
            .payee
            .as_ref()
            .map_or_else(|| NO_PAYEE.to_string(), |p| p.to_lowercase());
        map.entry(payee).or_default().insert(account.to_string());
    }
    into_sorted_lists(map)
}

/// Account → sorted lower-cased payees booked against it.
///
/// Payees are regex-escaped so the lists can be used as payee patterns
/// directly. Payee-less transactions are dropped.
pub fn accounts_to_payees(entries: &[LedgerEntry]) -> BTreeMap<String, Vec<String>> {
    let mut map: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for entry in entries {
        let Some(account) = entry.counter_account() else {
            continue;
        };
        let patterns = map.entry(account.to_string()).or_default();
        if let Some(payee) = &entry.payee {
            patterns.insert(regex::escape(&payee.to_lowercase()));
        }
    }
    into_sorted_lists(map)
}

fn into_sorted_lists(map: BTreeMap<String, BTreeSet<String>>) -> BTreeMap<String, Vec<String>> {
    map.into_iter()
        .map(|(key, values)| (key, values.into_iter().collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEDGER: &str = r#"option "title" "Test"

2019-01-01 open Assets:N26 EUR
2019-01-01 open Expenses:Food

2019-10-10 * "REWE Markt" "Groceries" #food
  Assets:N26                 -12.34 EUR
  Expenses:Food

2019-10-11 * "rewe markt" "More groceries"
  ; a comment
  Assets:N26                 -3.00 EUR
  Expenses:Food:Snacks

2019-10-12 ! "Interest"
  Assets:N26                  0.01 EUR
  Income:Interest

2019-10-13 txn "" "Empty payee"
  Assets:N26                 -1.00 EUR
  Expenses:Misc

2019-10-14 * "Lonely" "Single posting"
  Assets:N26                  0.00 EUR
"#;

    #[test]
    fn test_scan_ledger() {
        let entries = scan_ledger(LEDGER);
        assert_eq!(entries.len(), 5);

        assert_eq!(entries[0].payee.as_deref(), Some("REWE Markt"));
        assert_eq!(entries[0].accounts, vec!["Assets:N26", "Expenses:Food"]);
        assert_eq!(entries[1].counter_account(), Some("Expenses:Food:Snacks"));
        // Narration only
        assert_eq!(entries[2].payee, None);
        // Empty payee string counts as none
        assert_eq!(entries[3].payee, None);
        assert_eq!(entries[4].counter_account(), None);
    }

    #[test]
    fn test_scan_unescapes_payee() {
        let entries = scan_ledger("2020-01-01 * \"Bob \\\"B\\\"\" \"x\"\n  Assets:A  1 EUR\n  Expenses:B\n");
        assert_eq!(entries[0].payee.as_deref(), Some("Bob \"B\""));
    }

    #[test]
    fn test_payees_to_accounts() {
        let entries = scan_ledger(LEDGER);
        let map = payees_to_accounts(&entries);

        assert_eq!(
            map["rewe markt"],
            vec!["Expenses:Food".to_string(), "Expenses:Food:Snacks".to_string()]
        );
        assert_eq!(
            map[NO_PAYEE],
            vec!["Expenses:Misc".to_string(), "Income:Interest".to_string()]
        );
        assert!(!map.contains_key("lonely"));
    }

    #[test]
    fn test_accounts_to_payees() {
        let entries = vec![
            LedgerEntry {
                payee: Some("PayPal *Shop".to_string()),
                accounts: vec!["Assets:N26".to_string(), "Expenses:Shopping".to_string()],
            },
            LedgerEntry {
                payee: None,
                accounts: vec!["Assets:N26".to_string(), "Income:Interest".to_string()],
            },
        ];
        let map = accounts_to_payees(&entries);
        assert_eq!(map["Expenses:Shopping"], vec![r"paypal \*shop".to_string()]);
        assert!(map["Income:Interest"].is_empty());
    }
}
