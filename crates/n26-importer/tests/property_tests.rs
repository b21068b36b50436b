//! Property-based tests for the N26 importer.
//!
//! Run with: cargo test -p n26-importer --test `property_tests`

use chrono::NaiveDate;
use n26_core::{Amount, MetaValue};
use n26_importer::{N26Config, N26Importer};
use proptest::prelude::*;
use rust_decimal::Decimal;

const HEADER: &str = "\"Date\",\"Payee\",\"Account number\",\"Transaction type\",\"Payment reference\",\"Amount (EUR)\",\"Amount (Foreign Currency)\",\"Type Foreign Currency\",\"Exchange Rate\"";

fn importer() -> N26Importer {
    N26Importer::new(N26Config::new("DE99999999999999999999", "Assets:N26")).unwrap()
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2015i32..2025i32, 1u32..13u32, 1u32..29u32)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_decimal() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn statement(rows: &[(NaiveDate, Decimal)]) -> String {
    let mut content = format!("{HEADER}\n");
    for (date, amount) in rows {
        content.push_str(&format!(
            "\"{}\",\"Payee\",\"\",\"Outgoing Transfer\",\"ref\",\"{amount}\",\"\",\"\",\"\"\n",
            date.format("%Y-%m-%d")
        ));
    }
    content
}

proptest! {
    #[test]
    fn prop_date_is_order_independent(
        rows in prop::collection::vec((arb_date(), arb_decimal()), 1..20)
    ) {
        let importer = importer();
        let forward = importer.date_from_str(&statement(&rows)).unwrap();

        let mut reversed = rows.clone();
        reversed.reverse();
        let backward = importer.date_from_str(&statement(&reversed)).unwrap();

        prop_assert_eq!(forward, backward);
        prop_assert_eq!(forward, rows.iter().map(|(d, _)| *d).max());
    }

    #[test]
    fn prop_one_transaction_per_row(
        rows in prop::collection::vec((arb_date(), arb_decimal()), 0..20)
    ) {
        let txns = importer().extract_from_str(&statement(&rows), "s.csv").unwrap();
        prop_assert_eq!(txns.len(), rows.len());

        for (index, (txn, (date, amount))) in txns.iter().zip(&rows).enumerate() {
            prop_assert_eq!(txn.date, *date);
            prop_assert_eq!(txn.postings.len(), 1);
            prop_assert_eq!(txn.postings[0].units.clone(), Some(Amount::new(*amount, "EUR")));
            prop_assert_eq!(
                txn.meta.get("lineno"),
                Some(&MetaValue::Number(Decimal::from(index)))
            );
        }
    }

    #[test]
    fn prop_header_with_extra_column_is_rejected(extra in "[A-Za-z ]{1,12}") {
        let line = format!("{HEADER},\"{extra}\"");
        prop_assert!(!importer().is_valid_header(&line));
    }
}
