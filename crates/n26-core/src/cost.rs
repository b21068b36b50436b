//! Cost specification attached to converted postings.
//!
//! A [`CostSpec`] records the rate at which a posting's units were acquired
//! and the currency that rate is quoted in. The importer uses it on the
//! primary posting of a currency conversion, e.g. `-9.43 EUR {0.9687 CHF}`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A per-unit cost: the exchange rate and the currency it is quoted in.
///
/// # Examples
///
/// ```
/// use n26_core::CostSpec;
/// use rust_decimal_macros::dec;
///
/// let spec = CostSpec::per_unit(dec!(0.9687), "CHF");
/// assert_eq!(spec.to_string(), "{0.9687 CHF}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CostSpec {
    /// Cost per unit
    pub number_per: Decimal,
    /// Currency of the cost
    pub currency: String,
}

impl CostSpec {
    /// Create a per-unit cost spec.
    #[must_use]
    pub fn per_unit(number: Decimal, currency: impl Into<String>) -> Self {
        Self {
            number_per: number,
            currency: currency.into(),
        }
    }
}

impl fmt::Display for CostSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} {}}}", self.number_per, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display_keeps_rate_precision() {
        assert_eq!(CostSpec::per_unit(dec!(1.0), "EUR").to_string(), "{1.0 EUR}");
        assert_eq!(
            CostSpec::per_unit(dec!(1.09120), "USD").to_string(),
            "{1.09120 USD}"
        );
    }
}
