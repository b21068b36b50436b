//! Amount type representing a decimal number with a currency.
//!
//! An [`Amount`] is the unit of value on a posting: an exact decimal number
//! paired with a currency code. Numbers keep the precision they were parsed
//! or computed with; nothing here rounds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Neg;

/// An amount is a quantity paired with a currency.
///
/// # Examples
///
/// ```
/// use n26_core::Amount;
/// use rust_decimal_macros::dec;
///
/// let amount = Amount::new(dec!(-12.34), "EUR");
/// assert_eq!(amount.number, dec!(-12.34));
/// assert_eq!(amount.currency, "EUR");
/// assert_eq!(amount.to_string(), "-12.34 EUR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    /// The decimal quantity
    pub number: Decimal,
    /// The currency code (e.g., "EUR", "CHF")
    pub currency: String,
}

impl Amount {
    /// Create a new amount.
    #[must_use]
    pub fn new(number: Decimal, currency: impl Into<String>) -> Self {
        Self {
            number,
            currency: currency.into(),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.currency)
    }
}

impl Neg for &Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount {
            number: -self.number,
            currency: self.currency.clone(),
        }
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        -&self
    }
}
