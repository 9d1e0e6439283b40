//! Monetary amounts in integer minor units.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::{Currency, DomainError};

/// An amount of money in minor units (cents) of a currency.
///
/// All arithmetic in the planner is done on integer cents so that cost
/// comparisons are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Money {
    cents: i64,
    currency: Currency,
}

impl Money {
    /// Create an amount from minor units.
    pub fn from_cents(cents: i64, currency: Currency) -> Self {
        Self { cents, currency }
    }

    /// Parse a decimal major-unit string such as `"589.30"`.
    ///
    /// The value is rounded to the nearest minor unit, half away from zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use freight_router::domain::{Currency, Money};
    ///
    /// let usd = Currency::parse("USD").unwrap();
    /// let money = Money::parse_decimal("589.30", usd).unwrap();
    /// assert_eq!(money.cents(), 58930);
    /// assert_eq!(money.format_amount(), "589.30");
    /// ```
    pub fn parse_decimal(s: &str, currency: Currency) -> Result<Self, DomainError> {
        let value =
            Decimal::from_str(s.trim()).map_err(|_| DomainError::InvalidAmount(s.to_string()))?;

        let cents = value
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|c| c.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|c| c.to_i64())
            .ok_or_else(|| DomainError::InvalidAmount(s.to_string()))?;

        Ok(Self { cents, currency })
    }

    /// Amount in minor units.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Currency of the amount.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Format the amount in major units with exactly two decimals (`"D.DD"`).
    pub fn format_amount(&self) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        format!("{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.format_amount(), self.currency)
    }
}
