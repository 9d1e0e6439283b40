//! Date-indexed exchange rates.
//!
//! Each rate is the price of one EUR in another currency on a departure
//! date. EUR itself never has a row: conversions short-circuit it.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{Currency, DomainError};

/// The price of one EUR in `currency` on `departure_date`.
///
/// # Invariants
///
/// - `rate > 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeRate {
    departure_date: NaiveDate,
    currency: Currency,
    rate: Decimal,
}

impl ExchangeRate {
    /// Construct an exchange rate, rejecting non-positive values.
    pub fn new(
        departure_date: NaiveDate,
        currency: Currency,
        rate: Decimal,
    ) -> Result<Self, DomainError> {
        if rate <= Decimal::ZERO {
            return Err(DomainError::NonPositiveExchangeRate {
                currency,
                date: departure_date,
                rate,
            });
        }

        Ok(Self {
            departure_date,
            currency,
            rate,
        })
    }

    pub fn departure_date(&self) -> NaiveDate {
        self.departure_date
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Units of `currency` per 1 EUR.
    pub fn rate(&self) -> Decimal {
        self.rate
    }
}

/// Source of exchange rates for the currency normalizer.
///
/// This abstraction lets the planner run against an in-memory table, a
/// snapshot, or a test double.
pub trait ExchangeRateLookup {
    /// Units of `currency` per 1 EUR on `date`, if recorded.
    fn rate_for(&self, date: NaiveDate, currency: Currency) -> Option<Decimal>;
}

/// In-memory exchange-rate table keyed by `(date, currency)`.
#[derive(Debug, Clone, Default)]
pub struct ExchangeRates {
    rates: HashMap<(NaiveDate, Currency), Decimal>,
}

impl ExchangeRates {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rate unless one is already recorded for its date and currency.
    ///
    /// Returns `true` if the rate was stored. EUR rows are never stored.
    pub fn insert(&mut self, rate: ExchangeRate) -> bool {
        if rate.currency.is_eur() {
            return false;
        }

        let key = (rate.departure_date, rate.currency);
        if self.rates.contains_key(&key) {
            return false;
        }
        self.rates.insert(key, rate.rate);
        true
    }

    /// Returns the number of recorded rates.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if no rates are recorded.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl ExchangeRateLookup for ExchangeRates {
    fn rate_for(&self, date: NaiveDate, currency: Currency) -> Option<Decimal> {
        self.rates.get(&(date, currency)).copied()
    }
}

impl FromIterator<ExchangeRate> for ExchangeRates {
    fn from_iter<I: IntoIterator<Item = ExchangeRate>>(iter: I) -> Self {
        let mut table = Self::new();
        for rate in iter {
            table.insert(rate);
        }
        table
    }
}
