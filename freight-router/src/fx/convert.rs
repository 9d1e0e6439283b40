//! Conversion of monetary amounts to EUR cents.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::rates::ExchangeRateLookup;
use crate::domain::{Currency, Money};

/// Error from currency conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// No rate recorded for the currency on the sailing's departure date
    #[error("no exchange rate found for {currency} on {date}")]
    MissingExchangeRate { currency: Currency, date: NaiveDate },

    /// The converted amount does not fit in i64 cents
    #[error("converting {amount} on {date} overflowed")]
    Overflow { amount: Money, date: NaiveDate },
}

/// Convert `money` to EUR minor units using the rate recorded for `date`.
///
/// EUR amounts are returned unchanged without a lookup. Otherwise the amount
/// is divided by the rate (units of the currency per 1 EUR) and rounded to
/// the nearest cent, half away from zero.
///
/// A missing rate is a hard error: an absent rate must never look like a
/// free sailing.
///
/// # Examples
///
/// ```
/// use freight_router::domain::{Currency, Money};
/// use freight_router::fx::{convert_to_eur, ExchangeRate, ExchangeRates};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let date = NaiveDate::from_ymd_opt(2022, 2, 16).unwrap();
/// let usd = Currency::parse("USD").unwrap();
/// let mut rates = ExchangeRates::new();
/// rates.insert(ExchangeRate::new(date, usd, Decimal::from_str("1.1482").unwrap()).unwrap());
///
/// let eur = convert_to_eur(&rates, Money::from_cents(6996, usd), date).unwrap();
/// assert_eq!(eur, 6093);
/// ```
pub fn convert_to_eur<L>(lookup: &L, money: Money, date: NaiveDate) -> Result<i64, ConversionError>
where
    L: ExchangeRateLookup + ?Sized,
{
    let currency = money.currency();
    if currency.is_eur() {
        return Ok(money.cents());
    }

    let rate = lookup
        .rate_for(date, currency)
        .ok_or(ConversionError::MissingExchangeRate { currency, date })?;

    Decimal::from(money.cents())
        .checked_div(rate)
        .map(|eur| eur.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|eur| eur.to_i64())
        .ok_or(ConversionError::Overflow { amount: money, date })
}
