//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from feed/IO errors and from query-time routing errors.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::Currency;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A money amount could not be parsed or is out of range
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),

    /// A rate must cost something
    #[error("rate amount must be positive, got {0} cents")]
    NonPositiveRate(i64),

    /// Sailing arrives on or before the day it departs
    #[error("sailing {code} must arrive after it departs ({departure} -> {arrival})")]
    ArrivalNotAfterDeparture {
        code: String,
        departure: NaiveDate,
        arrival: NaiveDate,
    },

    /// Sailing code is blank
    #[error("sailing code must not be empty")]
    EmptySailingCode,

    /// Two sailings share a code
    #[error("duplicate sailing code {0}")]
    DuplicateSailingCode(String),

    /// Exchange rates must be strictly positive
    #[error("exchange rate for {currency} on {date} must be positive, got {rate}")]
    NonPositiveExchangeRate {
        currency: Currency,
        date: NaiveDate,
        rate: Decimal,
    },
}
