//! Freight feed DTOs and conversion into a [`Snapshot`].
//!
//! The feed is a single JSON document with three sections:
//!
//! ```json
//! {
//!   "sailings": [{"origin_port": "CNSHA", "destination_port": "NLRTM",
//!                 "departure_date": "2022-02-01", "arrival_date": "2022-03-01",
//!                 "sailing_code": "ABCD"}],
//!   "rates": [{"sailing_code": "ABCD", "rate": "589.30", "rate_currency": "USD"}],
//!   "exchange_rates": {"2022-02-01": {"usd": 1.126}}
//! }
//! ```
//!
//! Conversion is find-or-create style: the first sailing with a given code
//! wins, the last rate listed for a code wins, and the first exchange rate
//! for a `(date, currency)` wins.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use super::Snapshot;
use crate::domain::{Currency, Money, PortCode, Rate, Sailing};
use crate::fx::{ExchangeRate, ExchangeRates};

/// Errors from loading the freight feed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    /// The feed file could not be read
    #[error("failed to read freight data from {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// The document is not valid JSON or has the wrong shape
    #[error("invalid freight data format: {0}")]
    Json(String),

    /// A sailing record failed validation
    #[error("invalid sailing {code}: {reason}")]
    InvalidSailing { code: String, reason: String },

    /// A rate record failed validation
    #[error("invalid rate for sailing {code}: {reason}")]
    InvalidRate { code: String, reason: String },

    /// An exchange rate entry failed validation
    #[error("invalid exchange rate for {currency} on {date}: {reason}")]
    InvalidExchangeRate {
        date: String,
        currency: String,
        reason: String,
    },
}

/// The whole feed document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedDocument {
    #[serde(default)]
    pub sailings: Vec<FeedSailing>,

    #[serde(default)]
    pub rates: Vec<FeedRate>,

    /// Date (`YYYY-MM-DD`) to lower-case currency to units per EUR.
    #[serde(default)]
    pub exchange_rates: BTreeMap<String, BTreeMap<String, FeedNumber>>,
}

/// A sailing as it appears in the feed.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedSailing {
    pub origin_port: String,
    pub destination_port: String,
    pub departure_date: String,
    pub arrival_date: String,
    pub sailing_code: String,
}

/// A rate as it appears in the feed. `rate` is in major units.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedRate {
    pub sailing_code: String,
    pub rate: FeedNumber,
    pub rate_currency: String,
}

/// A decimal that the feed may write either as a JSON number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FeedNumber {
    Number(serde_json::Number),
    Text(String),
}

impl FeedNumber {
    /// Parse as an exact decimal. Numbers go through their shortest textual
    /// form so `1.126` stays `1.126`.
    fn to_decimal(&self) -> Option<Decimal> {
        let text = match self {
            FeedNumber::Number(n) => n.to_string(),
            FeedNumber::Text(s) => s.trim().to_string(),
        };
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .ok()
    }

    fn as_text(&self) -> String {
        match self {
            FeedNumber::Number(n) => n.to_string(),
            FeedNumber::Text(s) => s.trim().to_string(),
        }
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

impl FeedSailing {
    fn to_sailing(&self) -> Result<Sailing, FeedError> {
        let invalid = |reason: String| FeedError::InvalidSailing {
            code: self.sailing_code.clone(),
            reason,
        };

        let origin = PortCode::parse_normalized(&self.origin_port)
            .map_err(|e| invalid(format!("origin: {e}")))?;
        let destination = PortCode::parse_normalized(&self.destination_port)
            .map_err(|e| invalid(format!("destination: {e}")))?;
        let departure = parse_date(&self.departure_date)
            .ok_or_else(|| invalid(format!("bad departure date {:?}", self.departure_date)))?;
        let arrival = parse_date(&self.arrival_date)
            .ok_or_else(|| invalid(format!("bad arrival date {:?}", self.arrival_date)))?;

        Sailing::new(self.sailing_code.trim(), origin, destination, departure, arrival)
            .map_err(|e| invalid(e.to_string()))
    }
}

impl FeedRate {
    fn to_rate(&self) -> Result<Rate, FeedError> {
        let invalid = |reason: String| FeedError::InvalidRate {
            code: self.sailing_code.clone(),
            reason,
        };

        let currency =
            Currency::parse_normalized(&self.rate_currency).map_err(|e| invalid(e.to_string()))?;
        let amount = Money::parse_decimal(&self.rate.as_text(), currency)
            .map_err(|e| invalid(e.to_string()))?;

        Rate::new(amount).map_err(|e| invalid(e.to_string()))
    }
}

impl FeedDocument {
    /// Validate every record and build an immutable snapshot.
    pub fn into_snapshot(self) -> Result<Snapshot, FeedError> {
        let exchange_rates = self.exchange_rate_table()?;

        // Index rates by code; a later entry for the same code replaces an earlier one
        let rates_by_code: HashMap<&str, &FeedRate> = self
            .rates
            .iter()
            .map(|r| (r.sailing_code.trim(), r))
            .collect();

        let mut seen: HashSet<&str> = HashSet::new();
        let mut sailings = Vec::with_capacity(self.sailings.len());

        for raw in &self.sailings {
            let code = raw.sailing_code.trim();
            if !seen.insert(code) {
                debug!(code, "Ignoring duplicate sailing in feed");
                continue;
            }

            let mut sailing = raw.to_sailing()?;
            if let Some(rate) = rates_by_code.get(code) {
                sailing = sailing.with_rate(rate.to_rate()?);
            }
            sailings.push(sailing);
        }

        let orphan_rates = rates_by_code.keys().filter(|c| !seen.contains(*c)).count();
        debug!(
            sailings = sailings.len(),
            exchange_rates = exchange_rates.len(),
            orphan_rates,
            "Converted freight feed"
        );

        Ok(Snapshot::from_unique(sailings, exchange_rates))
    }

    fn exchange_rate_table(&self) -> Result<ExchangeRates, FeedError> {
        let mut table = ExchangeRates::new();

        for (date_text, currencies) in &self.exchange_rates {
            for (currency_text, value) in currencies {
                let invalid = |reason: String| FeedError::InvalidExchangeRate {
                    date: date_text.clone(),
                    currency: currency_text.clone(),
                    reason,
                };

                let date =
                    parse_date(date_text).ok_or_else(|| invalid("bad date".to_string()))?;
                let currency = Currency::parse_normalized(currency_text)
                    .map_err(|e| invalid(e.to_string()))?;
                let rate = value
                    .to_decimal()
                    .ok_or_else(|| invalid(format!("not a decimal: {}", value.as_text())))?;
                let rate =
                    ExchangeRate::new(date, currency, rate).map_err(|e| invalid(e.to_string()))?;

                if !table.insert(rate) {
                    debug!(date = %date, currency = %currency, "Exchange rate row not stored");
                }
            }
        }

        Ok(table)
    }
}
