//! Currency normalization.
//!
//! Every cost the planner compares is expressed in EUR minor units. Rates on
//! other currencies are converted using the exchange rate recorded for the
//! sailing's departure date.

mod convert;
mod rates;

pub use convert::{ConversionError, convert_to_eur};
pub use rates::{ExchangeRate, ExchangeRateLookup, ExchangeRates};
