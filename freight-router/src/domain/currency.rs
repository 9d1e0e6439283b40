//! Currency code types.

use std::fmt;

use serde::{Serialize, Serializer};

/// Error returned when parsing an invalid currency code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid currency code: {reason}")]
pub struct InvalidCurrency {
    reason: &'static str,
}

/// A 3-letter ISO-4217-style currency code, e.g. `EUR` or `USD`.
///
/// Always stored upper-case. The exchange-rate section of the freight feed
/// uses lower-case keys (`"usd"`), which [`Currency::parse_normalized`]
/// accepts.
///
/// # Examples
///
/// ```
/// use freight_router::domain::Currency;
///
/// let usd = Currency::parse("USD").unwrap();
/// assert_eq!(usd.as_str(), "USD");
/// assert_eq!(Currency::parse_normalized("usd").unwrap(), usd);
/// assert!(Currency::EUR.is_eur());
/// assert!(Currency::parse("US").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Currency([u8; 3]);

impl Currency {
    /// The base currency every cost is normalized to.
    pub const EUR: Currency = Currency(*b"EUR");

    /// Parse a currency code.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidCurrency> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidCurrency {
                reason: "must be exactly 3 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidCurrency {
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        Ok(Currency([bytes[0], bytes[1], bytes[2]]))
    }

    /// Parse a currency code, trimming and upper-casing first.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidCurrency> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the currency code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored
        std::str::from_utf8(&self.0).unwrap_or("???")
    }

    /// Whether this is the base currency.
    pub fn is_eur(&self) -> bool {
        *self == Self::EUR
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Currency({})", self.as_str())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
