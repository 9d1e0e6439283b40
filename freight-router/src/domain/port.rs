//! Port code types.

use std::fmt;

use serde::{Serialize, Serializer};

/// Error returned when parsing an invalid port code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid port code: {reason}")]
pub struct InvalidPortCode {
    reason: &'static str,
}

/// An opaque port identifier such as `CNSHA` or `NLRTM`.
///
/// Port codes are treated as opaque strings by the planner. The only
/// requirement is that they are non-empty and made of uppercase ASCII
/// letters or digits, which is checked at construction.
///
/// # Examples
///
/// ```
/// use freight_router::domain::PortCode;
///
/// let sha = PortCode::parse("CNSHA").unwrap();
/// assert_eq!(sha.as_str(), "CNSHA");
///
/// // Lowercase is rejected by `parse`, but `parse_normalized` accepts it
/// assert!(PortCode::parse("cnsha").is_err());
/// assert_eq!(PortCode::parse_normalized(" cnsha ").unwrap(), sha);
///
/// assert!(PortCode::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortCode(Box<str>);

impl PortCode {
    /// Longest code accepted.
    pub const MAX_LEN: usize = 16;

    /// Parse a port code from a string.
    ///
    /// The input must be 1 to [`PortCode::MAX_LEN`] uppercase ASCII letters
    /// or digits.
    pub fn parse(s: &str) -> Result<Self, InvalidPortCode> {
        if s.is_empty() {
            return Err(InvalidPortCode {
                reason: "must not be empty",
            });
        }

        if s.len() > Self::MAX_LEN {
            return Err(InvalidPortCode {
                reason: "must be at most 16 characters",
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(InvalidPortCode {
                reason: "must be uppercase ASCII letters or digits",
            });
        }

        Ok(PortCode(s.into()))
    }

    /// Parse user input, trimming whitespace and upper-casing first.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidPortCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the port code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PortCode({})", self.as_str())
    }
}

impl fmt::Display for PortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PortCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
