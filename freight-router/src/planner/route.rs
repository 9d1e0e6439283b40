//! Query results and their JSON shape.

use serde::{Serialize, Serializer};

use crate::domain::{Currency, PortCode, Sailing};

/// One leg of a returned itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteLeg {
    pub origin_port: PortCode,
    pub destination_port: PortCode,
    /// `YYYY-MM-DD`
    pub departure_date: String,
    /// `YYYY-MM-DD`
    pub arrival_date: String,
    pub sailing_code: String,
    /// Rate in major units of `rate_currency`, formatted `D.DD`.
    pub rate: Option<String>,
    pub rate_currency: Option<Currency>,
}

impl RouteLeg {
    pub fn from_sailing(sailing: &Sailing) -> Self {
        let amount = sailing.rate().map(|r| r.amount());
        Self {
            origin_port: sailing.origin().clone(),
            destination_port: sailing.destination().clone(),
            departure_date: sailing.departure_date().format("%Y-%m-%d").to_string(),
            arrival_date: sailing.arrival_date().format("%Y-%m-%d").to_string(),
            sailing_code: sailing.code().to_string(),
            rate: amount.map(|m| m.format_amount()),
            rate_currency: amount.map(|m| m.currency()),
        }
    }
}

/// Outcome of a route query.
///
/// "No route" outcomes are ordinary values, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteResult {
    /// Legs in departure order. Never empty.
    Route(Vec<RouteLeg>),

    /// No feasible itinerary exists.
    Unreachable,

    /// `cheapest-direct` found no sailing between the ports.
    NoDirectSailings {
        origin: PortCode,
        destination: PortCode,
    },

    /// `cheapest-direct` found sailings but none with a usable rate.
    NoValidRates {
        origin: PortCode,
        destination: PortCode,
    },
}

impl RouteResult {
    /// Wrap an itinerary, mapping an empty one to [`RouteResult::Unreachable`].
    pub fn from_legs(legs: Vec<RouteLeg>) -> Self {
        if legs.is_empty() {
            Self::Unreachable
        } else {
            Self::Route(legs)
        }
    }

    /// The legs of a found route; empty for every other outcome.
    pub fn legs(&self) -> &[RouteLeg] {
        match self {
            Self::Route(legs) => legs,
            _ => &[],
        }
    }

    /// Codes of the legs in order.
    pub fn sailing_codes(&self) -> Vec<&str> {
        self.legs().iter().map(|l| l.sailing_code.as_str()).collect()
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Wire<'a> {
    Legs(&'a [RouteLeg]),
    Failure {
        error: String,
        error_code: &'static str,
    },
}

impl Serialize for RouteResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            Self::Route(legs) => Wire::Legs(legs),
            Self::Unreachable => Wire::Legs(&[]),
            Self::NoDirectSailings {
                origin,
                destination,
            } => Wire::Failure {
                error: format!("No direct sailings found between {origin} and {destination}"),
                error_code: "NO_DIRECT_SAILINGS",
            },
            Self::NoValidRates {
                origin,
                destination,
            } => Wire::Failure {
                error: format!(
                    "No sailings with valid rates found between {origin} and {destination}"
                ),
                error_code: "NO_VALID_RATES",
            },
        };
        wire.serialize(serializer)
    }
}
