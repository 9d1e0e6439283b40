//! Route planner facade.
//!
//! Dispatches a query to one of three strategies:
//!
//! - `cheapest-direct`: cheapest single sailing between the two ports
//! - `cheapest`: prune, build a cost network, run the cost search
//! - `fastest`: prune, build a duration network, run the duration search

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::cheapest::cheapest_path;
use super::config::SearchConfig;
use super::connectivity::PortConnectivity;
use super::fastest::fastest_path;
use super::network::{build_cost_network, build_duration_network};
use super::route::{RouteLeg, RouteResult};
use crate::domain::{Currency, InvalidPortCode, PortCode, Sailing};
use crate::fx::{ConversionError, convert_to_eur};
use crate::snapshot::SnapshotProvider;

/// Error from a route query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Criterion string not recognised
    #[error("unknown criterion {0:?}, expected cheapest-direct, cheapest or fastest")]
    UnknownCriterion(String),

    /// Origin or destination is not a valid port code
    #[error(transparent)]
    InvalidPort(#[from] InvalidPortCode),

    /// A rate needed for the search has no exchange rate on its date
    #[error("no exchange rate found for {currency} on {date}")]
    MissingExchangeRate { currency: Currency, date: NaiveDate },

    /// Any other conversion failure
    #[error("currency conversion failed: {0}")]
    Conversion(ConversionError),
}

impl From<ConversionError> for RouteError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::MissingExchangeRate { currency, date } => {
                Self::MissingExchangeRate { currency, date }
            }
            other => Self::Conversion(other),
        }
    }
}

/// Optimisation criterion for a route query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    CheapestDirect,
    Cheapest,
    Fastest,
}

impl Criterion {
    pub const ALL: [Criterion; 3] = [Self::CheapestDirect, Self::Cheapest, Self::Fastest];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheapestDirect => "cheapest-direct",
            Self::Cheapest => "cheapest",
            Self::Fastest => "fastest",
        }
    }
}

impl FromStr for Criterion {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RouteError::UnknownCriterion(s.to_string()))
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route planner over a snapshot.
///
/// Each query builds its own network and search state, so one planner (or
/// many) can share a snapshot across threads.
pub struct RoutePlanner<'a, S: SnapshotProvider + ?Sized> {
    snapshot: &'a S,
    config: &'a SearchConfig,
}

impl<'a, S: SnapshotProvider + ?Sized> RoutePlanner<'a, S> {
    /// Create a new planner.
    pub fn new(snapshot: &'a S, config: &'a SearchConfig) -> Self {
        Self { snapshot, config }
    }

    /// Parse raw query strings and run the query.
    ///
    /// The criterion is checked first so an unknown one is rejected before
    /// any port parsing or graph work.
    pub fn find_route_str(
        &self,
        origin: &str,
        destination: &str,
        criterion: &str,
    ) -> Result<RouteResult, RouteError> {
        let criterion: Criterion = criterion.parse()?;
        let origin = PortCode::parse_normalized(origin)?;
        let destination = PortCode::parse_normalized(destination)?;
        self.find_route(&origin, &destination, criterion)
    }

    /// Find a route from `origin` to `destination` under `criterion`.
    ///
    /// `origin == destination` is [`RouteResult::Unreachable`] for every
    /// criterion.
    pub fn find_route(
        &self,
        origin: &PortCode,
        destination: &PortCode,
        criterion: Criterion,
    ) -> Result<RouteResult, RouteError> {
        debug!(%origin, %destination, %criterion, "Finding route");

        if origin == destination {
            return Ok(RouteResult::Unreachable);
        }

        match criterion {
            Criterion::CheapestDirect => self.cheapest_direct(origin, destination),
            Criterion::Cheapest => self.cheapest(origin, destination),
            Criterion::Fastest => Ok(self.fastest(origin, destination)),
        }
    }

    fn cheapest_direct(
        &self,
        origin: &PortCode,
        destination: &PortCode,
    ) -> Result<RouteResult, RouteError> {
        let mut sailings = self.snapshot.direct_sailings(origin, destination);
        if sailings.is_empty() {
            return Ok(RouteResult::NoDirectSailings {
                origin: origin.clone(),
                destination: destination.clone(),
            });
        }
        sailings.sort_by(|a, b| a.code().cmp(b.code()));

        let mut best: Option<(i64, &Arc<Sailing>)> = None;
        for sailing in &sailings {
            let Some(rate) = sailing.rate() else {
                continue;
            };

            let cents = match convert_to_eur(self.snapshot, rate.amount(), sailing.departure_date())
            {
                Ok(cents) => cents,
                Err(err @ ConversionError::MissingExchangeRate { .. }) => {
                    warn!(sailing = sailing.code(), error = %err, "Skipping direct sailing");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            if best.is_none_or(|(lowest, _)| cents < lowest) {
                best = Some((cents, sailing));
            }
        }

        match best {
            Some((cents, sailing)) => {
                debug!(sailing = sailing.code(), cents, "Cheapest direct sailing");
                Ok(RouteResult::Route(vec![RouteLeg::from_sailing(sailing)]))
            }
            None => Ok(RouteResult::NoValidRates {
                origin: origin.clone(),
                destination: destination.clone(),
            }),
        }
    }

    fn cheapest(&self, origin: &PortCode, destination: &PortCode) -> Result<RouteResult, RouteError> {
        let sailings = self.candidate_sailings(origin, destination);
        let network = build_cost_network(&sailings, self.snapshot)?;
        let path = cheapest_path(&network, origin, destination);
        Ok(to_result(&path))
    }

    fn fastest(&self, origin: &PortCode, destination: &PortCode) -> RouteResult {
        let sailings = self.candidate_sailings(origin, destination);
        let network = build_duration_network(&sailings);
        let path = fastest_path(&network, origin, destination);
        to_result(&path)
    }

    /// Sailings between ports that survive hop-bounded pruning.
    fn candidate_sailings(&self, origin: &PortCode, destination: &PortCode) -> Vec<Arc<Sailing>> {
        let connectivity = PortConnectivity::from_pairs(self.snapshot.port_pairs());
        let relevant = connectivity.relevant_ports(origin, destination, self.config.max_hops);
        if relevant.is_empty() {
            return Vec::new();
        }

        let sailings = self.snapshot.sailings_within(&relevant);
        debug!(
            ports = relevant.len(),
            sailings = sailings.len(),
            "Loaded candidate sailings"
        );
        sailings
    }
}

fn to_result(path: &[Arc<Sailing>]) -> RouteResult {
    RouteResult::from_legs(path.iter().map(|s| RouteLeg::from_sailing(s)).collect())
}

#[cfg(test)]
#[path = "strategy_tests.rs"]
mod tests;
