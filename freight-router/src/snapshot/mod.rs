//! Read-only snapshot of sailings, rates and exchange rates.
//!
//! The planner never loads data itself. It asks a [`SnapshotProvider`] for
//! exactly the records each strategy needs; [`Snapshot`] is the in-memory
//! implementation built from the freight feed.

mod feed;

use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{Currency, DomainError, PortCode, Sailing};
use crate::fx::{ExchangeRateLookup, ExchangeRates};

pub use feed::{FeedDocument, FeedError, FeedRate, FeedSailing};

/// Trait for providing sailing data to the planner.
///
/// Implementations must return the same records for the duration of a query.
pub trait SnapshotProvider: ExchangeRateLookup {
    /// All sailings from `origin` directly to `destination`, priced or not.
    fn direct_sailings(&self, origin: &PortCode, destination: &PortCode) -> Vec<Arc<Sailing>>;

    /// Every `(origin, destination)` pair served by some sailing.
    fn port_pairs(&self) -> Vec<(PortCode, PortCode)>;

    /// Sailings whose origin and destination are both in `ports`.
    fn sailings_within(&self, ports: &BTreeSet<PortCode>) -> Vec<Arc<Sailing>>;
}

/// Immutable in-memory snapshot.
///
/// Sailings are kept sorted by code so every read returns them in a stable
/// order. A snapshot can be shared across threads and queried concurrently
/// without locking.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    sailings: Vec<Arc<Sailing>>,
    exchange_rates: ExchangeRates,
}

impl Snapshot {
    /// Build a snapshot, checking that sailing codes are unique.
    pub fn new(
        sailings: Vec<Sailing>,
        exchange_rates: ExchangeRates,
    ) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(sailings.len());
        for sailing in &sailings {
            if !seen.insert(sailing.code()) {
                return Err(DomainError::DuplicateSailingCode(sailing.code().to_string()));
            }
        }

        Ok(Self::from_unique(sailings, exchange_rates))
    }

    /// Build from sailings whose codes are already known to be unique.
    fn from_unique(sailings: Vec<Sailing>, exchange_rates: ExchangeRates) -> Self {
        let mut sailings: Vec<Arc<Sailing>> = sailings.into_iter().map(Arc::new).collect();
        sailings.sort_by(|a, b| a.code().cmp(b.code()));

        Self {
            sailings,
            exchange_rates,
        }
    }

    /// Parse a freight feed JSON document.
    pub fn from_feed_json(json: &str) -> Result<Self, FeedError> {
        let document: FeedDocument =
            serde_json::from_str(json).map_err(|e| FeedError::Json(e.to_string()))?;
        document.into_snapshot()
    }

    /// Read and parse a freight feed file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| FeedError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_feed_json(&json)
    }

    /// All sailings, sorted by code.
    pub fn sailings(&self) -> &[Arc<Sailing>] {
        &self.sailings
    }

    /// The exchange-rate table.
    pub fn exchange_rates(&self) -> &ExchangeRates {
        &self.exchange_rates
    }

    /// Returns the number of sailings.
    pub fn len(&self) -> usize {
        self.sailings.len()
    }

    /// Returns true if the snapshot holds no sailings.
    pub fn is_empty(&self) -> bool {
        self.sailings.is_empty()
    }
}

impl ExchangeRateLookup for Snapshot {
    fn rate_for(&self, date: NaiveDate, currency: Currency) -> Option<Decimal> {
        self.exchange_rates.rate_for(date, currency)
    }
}

impl SnapshotProvider for Snapshot {
    fn direct_sailings(&self, origin: &PortCode, destination: &PortCode) -> Vec<Arc<Sailing>> {
        self.sailings
            .iter()
            .filter(|s| s.origin() == origin && s.destination() == destination)
            .cloned()
            .collect()
    }

    fn port_pairs(&self) -> Vec<(PortCode, PortCode)> {
        self.sailings
            .iter()
            .map(|s| (s.origin().clone(), s.destination().clone()))
            .collect()
    }

    fn sailings_within(&self, ports: &BTreeSet<PortCode>) -> Vec<Arc<Sailing>> {
        if ports.is_empty() {
            return Vec::new();
        }

        self.sailings
            .iter()
            .filter(|s| ports.contains(s.origin()) && ports.contains(s.destination()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Money, Rate};

    fn port(s: &str) -> PortCode {
        PortCode::parse(s).unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sailing(code: &str, from: &str, to: &str) -> Sailing {
        Sailing::new(code, port(from), port(to), day("2022-01-01"), day("2022-01-10"))
            .unwrap()
            .with_rate(Rate::new(Money::from_cents(100, Currency::EUR)).unwrap())
    }

    fn snapshot() -> Snapshot {
        Snapshot::new(
            vec![
                sailing("MNOP", "CNSHA", "NLRTM"),
                sailing("ERXQ", "CNSHA", "ESBCN"),
                sailing("ETRG", "ESBCN", "NLRTM"),
                sailing("ABCD", "CNSHA", "NLRTM"),
                sailing("XY", "X", "Y"),
            ],
            ExchangeRates::new(),
        )
        .unwrap()
    }

    #[test]
    fn sailings_sorted_by_code() {
        let snap = snapshot();
        let codes: Vec<_> = snap.sailings().iter().map(|s| s.code()).collect();
        assert_eq!(codes, vec!["ABCD", "ERXQ", "ETRG", "MNOP", "XY"]);
        assert_eq!(snap.len(), 5);
    }

    #[test]
    fn rejects_duplicate_codes() {
        let result = Snapshot::new(
            vec![sailing("ABCD", "A", "B"), sailing("ABCD", "B", "C")],
            ExchangeRates::new(),
        );
        assert_eq!(
            result.unwrap_err(),
            DomainError::DuplicateSailingCode("ABCD".into())
        );
    }

    #[test]
    fn direct_sailings_match_both_ports() {
        let snap = snapshot();
        let direct = snap.direct_sailings(&port("CNSHA"), &port("NLRTM"));
        let codes: Vec<_> = direct.iter().map(|s| s.code()).collect();
        assert_eq!(codes, vec!["ABCD", "MNOP"]);

        assert!(snap.direct_sailings(&port("NLRTM"), &port("CNSHA")).is_empty());
    }

    #[test]
    fn port_pairs_cover_every_sailing() {
        let snap = snapshot();
        let pairs = snap.port_pairs();
        assert_eq!(pairs.len(), 5);
        assert!(pairs.contains(&(port("ESBCN"), port("NLRTM"))));
    }

    #[test]
    fn sailings_within_requires_both_ends() {
        let snap = snapshot();
        let ports: BTreeSet<_> = [port("CNSHA"), port("ESBCN")].into_iter().collect();
        let codes: Vec<_> = snap
            .sailings_within(&ports)
            .iter()
            .map(|s| s.code().to_string())
            .collect();
        assert_eq!(codes, vec!["ERXQ"]);
    }

    #[test]
    fn sailings_within_empty_set_is_empty() {
        assert!(snapshot().sailings_within(&BTreeSet::new()).is_empty());
    }
}
