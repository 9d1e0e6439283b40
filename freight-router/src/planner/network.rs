//! Weighted sailing networks for the pathfinders.
//!
//! A network groups priced sailings by origin port. Every port that appears
//! as an origin or destination has an entry, possibly empty, so lookups
//! never need an existence check.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{PortCode, Rate, Sailing};
use crate::fx::{ConversionError, ExchangeRateLookup, convert_to_eur};

/// Edge weight in EUR cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CostCents(pub i64);

/// Edge weight in whole days at sea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DurationDays(pub i64);

/// One sailing as a weighted edge.
#[derive(Debug, Clone)]
pub struct Edge<W> {
    sailing: Arc<Sailing>,
    weight: W,
}

impl<W: Copy> Edge<W> {
    pub fn sailing(&self) -> &Arc<Sailing> {
        &self.sailing
    }

    pub fn destination(&self) -> &PortCode {
        self.sailing.destination()
    }

    pub fn departure_date(&self) -> NaiveDate {
        self.sailing.departure_date()
    }

    pub fn arrival_date(&self) -> NaiveDate {
        self.sailing.arrival_date()
    }

    pub fn weight(&self) -> W {
        self.weight
    }
}

/// Adjacency list of weighted edges keyed by origin port.
#[derive(Debug, Clone)]
pub struct Network<W> {
    edges: BTreeMap<PortCode, Vec<Edge<W>>>,
}

impl<W> Default for Network<W> {
    fn default() -> Self {
        Self {
            edges: BTreeMap::new(),
        }
    }
}

impl<W> Network<W> {
    /// Build a network from sailings, weighing each priced sailing with
    /// `weigh`. Sailings without a rate are skipped. Edge lists are sorted by
    /// sailing code.
    pub fn build<F, E>(sailings: &[Arc<Sailing>], mut weigh: F) -> Result<Self, E>
    where
        F: FnMut(&Sailing, &Rate) -> Result<W, E>,
    {
        let mut edges: BTreeMap<PortCode, Vec<Edge<W>>> = BTreeMap::new();
        let mut unpriced = 0usize;

        for sailing in sailings {
            let Some(rate) = sailing.rate() else {
                unpriced += 1;
                continue;
            };

            let weight = weigh(sailing, rate)?;
            edges.entry(sailing.destination().clone()).or_default();
            edges
                .entry(sailing.origin().clone())
                .or_default()
                .push(Edge {
                    sailing: Arc::clone(sailing),
                    weight,
                });
        }

        for list in edges.values_mut() {
            list.sort_by(|a, b| a.sailing.code().cmp(b.sailing.code()));
        }

        let network = Self { edges };
        debug!(
            ports = network.port_count(),
            edges = network.edge_count(),
            unpriced,
            "Built sailing network"
        );
        Ok(network)
    }

    /// Outgoing edges of `port`; empty for unknown ports.
    pub fn edges_from(&self, port: &PortCode) -> &[Edge<W>] {
        self.edges.get(port).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All ports in the network, in code order.
    pub fn ports(&self) -> impl Iterator<Item = &PortCode> {
        self.edges.keys()
    }

    pub fn port_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Build a network weighted by EUR cost on each sailing's departure date.
///
/// Fails if any priced sailing cannot be converted.
pub fn build_cost_network<L>(
    sailings: &[Arc<Sailing>],
    lookup: &L,
) -> Result<Network<CostCents>, ConversionError>
where
    L: ExchangeRateLookup + ?Sized,
{
    Network::build(sailings, |sailing, rate| {
        convert_to_eur(lookup, rate.amount(), sailing.departure_date()).map(CostCents)
    })
}

/// Build a network weighted by days at sea. No currency lookup happens.
pub fn build_duration_network(sailings: &[Arc<Sailing>]) -> Network<DurationDays> {
    let built = Network::build(sailings, |sailing, _| {
        Ok::<_, Infallible>(DurationDays(sailing.duration_days()))
    });
    match built {
        Ok(network) => network,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Currency, Money};
    use crate::fx::{ExchangeRate, ExchangeRates};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn port(s: &str) -> PortCode {
        PortCode::parse(s).unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sailing(code: &str, from: &str, to: &str, dep: &str, arr: &str) -> Sailing {
        Sailing::new(code, port(from), port(to), day(dep), day(arr)).unwrap()
    }

    fn priced(s: Sailing, cents: i64, currency: &str) -> Arc<Sailing> {
        let money = Money::from_cents(cents, Currency::parse(currency).unwrap());
        Arc::new(s.with_rate(Rate::new(money).unwrap()))
    }

    fn rates() -> ExchangeRates {
        [ExchangeRate::new(
            day("2022-02-16"),
            Currency::parse("USD").unwrap(),
            Decimal::from_str("1.1482").unwrap(),
        )
        .unwrap()]
        .into_iter()
        .collect()
    }

    fn fixture() -> Vec<Arc<Sailing>> {
        vec![
            priced(
                sailing("ERXQ", "CNSHA", "ESBCN", "2022-01-29", "2022-02-12"),
                26196,
                "EUR",
            ),
            priced(
                sailing("ETRG", "ESBCN", "NLRTM", "2022-02-16", "2022-02-20"),
                6996,
                "USD",
            ),
            Arc::new(sailing("NORT", "CNSHA", "BRSSZ", "2022-02-01", "2022-03-01")),
        ]
    }

    #[test]
    fn cost_network_converts_to_eur() {
        let network = build_cost_network(&fixture(), &rates()).unwrap();

        let from_shanghai = network.edges_from(&port("CNSHA"));
        assert_eq!(from_shanghai.len(), 1);
        assert_eq!(from_shanghai[0].weight(), CostCents(26196));

        let from_barcelona = network.edges_from(&port("ESBCN"));
        assert_eq!(from_barcelona[0].weight(), CostCents(6093));
        assert_eq!(from_barcelona[0].destination(), &port("NLRTM"));
    }

    #[test]
    fn unpriced_sailings_are_skipped_in_both_modes() {
        let cost = build_cost_network(&fixture(), &rates()).unwrap();
        let duration = build_duration_network(&fixture());

        assert!(cost.ports().all(|p| p != &port("BRSSZ")));
        assert!(duration.ports().all(|p| p != &port("BRSSZ")));
        assert_eq!(cost.edge_count(), 2);
        assert_eq!(duration.edge_count(), 2);
    }

    #[test]
    fn destinations_have_empty_entries() {
        let network = build_duration_network(&fixture());
        let ports: Vec<_> = network.ports().map(PortCode::as_str).collect();
        assert_eq!(ports, vec!["CNSHA", "ESBCN", "NLRTM"]);
        assert!(network.edges_from(&port("NLRTM")).is_empty());
    }

    #[test]
    fn unknown_port_has_no_edges() {
        let network = build_duration_network(&fixture());
        assert!(network.edges_from(&port("ZZZZZ")).is_empty());
    }

    #[test]
    fn duration_network_weights_days() {
        let network = build_duration_network(&fixture());
        assert_eq!(network.edges_from(&port("CNSHA"))[0].weight(), DurationDays(14));
        assert_eq!(network.edges_from(&port("ESBCN"))[0].weight(), DurationDays(4));
    }

    #[test]
    fn missing_rate_fails_cost_build() {
        let err = build_cost_network(&fixture(), &ExchangeRates::new()).unwrap_err();
        assert!(matches!(err, ConversionError::MissingExchangeRate { .. }));
    }

    #[test]
    fn edges_sorted_by_code() {
        let sailings = vec![
            priced(sailing("ZZ", "A", "B", "2022-01-01", "2022-01-02"), 100, "EUR"),
            priced(sailing("AA", "A", "C", "2022-01-01", "2022-01-02"), 100, "EUR"),
            priced(sailing("MM", "A", "B", "2022-01-01", "2022-01-02"), 100, "EUR"),
        ];
        let network = build_duration_network(&sailings);
        let codes: Vec<_> = network
            .edges_from(&port("A"))
            .iter()
            .map(|e| e.sailing().code())
            .collect();
        assert_eq!(codes, vec!["AA", "MM", "ZZ"]);
    }

    #[test]
    fn empty_input_builds_empty_network() {
        let network = build_duration_network(&[]);
        assert!(network.is_empty());
        assert_eq!(network.port_count(), 0);
    }
}
