//! Cheapest itinerary search.
//!
//! A Bellman-Ford relaxation over EUR cost, with one twist: an edge out of a
//! port is only usable if it connects with the sailing currently recorded as
//! the best way into that port. Feasibility therefore depends on search
//! state, and a costlier arrival that would connect is not kept alongside
//! the cheapest one.

use std::sync::Arc;

use tracing::{debug, trace};

use super::connection::valid_connection;
use super::itinerary::{PortIndex, Trail};
use super::network::{CostCents, Network};
use crate::domain::{PortCode, Sailing};

/// Find the cheapest feasible itinerary from `origin` to `destination`.
///
/// Returns the legs in departure order, or an empty list when no feasible
/// itinerary exists or `origin == destination`. Among equal-cost
/// alternatives the first improvement found in port and sailing code order
/// wins.
///
/// A later round can replace the sailing into an intermediate port after
/// onward legs were recorded from it. If the final chain no longer connects
/// the whole result is discarded, even when some other feasible itinerary
/// such as a direct sailing exists.
pub fn cheapest_path(
    network: &Network<CostCents>,
    origin: &PortCode,
    destination: &PortCode,
) -> Vec<Arc<Sailing>> {
    if origin == destination {
        return Vec::new();
    }

    let index = PortIndex::from_network(network);
    let (Some(start), Some(goal)) = (index.get(origin), index.get(destination)) else {
        debug!(%origin, %destination, "Endpoint missing from cost network");
        return Vec::new();
    };

    let port_count = index.len();
    let mut cost: Vec<Option<i64>> = vec![None; port_count];
    cost[start] = Some(0);
    let mut trail = Trail::new(port_count);
    let mut rounds = 0;

    for round in 1..port_count {
        rounds = round;
        let mut updated = false;

        for here in 0..port_count {
            let Some(base) = cost[here] else {
                continue;
            };

            for edge in network.edges_from(index.port(here)) {
                if !valid_connection(trail.sailing_into(here), edge.sailing()) {
                    continue;
                }
                let Some(next) = index.get(edge.destination()) else {
                    continue;
                };

                let candidate = base.saturating_add(edge.weight().0);
                if cost[next].is_none_or(|current| candidate < current) {
                    trace!(
                        sailing = edge.sailing().code(),
                        to = %index.port(next),
                        cents = candidate,
                        "Relaxed cost edge"
                    );
                    cost[next] = Some(candidate);
                    trail.record(here, next, edge.sailing());
                    updated = true;
                }
            }
        }

        if !updated {
            break;
        }
    }

    debug!(
        %origin,
        %destination,
        ports = port_count,
        rounds,
        cents = cost[goal],
        "Cost search finished"
    );

    if cost[goal].is_none() {
        return Vec::new();
    }
    trail.reconstruct(start, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Currency, Money, Rate};
    use crate::fx::ExchangeRates;
    use crate::planner::network::build_cost_network;
    use chrono::NaiveDate;

    fn port(s: &str) -> PortCode {
        PortCode::parse(s).unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn eur(code: &str, from: &str, to: &str, dep: &str, arr: &str, cents: i64) -> Arc<Sailing> {
        let rate = Rate::new(Money::from_cents(cents, Currency::EUR)).unwrap();
        Arc::new(
            Sailing::new(code, port(from), port(to), day(dep), day(arr))
                .unwrap()
                .with_rate(rate),
        )
    }

    fn search(sailings: &[Arc<Sailing>], from: &str, to: &str) -> Vec<String> {
        let network = build_cost_network(sailings, &ExchangeRates::new()).unwrap();
        cheapest_path(&network, &port(from), &port(to))
            .iter()
            .map(|s| s.code().to_string())
            .collect()
    }

    fn barcelona_fixture(etrg_departure: &str, etrg_arrival: &str) -> Vec<Arc<Sailing>> {
        vec![
            eur("ERXQ", "CNSHA", "ESBCN", "2022-01-29", "2022-02-12", 26196),
            eur("ETRG", "ESBCN", "NLRTM", etrg_departure, etrg_arrival, 6093),
            eur("MNOP", "CNSHA", "NLRTM", "2022-01-30", "2022-03-05", 41011),
        ]
    }

    #[test]
    fn overwritten_predecessor_discards_stale_chain() {
        let sailings = vec![
            eur("X1", "A", "B", "2022-01-01", "2022-01-05", 10),
            eur("DIRECT", "A", "C", "2022-01-01", "2022-01-20", 100),
            eur("AD", "A", "D", "2022-01-01", "2022-01-02", 1),
            eur("Y", "B", "C", "2022-01-06", "2022-01-08", 5),
            eur("Z", "D", "B", "2022-01-03", "2022-01-10", 2),
        ];

        // Z makes B cheaper but arrives after Y departs, so X1+Y is lost
        assert!(search(&sailings, "A", "C").is_empty());
        assert_eq!(search(&sailings, "A", "B"), vec!["AD", "Z"]);
    }

    #[test]
    fn direct_route() {
        let sailings = vec![eur("ABCD", "CNSHA", "NLRTM", "2022-01-30", "2022-03-05", 41011)];
        assert_eq!(search(&sailings, "CNSHA", "NLRTM"), vec!["ABCD"]);
    }

    #[test]
    fn cheaper_multi_hop_beats_direct() {
        // 26196 + 6093 = 32289 < 41011
        let sailings = barcelona_fixture("2022-02-16", "2022-02-20");
        assert_eq!(search(&sailings, "CNSHA", "NLRTM"), vec!["ERXQ", "ETRG"]);
    }

    #[test]
    fn infeasible_connection_falls_back_to_direct() {
        // ETRG leaves Barcelona before ERXQ arrives
        let sailings = barcelona_fixture("2022-02-10", "2022-02-14");
        assert_eq!(search(&sailings, "CNSHA", "NLRTM"), vec!["MNOP"]);
    }

    #[test]
    fn four_leg_route_beats_expensive_direct() {
        let sailings = vec![
            eur("LEG1", "CNSHA", "ESBCN", "2022-01-29", "2022-02-05", 15000),
            eur("EXPENSIVE", "CNSHA", "USNYC", "2022-01-30", "2022-03-15", 200000),
            eur("LEG2", "ESBCN", "NLRTM", "2022-02-10", "2022-02-15", 8000),
            eur("LEG3", "NLRTM", "BRSSZ", "2022-02-20", "2022-03-01", 12000),
            eur("LEG4", "BRSSZ", "USNYC", "2022-03-05", "2022-03-12", 9000),
        ];
        assert_eq!(
            search(&sailings, "CNSHA", "USNYC"),
            vec!["LEG1", "LEG2", "LEG3", "LEG4"]
        );
    }

    #[test]
    fn unreachable_destination_is_empty() {
        let sailings = vec![eur("ABCD", "CNSHA", "NLRTM", "2022-01-30", "2022-03-05", 41011)];
        assert!(search(&sailings, "NLRTM", "CNSHA").is_empty());

        let network = build_cost_network(&sailings, &ExchangeRates::new()).unwrap();
        assert!(cheapest_path(&network, &port("CNSHA"), &port("UNKNOWN")).is_empty());
    }

    #[test]
    fn empty_network_is_empty() {
        let network = Network::<CostCents>::default();
        assert!(cheapest_path(&network, &port("CNSHA"), &port("NLRTM")).is_empty());
    }

    #[test]
    fn same_origin_and_destination_is_empty() {
        let sailings = vec![
            eur("OUT", "CNSHA", "ESBCN", "2022-01-01", "2022-01-05", 100),
            eur("BACK", "ESBCN", "CNSHA", "2022-01-06", "2022-01-10", 100),
        ];
        assert!(search(&sailings, "CNSHA", "CNSHA").is_empty());
    }

    #[test]
    fn equal_cost_tie_goes_to_lower_code() {
        let sailings = vec![
            eur("ZULU", "A", "B", "2022-01-01", "2022-01-05", 500),
            eur("ALFA", "A", "B", "2022-01-02", "2022-01-06", 500),
        ];
        assert_eq!(search(&sailings, "A", "B"), vec!["ALFA"]);
    }

    #[test]
    fn best_arrival_governs_onward_feasibility() {
        // The cheap arrival at B is too late for the only onward sailing,
        // and the dearer early arrival is not retained.
        let sailings = vec![
            eur("CHEAPLATE", "A", "B", "2022-01-01", "2022-01-20", 100),
            eur("DEAREARLY", "A", "B", "2022-01-01", "2022-01-05", 900),
            eur("ONWARD", "B", "C", "2022-01-10", "2022-01-15", 100),
        ];
        assert!(search(&sailings, "A", "C").is_empty());
    }
}
