//! Fastest itinerary search.
//!
//! Dijkstra over elapsed days, where each leg costs its layover in port plus
//! its days at sea. Like the cost search, an edge is only usable if it
//! connects with the best recorded arrival into its origin port.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, trace};

use super::connection::{layover_days, valid_connection};
use super::itinerary::{PortIndex, Trail};
use super::network::{DurationDays, Network};
use crate::domain::{PortCode, Sailing};

/// Frontier entry: elapsed days, port index, arrival date at that port.
/// Ordering on the full tuple makes pops deterministic.
type Frontier = BinaryHeap<Reverse<(i64, usize, Option<NaiveDate>)>>;

/// Find the feasible itinerary with the fewest elapsed days from the first
/// departure to the final arrival.
///
/// Returns the legs in departure order, or an empty list when no feasible
/// itinerary exists or `origin == destination`.
pub fn fastest_path(
    network: &Network<DurationDays>,
    origin: &PortCode,
    destination: &PortCode,
) -> Vec<Arc<Sailing>> {
    if origin == destination {
        return Vec::new();
    }

    let index = PortIndex::from_network(network);
    let (Some(start), Some(goal)) = (index.get(origin), index.get(destination)) else {
        debug!(%origin, %destination, "Endpoint missing from duration network");
        return Vec::new();
    };

    let port_count = index.len();
    let mut fastest: Vec<Option<i64>> = vec![None; port_count];
    fastest[start] = Some(0);
    let mut settled = vec![false; port_count];
    let mut trail = Trail::new(port_count);

    let mut frontier = Frontier::new();
    frontier.push(Reverse((0, start, None)));
    let mut pops = 0usize;

    while let Some(Reverse((days, here, arrival))) = frontier.pop() {
        if settled[here] {
            continue;
        }
        settled[here] = true;
        pops += 1;

        if here == goal {
            debug!(%origin, %destination, days, pops, "Duration search reached destination");
            return trail.reconstruct(start, goal);
        }

        for edge in network.edges_from(index.port(here)) {
            let Some(next) = index.get(edge.destination()) else {
                continue;
            };
            if settled[next] {
                continue;
            }
            if !valid_connection(trail.sailing_into(here), edge.sailing()) {
                continue;
            }

            let candidate = days + layover_days(arrival, edge.departure_date()) + edge.weight().0;
            if fastest[next].is_none_or(|current| candidate < current) {
                trace!(
                    sailing = edge.sailing().code(),
                    to = %index.port(next),
                    days = candidate,
                    "Relaxed duration edge"
                );
                fastest[next] = Some(candidate);
                trail.record(here, next, edge.sailing());
                frontier.push(Reverse((candidate, next, Some(edge.arrival_date()))));
            }
        }
    }

    debug!(%origin, %destination, pops, "Duration search exhausted frontier");
    Vec::new()
}
