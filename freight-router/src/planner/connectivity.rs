//! Hop-bounded reachability pruning over the port topology.
//!
//! Before any dated search runs, the planner narrows the candidate ports to
//! those lying on some origin-to-destination path of at most `max_hops`
//! edges in each direction. This looks only at which ports are linked by a
//! sailing. Dates and rates are ignored, so the result over-approximates the
//! ports a feasible itinerary can use.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::domain::PortCode;

/// Deduplicated port adjacency in both directions.
#[derive(Debug, Clone, Default)]
pub struct PortConnectivity {
    forward: BTreeMap<PortCode, BTreeSet<PortCode>>,
    backward: BTreeMap<PortCode, BTreeSet<PortCode>>,
}

impl PortConnectivity {
    /// Build adjacency from `(origin, destination)` pairs. Repeated pairs
    /// collapse to one link.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (PortCode, PortCode)>,
    {
        let mut connectivity = Self::default();
        for (origin, destination) in pairs {
            connectivity
                .backward
                .entry(destination.clone())
                .or_default()
                .insert(origin.clone());
            connectivity
                .forward
                .entry(origin)
                .or_default()
                .insert(destination);
        }
        connectivity
    }

    /// Ports within `max_hops` of `origin` that can also reach `destination`
    /// within `max_hops`.
    ///
    /// Returns an empty set when `origin == destination`.
    pub fn relevant_ports(
        &self,
        origin: &PortCode,
        destination: &PortCode,
        max_hops: usize,
    ) -> BTreeSet<PortCode> {
        if origin == destination {
            return BTreeSet::new();
        }

        let forward = bounded_reach(&self.forward, origin, max_hops);
        let backward = bounded_reach(&self.backward, destination, max_hops);

        let relevant: BTreeSet<PortCode> = forward.intersection(&backward).cloned().collect();

        debug!(
            %origin,
            %destination,
            max_hops,
            forward = forward.len(),
            backward = backward.len(),
            relevant = relevant.len(),
            "Pruned port topology"
        );

        relevant
    }
}

/// Level-by-level BFS from `start`, expanding at most `max_hops` levels.
/// The start port is always included.
fn bounded_reach(
    adjacency: &BTreeMap<PortCode, BTreeSet<PortCode>>,
    start: &PortCode,
    max_hops: usize,
) -> BTreeSet<PortCode> {
    let mut visited = BTreeSet::from([start.clone()]);
    let mut frontier = vec![start.clone()];

    for level in 1..=max_hops {
        if frontier.is_empty() {
            break;
        }

        let mut next = Vec::new();
        for port in &frontier {
            for neighbour in adjacency.get(port).into_iter().flatten() {
                if visited.insert(neighbour.clone()) {
                    next.push(neighbour.clone());
                }
            }
        }

        trace!(%start, level, added = next.len(), "Expanded BFS level");
        frontier = next;
    }

    visited
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(s: &str) -> PortCode {
        PortCode::parse(s).unwrap()
    }

    fn pairs(links: &[(&str, &str)]) -> PortConnectivity {
        PortConnectivity::from_pairs(links.iter().map(|(a, b)| (port(a), port(b))))
    }

    fn names(set: &BTreeSet<PortCode>) -> Vec<&str> {
        set.iter().map(PortCode::as_str).collect()
    }

    fn chain() -> PortConnectivity {
        pairs(&[("A", "B"), ("B", "C"), ("C", "D"), ("D", "E"), ("E", "F")])
    }

    #[test]
    fn duplicate_pairs_collapse() {
        let conn = pairs(&[("A", "B"), ("A", "B"), ("B", "A")]);
        let links: usize = conn.forward.values().map(BTreeSet::len).sum();
        assert_eq!(links, 2);
        let succ: Vec<_> = conn.forward[&port("A")].iter().map(PortCode::as_str).collect();
        assert_eq!(succ, vec!["B"]);
    }

    #[test]
    fn short_hop_bound_on_long_chain_is_empty() {
        let relevant = chain().relevant_ports(&port("A"), &port("F"), 1);
        assert!(relevant.is_empty());
    }

    #[test]
    fn sufficient_hop_bound_includes_interior() {
        let relevant = chain().relevant_ports(&port("A"), &port("F"), 5);
        assert_eq!(names(&relevant), vec!["A", "B", "C", "D", "E", "F"]);
    }

    #[test]
    fn bound_counts_legs_inclusively() {
        let conn = pairs(&[("A", "B"), ("B", "C")]);
        assert_eq!(
            names(&conn.relevant_ports(&port("A"), &port("C"), 2)),
            vec!["A", "B", "C"]
        );
        assert_eq!(
            names(&conn.relevant_ports(&port("A"), &port("C"), 1)),
            vec!["B"]
        );
    }

    #[test]
    fn partial_bound_meets_in_the_middle() {
        // Forward from A stops at D, backward from F stops at C
        let relevant = chain().relevant_ports(&port("A"), &port("F"), 3);
        assert_eq!(names(&relevant), vec!["C", "D"]);
    }

    #[test]
    fn same_origin_and_destination_is_empty() {
        let conn = pairs(&[("A", "B"), ("B", "A"), ("A", "A")]);
        assert!(conn.relevant_ports(&port("A"), &port("A"), 4).is_empty());
    }

    #[test]
    fn disconnected_components_are_empty() {
        let conn = pairs(&[("A", "B"), ("X", "Y")]);
        assert!(conn.relevant_ports(&port("A"), &port("Y"), 4).is_empty());
    }

    #[test]
    fn unknown_ports_are_empty() {
        assert!(chain().relevant_ports(&port("Q"), &port("F"), 4).is_empty());
    }

    #[test]
    fn dead_end_branches_are_pruned() {
        let conn = pairs(&[
            ("CNSHA", "ESBCN"),
            ("ESBCN", "NLRTM"),
            ("CNSHA", "NLRTM"),
            ("CNSHA", "BRSSZ"),
            ("USNYC", "NLRTM"),
        ]);
        let relevant = conn.relevant_ports(&port("CNSHA"), &port("NLRTM"), 4);
        assert_eq!(names(&relevant), vec!["CNSHA", "ESBCN", "NLRTM"]);
    }

    #[test]
    fn self_loops_do_not_break_search() {
        let conn = pairs(&[("A", "A"), ("A", "B")]);
        let relevant = conn.relevant_ports(&port("A"), &port("B"), 1);
        assert_eq!(names(&relevant), vec!["A", "B"]);
    }
}
