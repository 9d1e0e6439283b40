//! Per-query search state shared by the pathfinders.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::connection::valid_connection;
use super::network::Network;
use crate::domain::{PortCode, Sailing};

/// Dense index over a network's ports, in port code order.
#[derive(Debug)]
pub(crate) struct PortIndex {
    ports: Vec<PortCode>,
    positions: HashMap<PortCode, usize>,
}

impl PortIndex {
    pub fn from_network<W>(network: &Network<W>) -> Self {
        let ports: Vec<PortCode> = network.ports().cloned().collect();
        let positions = ports
            .iter()
            .enumerate()
            .map(|(i, p)| (p.clone(), i))
            .collect();
        Self { ports, positions }
    }

    pub fn get(&self, port: &PortCode) -> Option<usize> {
        self.positions.get(port).copied()
    }

    pub fn port(&self, index: usize) -> &PortCode {
        &self.ports[index]
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }
}

/// Best-known predecessor sailing and port for each indexed port.
#[derive(Debug)]
pub(crate) struct Trail {
    sailing_into: Vec<Option<Arc<Sailing>>>,
    previous_port: Vec<Option<usize>>,
}

impl Trail {
    pub fn new(port_count: usize) -> Self {
        Self {
            sailing_into: vec![None; port_count],
            previous_port: vec![None; port_count],
        }
    }

    /// Record that `to` is best reached from `from` by `sailing`.
    pub fn record(&mut self, from: usize, to: usize, sailing: &Arc<Sailing>) {
        self.sailing_into[to] = Some(Arc::clone(sailing));
        self.previous_port[to] = Some(from);
    }

    /// The sailing currently recorded as arriving at `port`.
    pub fn sailing_into(&self, port: usize) -> Option<&Sailing> {
        self.sailing_into[port].as_deref()
    }

    /// Walk predecessors back from `goal` to `start` and return the legs in
    /// departure order.
    ///
    /// Returns an empty itinerary if the chain does not end at `start` or if
    /// any consecutive pair of legs fails the connection rule. Relaxation
    /// can overwrite a predecessor after its successors were recorded, so
    /// the final chain is checked as a whole.
    pub fn reconstruct(&self, start: usize, goal: usize) -> Vec<Arc<Sailing>> {
        let mut legs = Vec::new();
        let mut current = goal;

        while current != start {
            if legs.len() >= self.previous_port.len() {
                debug!(goal, "Predecessor chain loops, discarding");
                return Vec::new();
            }

            let (Some(sailing), Some(previous)) =
                (&self.sailing_into[current], self.previous_port[current])
            else {
                return Vec::new();
            };

            legs.push(Arc::clone(sailing));
            current = previous;
        }

        legs.reverse();

        let feasible = legs
            .windows(2)
            .all(|pair| valid_connection(Some(pair[0].as_ref()), &pair[1]));
        if !feasible {
            debug!(legs = legs.len(), "Predecessor chain breaks a connection, discarding");
            return Vec::new();
        }

        legs
    }
}
