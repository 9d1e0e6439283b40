//! Route planning over a sailing snapshot.
//!
//! A query narrows the port topology with a hop-bounded reachability pass,
//! builds a weighted network from the surviving sailings, and runs either a
//! cost or a duration search. Both searches enforce the same connection
//! rule: a leg may not depart before the previous leg arrives.

mod cheapest;
mod config;
mod connection;
mod connectivity;
mod fastest;
mod itinerary;
mod network;
mod route;
mod strategy;

pub use cheapest::cheapest_path;
pub use config::SearchConfig;
pub use connection::{layover_days, valid_connection};
pub use connectivity::PortConnectivity;
pub use fastest::fastest_path;
pub use network::{
    CostCents, DurationDays, Edge, Network, build_cost_network, build_duration_network,
};
pub use route::{RouteLeg, RouteResult};
pub use strategy::{Criterion, RouteError, RoutePlanner};
