//! Freight route planner.
//!
//! Finds shipping itineraries between ports over a snapshot of sailings,
//! rates and exchange rates, optimising for the cheapest direct sailing,
//! the cheapest itinerary or the fastest itinerary.

pub mod cache;
pub mod config;
pub mod domain;
pub mod fx;
pub mod planner;
pub mod snapshot;
pub mod web;
