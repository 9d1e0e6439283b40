//! Connection rules shared by both pathfinders.

use chrono::NaiveDate;

use crate::domain::Sailing;

/// Whether `candidate` can follow `previous` in an itinerary.
///
/// The first leg is always valid. A later leg must not depart before the
/// previous one arrives; same-day transfers are allowed.
pub fn valid_connection(previous: Option<&Sailing>, candidate: &Sailing) -> bool {
    match previous {
        None => true,
        Some(prev) => candidate.departure_date() >= prev.arrival_date(),
    }
}

/// Days spent waiting in port before `departure`. Zero on the first leg.
pub fn layover_days(previous_arrival: Option<NaiveDate>, departure: NaiveDate) -> i64 {
    previous_arrival
        .map(|arrival| (departure - arrival).num_days().max(0))
        .unwrap_or(0)
}
