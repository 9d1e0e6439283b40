//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

/// Query string for `GET /route`.
///
/// Missing fields deserialize as empty strings so they are reported by the
/// planner's own validation rather than by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct RouteQuery {
    /// Origin port code
    #[serde(default)]
    pub origin: String,

    /// Destination port code
    #[serde(default)]
    pub destination: String,

    /// `cheapest-direct`, `cheapest` or `fastest`
    #[serde(default, alias = "criterion")]
    pub criteria: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
