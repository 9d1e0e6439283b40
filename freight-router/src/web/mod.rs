//! Web layer for the freight route planner.
//!
//! Provides a JSON endpoint for route queries and a health check.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
