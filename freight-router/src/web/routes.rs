//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::domain::PortCode;
use crate::planner::{Criterion, RouteError, RoutePlanner};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/route", get(find_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Find a route between two ports.
async fn find_route(
    State(state): State<AppState>,
    Query(req): Query<RouteQuery>,
) -> Result<Response, AppError> {
    let criterion: Criterion = req.criteria.parse()?;
    let origin = PortCode::parse_normalized(&req.origin).map_err(|e| AppError::BadRequest {
        message: format!("origin: {e}"),
    })?;
    let destination =
        PortCode::parse_normalized(&req.destination).map_err(|e| AppError::BadRequest {
            message: format!("destination: {e}"),
        })?;

    if let Some(cached) = state.cache.get(&origin, &destination, criterion).await {
        debug!(%origin, %destination, %criterion, "Serving cached route");
        return Ok(Json(&*cached).into_response());
    }

    // The search is CPU-bound, keep it off the async workers
    let snapshot = Arc::clone(&state.snapshot);
    let config = Arc::clone(&state.config);
    let (from, to) = (origin.clone(), destination.clone());
    let result = tokio::task::spawn_blocking(move || {
        RoutePlanner::new(snapshot.as_ref(), config.as_ref()).find_route(&from, &to, criterion)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("route search task failed: {e}"),
    })??;
    let result = Arc::new(result);

    state
        .cache
        .insert(origin, destination, criterion, Arc::clone(&result))
        .await;

    Ok(Json(&*result).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::UnknownCriterion(_) | RouteError::InvalidPort(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            RouteError::MissingExchangeRate { .. } | RouteError::Conversion(_) => {
                AppError::Internal {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(%message, "Rejected route request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message } => {
                error!(%message, "Route request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
