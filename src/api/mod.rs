//! Read-only REST API over completed scenario runs.
//!
//! Provides three GET endpoints:
//! - `/scenarios`: configuration plus metrics per factory pattern
//! - `/scenarios/{pattern}/hours`: hourly records with optional range filtering
//! - `/comparison`: pattern A versus pattern B

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::config::ScenarioConfig;
use crate::scenario::{ScenarioOutcome, compare};
use crate::sim::metrics::Comparison;

pub use types::{ErrorResponse, HoursQuery, ScenarioSummary, ScenariosResponse};

/// Immutable application state shared across all request handlers.
///
/// Built once after the runs complete and wrapped in `Arc`.
pub struct AppState {
    /// Scenario configuration the runs used.
    pub config: ScenarioConfig,
    /// One outcome per factory pattern.
    pub outcomes: Vec<ScenarioOutcome>,
    /// A/B comparison, when both patterns ran.
    pub comparison: Option<Comparison>,
}

impl AppState {
    /// Wraps finished runs, deriving the comparison.
    pub fn new(config: ScenarioConfig, outcomes: Vec<ScenarioOutcome>) -> Self {
        let comparison = compare(&outcomes);
        Self {
            config,
            outcomes,
            comparison,
        }
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/scenarios", get(handlers::list_scenarios))
        .route("/scenarios/{pattern}/hours", get(handlers::get_hours))
        .route("/comparison", get(handlers::get_comparison))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
