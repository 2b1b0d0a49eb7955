//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::config::ScenarioConfig;
use crate::profiles::FactoryPattern;
use crate::scenario::ScenarioOutcome;
use crate::sim::metrics::Metrics;

/// `GET /scenarios` body.
#[derive(Debug, Serialize)]
pub struct ScenariosResponse {
    /// Configuration shared by all scenarios.
    pub config: ScenarioConfig,
    /// One entry per factory pattern.
    pub scenarios: Vec<ScenarioSummary>,
}

/// Metrics of one scenario without its hourly records.
#[derive(Debug, Serialize)]
pub struct ScenarioSummary {
    /// Factory pattern.
    pub pattern: FactoryPattern,
    /// Identifier accepted by `/scenarios/{pattern}/hours`.
    pub slug: &'static str,
    /// Number of simulated hours.
    pub hours: usize,
    /// Hours whose allocation failed the conservation check.
    pub conservation_warnings: usize,
    /// Summary indicators.
    pub metrics: Metrics,
}

impl From<&ScenarioOutcome> for ScenarioSummary {
    fn from(o: &ScenarioOutcome) -> Self {
        Self {
            pattern: o.pattern,
            slug: o.pattern.slug(),
            hours: o.result.hours(),
            conservation_warnings: o.result.conservation_warnings,
            metrics: o.metrics.clone(),
        }
    }
}

/// Optional range query parameters for the hours endpoint.
#[derive(Debug, Deserialize)]
pub struct HoursQuery {
    /// First hour (inclusive).
    pub from: Option<usize>,
    /// Last hour (inclusive).
    pub to: Option<usize>,
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
