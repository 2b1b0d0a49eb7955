//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, HoursQuery, ScenarioSummary, ScenariosResponse};
use crate::profiles::FactoryPattern;
use crate::sim::types::HourRecord;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: String) -> ApiError {
    (status, Json(ErrorResponse { error: message }))
}

/// Returns the configuration and the metrics of every scenario.
///
/// `GET /scenarios` → 200 + `ScenariosResponse` JSON
pub async fn list_scenarios(State(state): State<Arc<AppState>>) -> Json<ScenariosResponse> {
    Json(ScenariosResponse {
        config: state.config.clone(),
        scenarios: state.outcomes.iter().map(ScenarioSummary::from).collect(),
    })
}

/// Returns hourly records of one scenario, optionally filtered by hour range.
///
/// `GET /scenarios/pattern_a/hours` → 200 + `Vec<HourRecord>` JSON
/// `GET /scenarios/pattern_a/hours?from=N&to=M` → filtered range (inclusive)
/// `GET /scenarios/pattern_a/hours?from=10&to=5` → 400
/// `GET /scenarios/pattern_z/hours` → 404
pub async fn get_hours(
    State(state): State<Arc<AppState>>,
    Path(pattern): Path<String>,
    Query(query): Query<HoursQuery>,
) -> Result<Json<Vec<HourRecord>>, ApiError> {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err(error(
            StatusCode::BAD_REQUEST,
            format!("`from` ({from}) must be <= `to` ({to})"),
        ));
    }

    let outcome = FactoryPattern::from_slug(&pattern)
        .and_then(|p| state.outcomes.iter().find(|o| o.pattern == p))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, format!("unknown scenario `{pattern}`")))?;

    let records = outcome
        .result
        .records
        .iter()
        .filter(|r| r.hour >= from && r.hour <= to)
        .cloned()
        .collect();

    Ok(Json(records))
}

/// Returns the A/B comparison.
///
/// `GET /comparison` → 200 + `Comparison` JSON, or 404 when a pattern is missing
pub async fn get_comparison(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.comparison {
        Some(cmp) => Ok(Json(cmp.clone())),
        None => Err(error(
            StatusCode::NOT_FOUND,
            "comparison needs both factory patterns".to_string(),
        )),
    }
}
