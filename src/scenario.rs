//! Factory-pattern scenarios built from a [`ScenarioConfig`].
//!
//! Both patterns share the household, PV, public facility and EV inputs and
//! differ only in the factory curve. They own no common mutable state, so
//! [`run_all`] runs them in parallel.

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::config::ScenarioConfig;
use crate::profiles::{
    EvCharging, FactoryLoad, FactoryPattern, HouseholdLoad, Profile, PublicFacilityLoad, SolarPv,
};
use crate::sim::engine::{Engine, SimulationResult};
use crate::sim::error::SimError;
use crate::sim::metrics::{Comparison, Metrics};
use crate::sim::types::ProfileSet;

/// One completed scenario run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    /// Factory pattern the run used.
    pub pattern: FactoryPattern,
    /// Hourly records.
    pub result: SimulationResult,
    /// Summary indicators of `result`.
    pub metrics: Metrics,
}

/// Generates the hourly profiles for `pattern`.
///
/// Household, PV and EV series are per household; the engine scales them by
/// the fleet size. The factory noise is seeded from `simulation.seed`.
pub fn build_profiles(config: &ScenarioConfig, pattern: FactoryPattern) -> ProfileSet {
    let hours = config.hours();
    let hh = &config.household;
    ProfileSet {
        household_load: HouseholdLoad::new(hh.load_peak_kw).series(hours),
        factory_load: FactoryLoad::new(
            pattern,
            config.factory.base_kw,
            config.factory.peak_kw,
            config.simulation.seed,
        )
        .series(hours),
        public_load: PublicFacilityLoad::new(
            config.public_facility.base_kw,
            config.public_facility.peak_kw,
        )
        .series(hours),
        pv: SolarPv::new(hh.pv_capacity_kw, hh.pv_peak_fraction).series(hours),
        ev: EvCharging::new(config.ev.charging_kw, &config.ev.charging_hours).series(hours),
    }
}

/// Runs a single pattern.
///
/// # Errors
///
/// Returns a [`SimError`] if the fleet configuration is invalid or a battery
/// leaves its bounds during the run.
pub fn run_pattern(
    config: &ScenarioConfig,
    pattern: FactoryPattern,
) -> Result<ScenarioOutcome, SimError> {
    let engine = Engine::new(config.to_sim_config()?);
    let profiles = build_profiles(config, pattern);
    let result = engine.run(&profiles)?;
    let metrics = Metrics::from_result(&result);
    info!(
        %pattern,
        purchase_kwh = metrics.total_grid_purchase_kwh,
        sell_kwh = metrics.total_grid_sell_kwh,
        "scenario finished"
    );
    Ok(ScenarioOutcome {
        pattern,
        result,
        metrics,
    })
}

/// Runs every [`FactoryPattern`] in parallel, returned in `FactoryPattern::ALL` order.
///
/// Each run is a pure function of `config` and its pattern, so the outcome is
/// identical to running the patterns one after another.
///
/// # Errors
///
/// Returns the first [`SimError`] encountered, in pattern order.
pub fn run_all(config: &ScenarioConfig) -> Result<Vec<ScenarioOutcome>, SimError> {
    FactoryPattern::ALL
        .as_slice()
        .par_iter()
        .map(|&pattern| run_pattern(config, pattern))
        .collect()
}

/// Compares pattern A against pattern B, if both are present.
pub fn compare(outcomes: &[ScenarioOutcome]) -> Option<Comparison> {
    let find = |p: FactoryPattern| outcomes.iter().find(|o| o.pattern == p);
    let a = find(FactoryPattern::Steady)?;
    let b = find(FactoryPattern::DaytimeShifted)?;
    Some(Comparison::between(&a.metrics, &b.metrics))
}
