//! Simulation engine that threads battery state through hourly dispatch.

use serde::Serialize;
use tracing::{debug, debug_span, info, warn};

use super::dispatch::dispatch;
use super::error::SimError;
use super::fleet::BatteryFleetState;
use super::power_balance::BalanceSummary;
use super::types::{HourInput, HourRecord, ProfileSet, SimConfig};

/// Output of one run: one record per simulated hour, in hour order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Hourly records, index == hour.
    pub records: Vec<HourRecord>,
    /// Fleet state after the last hour.
    pub final_state: BatteryFleetState,
    /// Hours whose allocation failed the conservation check.
    pub conservation_warnings: usize,
}

impl SimulationResult {
    fn column(&self, f: impl Fn(&HourRecord) -> f64) -> Vec<f64> {
        self.records.iter().map(f).collect()
    }

    /// Number of simulated hours.
    pub fn hours(&self) -> usize {
        self.records.len()
    }

    /// Hourly grid purchases (kWh).
    pub fn grid_purchases(&self) -> Vec<f64> {
        self.column(|r| r.grid_purchase_kwh)
    }

    /// Hourly grid sales (kWh).
    pub fn grid_sells(&self) -> Vec<f64> {
        self.column(|r| r.grid_sell_kwh)
    }

    /// Shared battery charge at the end of each hour (kWh).
    pub fn shared_battery_levels(&self) -> Vec<f64> {
        self.column(|r| r.shared_battery_kwh)
    }

    /// Summed household battery charge at the end of each hour (kWh).
    pub fn household_battery_levels(&self) -> Vec<f64> {
        self.column(|r| r.household_battery_kwh)
    }

    /// Hourly aggregate PV generation (kWh).
    pub fn pv_generations(&self) -> Vec<f64> {
        self.column(|r| r.pv_kwh)
    }

    /// Hourly total load (kWh).
    pub fn total_loads(&self) -> Vec<f64> {
        self.column(|r| r.total_load_kwh)
    }

    /// Hourly net generation (kWh).
    pub fn net_generations(&self) -> Vec<f64> {
        self.column(|r| r.net_generation_kwh)
    }
}

/// Drives hourly dispatch over a profile set.
///
/// Holds only immutable configuration, so one engine may run any number of
/// profile sets, from any number of threads.
#[derive(Debug, Clone)]
pub struct Engine {
    config: SimConfig,
}

impl Engine {
    /// Creates an engine for the given fleet configuration.
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    /// Returns the simulation configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Builds the system-wide input for `hour` of an already validated set.
    ///
    /// Household load, PV and EV are scaled by the household count; factory
    /// and public loads are taken as-is.
    fn hour_input(&self, profiles: &ProfileSet, hour: usize) -> HourInput {
        let n = self.config.households as f64;
        HourInput {
            pv: profiles.pv[hour] * n,
            household_load: profiles.household_load[hour] * n,
            factory_load: profiles.factory_load[hour],
            public_load: profiles.public_load[hour],
            ev_load: profiles.ev[hour] * n,
        }
    }

    /// Runs every hour of `profiles` in order, starting from half-full batteries.
    ///
    /// A conservation mismatch is logged and counted but does not stop the run.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] or [`SimError::InvalidProfile`]
    /// before the first hour if the inputs are malformed or their fleet totals
    /// overflow, and
    /// [`SimError::BoundViolation`] if a dispatch leaves a battery outside
    /// its bounds.
    pub fn run(&self, profiles: &ProfileSet) -> Result<SimulationResult, SimError> {
        self.config.validate()?;
        profiles.validate()?;

        let capacity = self.config.capacity;
        let inputs: Vec<HourInput> = (0..profiles.hours())
            .map(|hour| self.hour_input(profiles, hour))
            .collect();
        for (hour, input) in inputs.iter().enumerate() {
            check_aggregates(hour, input)?;
        }

        info!(
            hours = inputs.len(),
            households = self.config.households,
            "starting simulation run"
        );
        debug!(balance = %BalanceSummary::from_inputs(&inputs), "input balance");

        let mut state = BatteryFleetState::initial(self.config.households, &capacity);
        let mut records = Vec::with_capacity(inputs.len());
        let mut conservation_warnings = 0;

        for (hour, input) in inputs.iter().enumerate() {
            let _span = debug_span!("hour", hour).entered();
            let outcome = dispatch(input, &state, &capacity);

            if !outcome.is_balanced() {
                conservation_warnings += 1;
                warn!(
                    hour,
                    requested_kwh = outcome.requested,
                    allocated_kwh = outcome.allocated,
                    "energy allocation does not balance"
                );
            }
            outcome.state.check_bounds(&capacity, hour)?;

            let household_battery_kwh = outcome.state.household_total();
            debug!(
                hour,
                net_kwh = input.net_generation(),
                purchase_kwh = outcome.grid_purchase,
                sell_kwh = outcome.grid_sell,
                shared_kwh = outcome.state.shared_charge,
                household_kwh = household_battery_kwh,
                "dispatched hour"
            );

            records.push(HourRecord {
                hour,
                pv_kwh: input.pv,
                household_load_kwh: input.household_load,
                factory_load_kwh: input.factory_load,
                public_load_kwh: input.public_load,
                ev_load_kwh: input.ev_load,
                total_load_kwh: input.total_load(),
                net_generation_kwh: input.net_generation(),
                grid_purchase_kwh: outcome.grid_purchase,
                grid_sell_kwh: outcome.grid_sell,
                shared_battery_kwh: outcome.state.shared_charge,
                household_battery_kwh,
            });
            state = outcome.state;
        }

        info!(
            hours = records.len(),
            stored_kwh = state.total_stored(),
            conservation_warnings,
            "simulation run finished"
        );

        Ok(SimulationResult {
            records,
            final_state: state,
            conservation_warnings,
        })
    }
}

/// Rejects an hour whose fleet-scaled totals are no longer finite.
fn check_aggregates(hour: usize, input: &HourInput) -> Result<(), SimError> {
    let totals = [
        ("pv", input.pv),
        ("household_load", input.household_load),
        ("ev", input.ev_load),
        ("total_load", input.total_load()),
        ("net_generation", input.net_generation()),
    ];
    match totals.into_iter().find(|(_, v)| !v.is_finite()) {
        Some((profile, v)) => Err(SimError::InvalidProfile {
            profile,
            message: format!("fleet total {v} at hour {hour} is not finite"),
        }),
        None => Ok(()),
    }
}
