//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use microgrid_sim::sim::engine::SimulationResult;
use microgrid_sim::sim::fleet::{BatteryFleetState, FleetCapacity, INITIAL_SOC_FRACTION};
use microgrid_sim::sim::types::{HourInput, ProfileSet, SimConfig};

/// Conservation tolerance used by the assertions (kWh).
pub const TOLERANCE: f64 = 1e-6;

/// Capacities used by the hand-computed scenarios (10 kWh households, 50 kWh shared).
pub fn small_capacity() -> FleetCapacity {
    FleetCapacity {
        household_kwh: 10.0,
        shared_kwh: 50.0,
    }
}

/// Hour input with all load on the household line.
pub fn hour(pv: f64, load: f64) -> HourInput {
    HourInput {
        pv,
        household_load: load,
        ..HourInput::default()
    }
}

/// Profile set with the same value every hour.
pub fn flat_profiles(hours: usize, household: f64, factory: f64, pv: f64) -> ProfileSet {
    ProfileSet {
        household_load: vec![household; hours],
        factory_load: vec![factory; hours],
        public_load: vec![0.0; hours],
        pv: vec![pv; hours],
        ev: vec![0.0; hours],
    }
}

/// Asserts that every hour of `result` conserves energy, keeps batteries in
/// bounds and never buys and sells at once.
pub fn assert_run_invariants(result: &SimulationResult, config: &SimConfig) {
    let cap = config.capacity;
    let initial = BatteryFleetState::initial(config.households, &cap);
    let mut prev_shared = initial.shared_charge;
    let mut prev_households = initial.household_total();

    for r in &result.records {
        let d_shared = r.shared_battery_kwh - prev_shared;
        let d_households = r.household_battery_kwh - prev_households;
        let accounted = d_shared + d_households + r.grid_sell_kwh - r.grid_purchase_kwh;
        assert!(
            (r.net_generation_kwh - accounted).abs() < TOLERANCE,
            "hour {} does not conserve energy: net={} accounted={}",
            r.hour,
            r.net_generation_kwh,
            accounted
        );
        assert!(r.grid_purchase_kwh >= 0.0 && r.grid_sell_kwh >= 0.0);
        assert!(
            r.grid_purchase_kwh == 0.0 || r.grid_sell_kwh == 0.0,
            "hour {} both buys and sells",
            r.hour
        );
        assert!((0.0..=cap.shared_kwh).contains(&r.shared_battery_kwh));
        assert!(
            (0.0..=cap.household_kwh * config.households as f64)
                .contains(&r.household_battery_kwh)
        );
        prev_shared = r.shared_battery_kwh;
        prev_households = r.household_battery_kwh;
    }

    for &c in &result.final_state.household_charge {
        assert!((0.0..=cap.household_kwh).contains(&c));
    }
    assert_eq!(result.conservation_warnings, 0);
}

/// Initial charge of each household battery for `capacity`.
pub fn initial_household_charge(capacity: &FleetCapacity) -> f64 {
    capacity.household_kwh * INITIAL_SOC_FRACTION
}
