//! Dispatch and engine behaviour on hand-computed and random inputs.

mod common;

use proptest::prelude::*;

use microgrid_sim::sim::dispatch::dispatch;
use microgrid_sim::sim::engine::Engine;
use microgrid_sim::sim::fleet::{BatteryFleetState, FleetCapacity};
use microgrid_sim::sim::metrics::{Metrics, self_consumption_pct};
use microgrid_sim::sim::types::{HourInput, ProfileSet, SimConfig};

use common::{TOLERANCE, assert_run_invariants, flat_profiles, hour, small_capacity};

#[test]
fn single_surplus_hour() {
    let state = BatteryFleetState {
        household_charge: vec![5.0],
        shared_charge: 25.0,
    };
    let out = dispatch(&hour(20.0, 5.0), &state, &small_capacity());

    assert_eq!(out.state.household_charge, vec![10.0]);
    assert_eq!(out.state.shared_charge, 35.0);
    assert_eq!(out.grid_sell, 0.0);
    assert_eq!(out.grid_purchase, 0.0);
    assert!(out.is_balanced());
}

#[test]
fn deficit_exceeding_storage() {
    let state = BatteryFleetState {
        household_charge: vec![0.0],
        shared_charge: 0.0,
    };
    let out = dispatch(&hour(0.0, 8.0), &state, &small_capacity());

    assert_eq!(out.grid_purchase, 8.0);
    assert_eq!(out.grid_sell, 0.0);
    assert_eq!(out.state, state);
}

#[test]
fn deficit_drains_whole_fleet_before_buying() {
    let cap = FleetCapacity {
        household_kwh: 10.0,
        shared_kwh: 20.0,
    };
    let state = BatteryFleetState::initial(2, &cap);
    let out = dispatch(&hour(0.0, 100.0), &state, &cap);

    assert_eq!(out.state.household_charge, vec![0.0, 0.0]);
    assert_eq!(out.state.shared_charge, 0.0);
    assert_eq!(out.grid_purchase, 80.0);
}

#[test]
fn zero_net_changes_nothing() {
    let state = BatteryFleetState {
        household_charge: vec![3.0, 7.0],
        shared_charge: 12.0,
    };
    let input = HourInput {
        pv: 40.0,
        household_load: 10.0,
        factory_load: 20.0,
        public_load: 5.0,
        ev_load: 5.0,
    };
    let out = dispatch(&input, &state, &small_capacity());

    assert_eq!(out.state, state);
    assert_eq!(out.grid_purchase, 0.0);
    assert_eq!(out.grid_sell, 0.0);
}

#[test]
fn zero_profiles_keep_initial_state() {
    let config = SimConfig::new(3, 10.0, 50.0).unwrap();
    let result = Engine::new(config.clone())
        .run(&flat_profiles(24, 0.0, 0.0, 0.0))
        .unwrap();

    assert!(result.grid_purchases().iter().all(|&v| v == 0.0));
    assert!(result.grid_sells().iter().all(|&v| v == 0.0));
    assert!(result.shared_battery_levels().iter().all(|&v| v == 25.0));
    assert_eq!(
        result.final_state.household_charge,
        vec![common::initial_household_charge(&config.capacity); 3]
    );
}

#[test]
fn repeated_runs_are_bit_identical() {
    let engine = Engine::new(SimConfig::new(5, 10.0, 50.0).unwrap());
    let profiles = ProfileSet {
        household_load: (0..48).map(|h| 1.0 + (h % 7) as f64 * 0.3).collect(),
        factory_load: (0..48).map(|h| 20.0 + (h % 5) as f64).collect(),
        public_load: vec![4.0; 48],
        pv: (0..48).map(|h| if (6..18).contains(&(h % 24)) { 9.0 } else { 0.0 }).collect(),
        ev: vec![0.5; 48],
    };
    let first = engine.run(&profiles).unwrap();
    let second = engine.run(&profiles).unwrap();
    assert_eq!(first, second);
    assert_run_invariants(&first, engine.config());
}

#[test]
fn self_consumption_scenarios() {
    assert!((self_consumption_pct(100.0, 20.0) - 80.0).abs() < 1e-12);
    assert_eq!(self_consumption_pct(0.0, 0.0), 0.0);

    let engine = Engine::new(SimConfig::new(1, 10.0, 50.0).unwrap());
    let night_only = engine.run(&flat_profiles(4, 1.0, 0.0, 0.0)).unwrap();
    assert_eq!(Metrics::from_result(&night_only).self_consumption_pct, 0.0);
}

fn fleet_strategy() -> impl Strategy<Value = (FleetCapacity, BatteryFleetState)> {
    (1usize..=12, 0.5f64..50.0, 1.0f64..1000.0).prop_flat_map(|(n, hh_cap, shared_cap)| {
        (
            prop::collection::vec(0.0f64..=1.0, n),
            0.0f64..=1.0,
        )
            .prop_map(move |(fractions, shared_frac)| {
                let capacity = FleetCapacity {
                    household_kwh: hh_cap,
                    shared_kwh: shared_cap,
                };
                let state = BatteryFleetState {
                    household_charge: fractions.iter().map(|f| f * hh_cap).collect(),
                    shared_charge: shared_frac * shared_cap,
                };
                (capacity, state)
            })
    })
}

fn input_strategy() -> impl Strategy<Value = HourInput> {
    (
        0.0f64..2000.0,
        0.0f64..500.0,
        0.0f64..800.0,
        0.0f64..200.0,
        0.0f64..300.0,
    )
        .prop_map(|(pv, household_load, factory_load, public_load, ev_load)| HourInput {
            pv,
            household_load,
            factory_load,
            public_load,
            ev_load,
        })
}

proptest! {
    #[test]
    fn dispatch_conserves_energy((capacity, state) in fleet_strategy(), input in input_strategy()) {
        let out = dispatch(&input, &state, &capacity);
        let d_households = out.state.household_total() - state.household_total();
        let d_shared = out.state.shared_charge - state.shared_charge;
        let accounted = d_households + d_shared + out.grid_sell - out.grid_purchase;

        prop_assert!(out.is_balanced(), "balance error {}", out.balance_error());
        prop_assert!((input.net_generation() - accounted).abs() < TOLERANCE);
        prop_assert!((d_households - out.household_delta).abs() < TOLERANCE);
        prop_assert!((d_shared - out.shared_delta).abs() < TOLERANCE);
    }

    #[test]
    fn dispatch_keeps_batteries_in_bounds((capacity, state) in fleet_strategy(), input in input_strategy()) {
        let out = dispatch(&input, &state, &capacity);
        prop_assert!(out.state.check_bounds(&capacity, 0).is_ok());
        prop_assert_eq!(out.state.households(), state.households());
    }

    #[test]
    fn dispatch_never_buys_and_sells((capacity, state) in fleet_strategy(), input in input_strategy()) {
        let out = dispatch(&input, &state, &capacity);
        prop_assert!(out.grid_purchase >= 0.0 && out.grid_sell >= 0.0);
        prop_assert!(out.grid_purchase == 0.0 || out.grid_sell == 0.0);
    }

    #[test]
    fn dispatch_is_deterministic((capacity, state) in fleet_strategy(), input in input_strategy()) {
        prop_assert_eq!(dispatch(&input, &state, &capacity), dispatch(&input, &state, &capacity));
    }
}
