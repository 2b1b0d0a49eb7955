//! Per-hour allocation of surplus or deficit across batteries and the grid.
//!
//! Surplus charges household batteries first, then the shared battery, and
//! the rest is sold. Deficit drains household batteries first, then the
//! shared battery, and the rest is bought.
//!
//! Households are visited in index order. Each is offered
//! `remaining / N` where `N` is the whole fleet size, not the number of
//! batteries that can still take energy, and takes the lesser of the offer
//! and what it can absorb (or deliver). Later households therefore see a
//! smaller nominal offer than earlier ones, and whatever the households
//! leave flows on to the shared battery and then the grid.

use serde::Serialize;

use super::fleet::{BatteryFleetState, FleetCapacity};
use super::types::HourInput;

/// Largest allowed gap between the energy to allocate and the energy allocated (kWh).
pub const CONSERVATION_TOLERANCE_KWH: f64 = 1e-6;

/// Result of dispatching one hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourOutcome {
    /// Energy bought from the grid (kWh, >= 0). Zero whenever `grid_sell > 0`.
    pub grid_purchase: f64,
    /// Energy sold to the grid (kWh, >= 0). Zero whenever `grid_purchase > 0`.
    pub grid_sell: f64,
    /// Fleet state at the end of the hour.
    pub state: BatteryFleetState,
    /// Energy moved into (+) or out of (-) household batteries (kWh).
    pub household_delta: f64,
    /// Energy moved into (+) or out of (-) the shared battery (kWh).
    pub shared_delta: f64,
    /// Surplus or deficit magnitude that had to be allocated (kWh).
    pub requested: f64,
    /// Batteries plus grid share actually allocated (kWh).
    pub allocated: f64,
}

impl HourOutcome {
    /// `allocated - requested`.
    pub fn balance_error(&self) -> f64 {
        self.allocated - self.requested
    }

    /// Whether the allocation accounts for the whole surplus or deficit.
    pub fn is_balanced(&self) -> bool {
        self.balance_error().abs() <= CONSERVATION_TOLERANCE_KWH
    }
}

/// Dispatches one hour of generation and load against the fleet.
///
/// Pure: `state` is only read, and identical arguments always produce an
/// identical outcome. Expects non-negative inputs and a state within
/// `capacity`.
pub fn dispatch(input: &HourInput, state: &BatteryFleetState, capacity: &FleetCapacity) -> HourOutcome {
    let net = input.net_generation();
    if net >= 0.0 {
        charge_surplus(net, state.clone(), capacity)
    } else {
        cover_deficit(-net, state.clone())
    }
}

fn charge_surplus(
    surplus: f64,
    mut state: BatteryFleetState,
    capacity: &FleetCapacity,
) -> HourOutcome {
    let n = state.households() as f64;
    let mut remaining = surplus;

    let mut into_households = 0.0;
    for charge in &mut state.household_charge {
        if remaining <= 0.0 {
            break;
        }
        let headroom = capacity.household_kwh - *charge;
        let offer = remaining / n;
        let amount = if offer >= headroom {
            *charge = capacity.household_kwh;
            headroom
        } else {
            *charge += offer;
            offer
        };
        into_households += amount;
        remaining -= amount;
    }

    let mut into_shared = 0.0;
    if remaining > 0.0 {
        let headroom = capacity.shared_kwh - state.shared_charge;
        into_shared = if remaining >= headroom {
            state.shared_charge = capacity.shared_kwh;
            headroom
        } else {
            state.shared_charge += remaining;
            remaining
        };
        remaining -= into_shared;
    }

    let grid_sell = remaining.max(0.0);

    HourOutcome {
        grid_purchase: 0.0,
        grid_sell,
        state,
        household_delta: into_households,
        shared_delta: into_shared,
        requested: surplus,
        allocated: into_households + into_shared + grid_sell,
    }
}

fn cover_deficit(shortage: f64, mut state: BatteryFleetState) -> HourOutcome {
    let n = state.households() as f64;
    let mut remaining = shortage;

    let mut from_households = 0.0;
    for charge in &mut state.household_charge {
        if remaining <= 0.0 {
            break;
        }
        let offer = remaining / n;
        let amount = if offer >= *charge {
            let available = *charge;
            *charge = 0.0;
            available
        } else {
            *charge -= offer;
            offer
        };
        from_households += amount;
        remaining -= amount;
    }

    let mut from_shared = 0.0;
    if remaining > 0.0 {
        from_shared = if remaining >= state.shared_charge {
            let available = state.shared_charge;
            state.shared_charge = 0.0;
            available
        } else {
            state.shared_charge -= remaining;
            remaining
        };
        remaining -= from_shared;
    }

    let grid_purchase = remaining.max(0.0);

    HourOutcome {
        grid_purchase,
        grid_sell: 0.0,
        state,
        household_delta: -from_households,
        shared_delta: -from_shared,
        requested: shortage,
        allocated: from_households + from_shared + grid_purchase,
    }
}
