//! Battery charge levels for the household fleet and the shared battery.

use serde::Serialize;

use super::error::{BatteryId, SimError};

/// Fraction of capacity every battery holds when a run starts.
pub const INITIAL_SOC_FRACTION: f64 = 0.5;

/// Immutable battery capacities for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FleetCapacity {
    /// Capacity of each household battery (kWh).
    pub household_kwh: f64,
    /// Capacity of the shared community battery (kWh).
    pub shared_kwh: f64,
}

/// Stored energy of every battery in the microgrid.
///
/// Capacities are not part of the state; pass a [`FleetCapacity`] where
/// bounds matter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryFleetState {
    /// Charge of each household battery (kWh), in fixed household order.
    pub household_charge: Vec<f64>,
    /// Charge of the shared battery (kWh).
    pub shared_charge: f64,
}

impl BatteryFleetState {
    /// Creates the start-of-run state: every battery at
    /// [`INITIAL_SOC_FRACTION`] of its capacity.
    pub fn initial(households: usize, capacity: &FleetCapacity) -> Self {
        Self {
            household_charge: vec![capacity.household_kwh * INITIAL_SOC_FRACTION; households],
            shared_charge: capacity.shared_kwh * INITIAL_SOC_FRACTION,
        }
    }

    /// Number of household batteries.
    pub fn households(&self) -> usize {
        self.household_charge.len()
    }

    /// Sum of all household battery charges (kWh).
    pub fn household_total(&self) -> f64 {
        self.household_charge.iter().sum()
    }

    /// Household total plus shared charge (kWh).
    pub fn total_stored(&self) -> f64 {
        self.household_total() + self.shared_charge
    }

    /// Checks that every charge lies within `[0, capacity]`.
    ///
    /// # Errors
    ///
    /// Returns the first [`SimError::BoundViolation`] found, tagged with `hour`.
    pub fn check_bounds(&self, capacity: &FleetCapacity, hour: usize) -> Result<(), SimError> {
        for (i, &charge) in self.household_charge.iter().enumerate() {
            if !(0.0..=capacity.household_kwh).contains(&charge) {
                return Err(SimError::BoundViolation {
                    hour,
                    battery: BatteryId::Household(i),
                    charge_kwh: charge,
                    capacity_kwh: capacity.household_kwh,
                });
            }
        }
        if !(0.0..=capacity.shared_kwh).contains(&self.shared_charge) {
            return Err(SimError::BoundViolation {
                hour,
                battery: BatteryId::Shared,
                charge_kwh: self.shared_charge,
                capacity_kwh: capacity.shared_kwh,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cap() -> FleetCapacity {
        FleetCapacity {
            household_kwh: 10.0,
            shared_kwh: 500.0,
        }
    }

    #[test]
    fn initial_state_is_half_full() {
        let state = BatteryFleetState::initial(4, &cap());
        assert_eq!(state.household_charge, vec![5.0; 4]);
        assert_eq!(state.shared_charge, 250.0);
        assert_eq!(state.household_total(), 20.0);
        assert_eq!(state.total_stored(), 270.0);
    }

    #[test]
    fn bounds_accept_empty_and_full() {
        let state = BatteryFleetState {
            household_charge: vec![0.0, 10.0],
            shared_charge: 500.0,
        };
        assert!(state.check_bounds(&cap(), 0).is_ok());
    }

    #[test]
    fn bounds_reject_overfull_household() {
        let state = BatteryFleetState {
            household_charge: vec![5.0, 10.01],
            shared_charge: 0.0,
        };
        let err = state.check_bounds(&cap(), 3).unwrap_err();
        assert!(matches!(
            err,
            SimError::BoundViolation {
                hour: 3,
                battery: BatteryId::Household(1),
                ..
            }
        ));
    }

    #[test]
    fn bounds_reject_negative_shared() {
        let state = BatteryFleetState {
            household_charge: vec![5.0],
            shared_charge: -0.5,
        };
        let err = state.check_bounds(&cap(), 0).unwrap_err();
        assert!(matches!(
            err,
            SimError::BoundViolation {
                battery: BatteryId::Shared,
                ..
            }
        ));
    }

    #[test]
    fn nan_charge_is_out_of_bounds() {
        let state = BatteryFleetState {
            household_charge: vec![f64::NAN],
            shared_charge: 0.0,
        };
        assert!(state.check_bounds(&cap(), 0).is_err());
    }
}
