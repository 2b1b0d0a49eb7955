//! Core simulation types: configuration, input profiles, and hourly records.

use std::fmt;

use serde::Serialize;

use super::error::SimError;
use super::fleet::FleetCapacity;
use super::power_balance;

/// Immutable parameters of one simulation run.
///
/// # Examples
///
/// ```
/// use microgrid_sim::sim::types::SimConfig;
///
/// let cfg = SimConfig::new(100, 10.0, 500.0).unwrap();
/// assert_eq!(cfg.households, 100);
/// assert_eq!(cfg.capacity.shared_kwh, 500.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimConfig {
    /// Number of households in the fleet (each with PV and a battery).
    pub households: usize,
    /// Battery capacities.
    pub capacity: FleetCapacity,
}

impl SimConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] if the household count is zero or a
    /// capacity is not a positive finite number.
    pub fn new(
        households: usize,
        household_capacity_kwh: f64,
        shared_capacity_kwh: f64,
    ) -> Result<Self, SimError> {
        let cfg = Self {
            households,
            capacity: FleetCapacity {
                household_kwh: household_capacity_kwh,
                shared_kwh: shared_capacity_kwh,
            },
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks the configuration constraints.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.households == 0 {
            return Err(SimError::InvalidConfig {
                field: "households",
                message: "must be > 0".into(),
            });
        }
        for (field, value) in [
            ("household_capacity_kwh", self.capacity.household_kwh),
            ("shared_capacity_kwh", self.capacity.shared_kwh),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidConfig {
                    field,
                    message: format!("must be a finite number > 0, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// The five hourly input series of one scenario.
///
/// `household_load`, `pv` and `ev` are per-household values that the engine
/// scales by the fleet size; `factory_load` and `public_load` are already
/// system totals.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileSet {
    /// Load of one household (kWh per hour).
    pub household_load: Vec<f64>,
    /// Factory load (kWh per hour).
    pub factory_load: Vec<f64>,
    /// Public facility load (kWh per hour).
    pub public_load: Vec<f64>,
    /// PV generation of one household (kWh per hour).
    pub pv: Vec<f64>,
    /// EV charging load of one household (kWh per hour).
    pub ev: Vec<f64>,
}

impl ProfileSet {
    /// Number of hours covered, taken from the household series.
    pub fn hours(&self) -> usize {
        self.household_load.len()
    }

    fn named(&self) -> [(&'static str, &[f64]); 5] {
        [
            ("household_load", &self.household_load),
            ("factory_load", &self.factory_load),
            ("public_load", &self.public_load),
            ("pv", &self.pv),
            ("ev", &self.ev),
        ]
    }

    /// Checks that all series share one length and hold finite, non-negative values.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidProfile`] for the first offending series.
    pub fn validate(&self) -> Result<(), SimError> {
        let hours = self.hours();
        for (profile, series) in self.named() {
            if series.len() != hours {
                return Err(SimError::InvalidProfile {
                    profile,
                    message: format!(
                        "length {} does not match household_load length {hours}",
                        series.len()
                    ),
                });
            }
            if let Some((hour, v)) = series
                .iter()
                .enumerate()
                .find(|(_, v)| !(v.is_finite() && **v >= 0.0))
            {
                return Err(SimError::InvalidProfile {
                    profile,
                    message: format!("value {v} at hour {hour} is not a finite non-negative number"),
                });
            }
        }
        Ok(())
    }
}

/// System-wide generation and loads for one hour (kWh).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct HourInput {
    /// Aggregate PV generation.
    pub pv: f64,
    /// Aggregate household load.
    pub household_load: f64,
    /// Factory load.
    pub factory_load: f64,
    /// Public facility load.
    pub public_load: f64,
    /// Aggregate EV charging load.
    pub ev_load: f64,
}

impl HourInput {
    /// Sum of the four load components.
    pub fn total_load(&self) -> f64 {
        power_balance::total_load_kwh(
            self.household_load,
            self.factory_load,
            self.public_load,
            self.ev_load,
        )
    }

    /// PV minus total load; positive is surplus.
    pub fn net_generation(&self) -> f64 {
        power_balance::net_generation_kwh(self.pv, self.total_load())
    }
}

/// Complete record of one simulated hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourRecord {
    /// Hour index from the start of the run.
    pub hour: usize,
    /// Aggregate PV generation (kWh).
    pub pv_kwh: f64,
    /// Aggregate household load (kWh).
    pub household_load_kwh: f64,
    /// Factory load (kWh).
    pub factory_load_kwh: f64,
    /// Public facility load (kWh).
    pub public_load_kwh: f64,
    /// Aggregate EV load (kWh).
    pub ev_load_kwh: f64,
    /// Sum of all loads (kWh).
    pub total_load_kwh: f64,
    /// `pv_kwh - total_load_kwh`.
    pub net_generation_kwh: f64,
    /// Energy bought from the external grid (kWh, >= 0).
    pub grid_purchase_kwh: f64,
    /// Energy sold to the external grid (kWh, >= 0).
    pub grid_sell_kwh: f64,
    /// Shared battery charge at the end of the hour (kWh).
    pub shared_battery_kwh: f64,
    /// Sum of household battery charges at the end of the hour (kWh).
    pub household_battery_kwh: f64,
}

impl HourRecord {
    /// Shared plus household stored energy at the end of the hour (kWh).
    pub fn total_stored_kwh(&self) -> f64 {
        self.shared_battery_kwh + self.household_battery_kwh
    }
}

impl fmt::Display for HourRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "h={:>3} | pv={:>8.2}  load={:>8.2}  net={:>8.2} kWh | \
             buy={:>7.2}  sell={:>7.2} kWh | shared={:>7.2}  homes={:>7.2} kWh",
            self.hour,
            self.pv_kwh,
            self.total_load_kwh,
            self.net_generation_kwh,
            self.grid_purchase_kwh,
            self.grid_sell_kwh,
            self.shared_battery_kwh,
            self.household_battery_kwh,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profiles(hours: usize) -> ProfileSet {
        ProfileSet {
            household_load: vec![1.0; hours],
            factory_load: vec![300.0; hours],
            public_load: vec![80.0; hours],
            pv: vec![2.0; hours],
            ev: vec![0.0; hours],
        }
    }

    #[test]
    fn sim_config_basic() {
        let cfg = SimConfig::new(3, 10.0, 50.0).unwrap();
        assert_eq!(cfg.households, 3);
        assert_eq!(cfg.capacity.household_kwh, 10.0);
        assert_eq!(cfg.capacity.shared_kwh, 50.0);
    }

    #[test]
    fn sim_config_rejects_zero_households() {
        let err = SimConfig::new(0, 10.0, 50.0).unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidConfig {
                field: "households",
                ..
            }
        ));
    }

    #[test]
    fn sim_config_rejects_non_positive_capacity() {
        assert!(SimConfig::new(1, 0.0, 50.0).is_err());
        assert!(SimConfig::new(1, 10.0, -1.0).is_err());
        assert!(SimConfig::new(1, f64::NAN, 50.0).is_err());
    }

    #[test]
    fn profile_set_accepts_equal_lengths() {
        let p = profiles(24);
        assert_eq!(p.hours(), 24);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn profile_set_rejects_length_mismatch() {
        let mut p = profiles(24);
        p.ev.pop();
        let err = p.validate().unwrap_err();
        assert!(matches!(err, SimError::InvalidProfile { profile: "ev", .. }));
    }

    #[test]
    fn profile_set_rejects_negative_value() {
        let mut p = profiles(4);
        p.pv[2] = -0.1;
        let err = p.validate().unwrap_err();
        assert!(matches!(err, SimError::InvalidProfile { profile: "pv", .. }));
    }

    #[test]
    fn hour_input_net_generation() {
        let input = HourInput {
            pv: 20.0,
            household_load: 2.0,
            factory_load: 1.0,
            public_load: 1.5,
            ev_load: 0.5,
        };
        assert_eq!(input.total_load(), 5.0);
        assert_eq!(input.net_generation(), 15.0);
    }

    #[test]
    fn hour_record_display_does_not_panic() {
        let r = HourRecord {
            hour: 12,
            pv_kwh: 1000.0,
            household_load_kwh: 60.0,
            factory_load_kwh: 500.0,
            public_load_kwh: 130.0,
            ev_load_kwh: 0.0,
            total_load_kwh: 690.0,
            net_generation_kwh: 310.0,
            grid_purchase_kwh: 0.0,
            grid_sell_kwh: 10.0,
            shared_battery_kwh: 500.0,
            household_battery_kwh: 1000.0,
        };
        assert_eq!(r.total_stored_kwh(), 1500.0);
        assert!(!format!("{r}").is_empty());
    }
}
