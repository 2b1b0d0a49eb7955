//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::profiles::HOURS_PER_DAY;
use crate::sim::error::SimError;
use crate::sim::types::SimConfig;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Horizon and random seed.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Fleet size and battery capacities.
    #[serde(default)]
    pub fleet: FleetConfig,
    /// Per-household load and PV parameters.
    #[serde(default)]
    pub household: HouseholdConfig,
    /// Factory load levels.
    #[serde(default)]
    pub factory: FactoryConfig,
    /// Public facility load levels.
    #[serde(default)]
    pub public_facility: PublicFacilityConfig,
    /// EV charging parameters.
    #[serde(default)]
    pub ev: EvConfig,
}

/// Simulation horizon and global parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of days to simulate (must be > 0).
    pub days: usize,
    /// Seed for the factory load noise.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { days: 1, seed: 42 }
    }
}

/// Fleet size and battery capacities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FleetConfig {
    /// Number of households (must be > 0).
    pub households: usize,
    /// Capacity of each household battery (kWh).
    pub household_battery_kwh: f64,
    /// Capacity of the shared community battery (kWh).
    pub shared_battery_kwh: f64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            households: 100,
            household_battery_kwh: 10.0,
            shared_battery_kwh: 500.0,
        }
    }
}

/// Per-household load and PV parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HouseholdConfig {
    /// Load at the household's busiest hour (kW).
    pub load_peak_kw: f64,
    /// Installed PV capacity per household (kW).
    pub pv_capacity_kw: f64,
    /// Fraction of PV capacity reached at noon (0.0–1.0).
    pub pv_peak_fraction: f64,
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        Self {
            load_peak_kw: 1.0,
            pv_capacity_kw: 15.0,
            pv_peak_fraction: 0.8,
        }
    }
}

/// Factory load levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactoryConfig {
    /// Base load (kW).
    pub base_kw: f64,
    /// Peak load (kW).
    pub peak_kw: f64,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            base_kw: 350.0,
            peak_kw: 550.0,
        }
    }
}

/// Public facility load levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublicFacilityConfig {
    /// Base load (kW).
    pub base_kw: f64,
    /// Load at 13:00 (kW).
    pub peak_kw: f64,
}

impl Default for PublicFacilityConfig {
    fn default() -> Self {
        Self {
            base_kw: 70.0,
            peak_kw: 130.0,
        }
    }
}

/// EV charging parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvConfig {
    /// Charging power per household while plugged in (kW).
    pub charging_kw: f64,
    /// Hours of day (0–23) during which cars charge.
    pub charging_hours: Vec<usize>,
}

impl Default for EvConfig {
    fn default() -> Self {
        Self {
            charging_kw: 3.0,
            charging_hours: vec![22, 23, 0, 1, 2, 3],
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"fleet.households"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "small_community"];

    /// Returns the baseline scenario: 100 households, 500 kWh shared battery.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns a small-community preset: 20 households next to a small workshop.
    pub fn small_community() -> Self {
        Self {
            fleet: FleetConfig {
                households: 20,
                shared_battery_kwh: 100.0,
                ..FleetConfig::default()
            },
            factory: FactoryConfig {
                base_kw: 80.0,
                peak_kw: 120.0,
            },
            public_facility: PublicFacilityConfig {
                base_kw: 20.0,
                peak_kw: 40.0,
            },
            ..Self::default()
        }
    }

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "small_community" => Ok(Self::small_community()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Total simulated hours.
    pub fn hours(&self) -> usize {
        self.simulation.days * HOURS_PER_DAY
    }

    /// Builds the engine configuration.
    ///
    /// # Errors
    ///
    /// Returns a `SimError::InvalidConfig` if the fleet section is invalid.
    pub fn to_sim_config(&self) -> Result<SimConfig, SimError> {
        SimConfig::new(
            self.fleet.households,
            self.fleet.household_battery_kwh,
            self.fleet.shared_battery_kwh,
        )
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.simulation.days == 0 {
            errors.push(ConfigError::new("simulation.days", "must be > 0"));
        }

        let fleet = &self.fleet;
        if fleet.households == 0 {
            errors.push(ConfigError::new("fleet.households", "must be > 0"));
        }
        positive(&mut errors, "fleet.household_battery_kwh", fleet.household_battery_kwh);
        positive(&mut errors, "fleet.shared_battery_kwh", fleet.shared_battery_kwh);

        let hh = &self.household;
        non_negative(&mut errors, "household.load_peak_kw", hh.load_peak_kw);
        non_negative(&mut errors, "household.pv_capacity_kw", hh.pv_capacity_kw);
        if !(0.0..=1.0).contains(&hh.pv_peak_fraction) {
            errors.push(ConfigError::new("household.pv_peak_fraction", "must be in [0.0, 1.0]"));
        }

        non_negative(&mut errors, "factory.base_kw", self.factory.base_kw);
        if !(self.factory.peak_kw >= self.factory.base_kw) {
            errors.push(ConfigError::new("factory.peak_kw", "must be >= factory.base_kw"));
        }

        let pf = &self.public_facility;
        non_negative(&mut errors, "public_facility.base_kw", pf.base_kw);
        if !(pf.peak_kw >= pf.base_kw) {
            errors.push(ConfigError::new(
                "public_facility.peak_kw",
                "must be >= public_facility.base_kw",
            ));
        }

        non_negative(&mut errors, "ev.charging_kw", self.ev.charging_kw);
        if let Some(h) = self.ev.charging_hours.iter().find(|&&h| h >= HOURS_PER_DAY) {
            errors.push(ConfigError::new(
                "ev.charging_hours",
                format!("hour {h} is not in 0..{HOURS_PER_DAY}"),
            ));
        }

        errors
    }
}

fn positive(errors: &mut Vec<ConfigError>, field: &str, value: f64) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(ConfigError::new(field, "must be > 0"));
    }
}

fn non_negative(errors: &mut Vec<ConfigError>, field: &str, value: f64) {
    if !(value.is_finite() && value >= 0.0) {
        errors.push(ConfigError::new(field, "must be >= 0"));
    }
}
