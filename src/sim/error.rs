//! Error types raised by the simulation core.

use thiserror::Error;

/// Identifies one battery within the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryId {
    /// Private battery of the household at this index.
    Household(usize),
    /// The shared community battery.
    Shared,
}

impl std::fmt::Display for BatteryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Household(i) => write!(f, "household battery #{i}"),
            Self::Shared => write!(f, "shared battery"),
        }
    }
}

/// Failures that stop a simulation run.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    /// Malformed engine configuration, detected before hour 0.
    #[error("invalid configuration: {field} {message}")]
    InvalidConfig {
        /// Offending configuration field.
        field: &'static str,
        /// Constraint that was violated.
        message: String,
    },

    /// Malformed input profile, detected before hour 0.
    #[error("invalid profile `{profile}`: {message}")]
    InvalidProfile {
        /// Profile name (e.g. `"pv"`).
        profile: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// A charge level left `[0, capacity]` after a dispatch update.
    #[error(
        "{battery} out of bounds at hour {hour}: {charge_kwh} kWh (capacity {capacity_kwh} kWh)"
    )]
    BoundViolation {
        /// Hour whose dispatch produced the violation.
        hour: usize,
        /// Battery that left its bounds.
        battery: BatteryId,
        /// Offending charge level.
        charge_kwh: f64,
        /// Capacity of that battery.
        capacity_kwh: f64,
    },
}
