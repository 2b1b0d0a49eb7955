//! Closed-form hourly profile generators feeding the simulation.

/// Electric vehicle charging window.
pub mod ev;
/// Industrial load with two operating patterns.
pub mod factory;
/// Residential load curve.
pub mod household;
/// Public facility load curve.
pub mod public_facility;
/// Photovoltaic generation curve.
pub mod solar;
pub mod types;

pub use ev::EvCharging;
pub use factory::{FactoryLoad, FactoryPattern};
pub use household::HouseholdLoad;
pub use public_facility::PublicFacilityLoad;
pub use solar::SolarPv;
pub use types::{HOURS_PER_DAY, Profile};
