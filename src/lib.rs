//! Hour-by-hour microgrid energy balance simulator.
//!
//! Households with PV and batteries, a shared community battery, a factory,
//! a public facility and EV charging are balanced every hour; whatever the
//! batteries cannot absorb or supply is exchanged with the grid.

/// Read-only REST API over completed runs.
#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod io;
pub mod profiles;
pub mod scenario;
/// Dispatch, orchestration and metrics.
pub mod sim;
pub mod telemetry;
