/// Hourly surplus and deficit allocation.
pub mod dispatch;
pub mod engine;
pub mod error;
/// Battery charge levels and capacities.
pub mod fleet;
pub mod metrics;
/// Load and generation aggregation helpers.
pub mod power_balance;
pub mod types;
