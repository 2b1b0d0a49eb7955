use super::types::{Profile, bell, hour_of_day};

/// First hour of day with PV output (inclusive).
pub const SUNRISE_HOUR: f64 = 6.0;
/// Last hour of day with PV output (inclusive).
pub const SUNSET_HOUR: f64 = 18.0;

/// PV generation of one household.
///
/// Between sunrise and sunset the output follows a bell centred on noon,
/// `bell(h, 12, 3) * capacity_kw * peak_fraction`; outside it is zero.
/// Generation is reported as a positive energy.
#[derive(Debug, Clone)]
pub struct SolarPv {
    /// Installed capacity (kW).
    pub capacity_kw: f64,
    /// Fraction of capacity reached at noon (0.0-1.0).
    pub peak_fraction: f64,
}

impl SolarPv {
    /// Creates a PV generator. Negative arguments are clamped to zero.
    pub fn new(capacity_kw: f64, peak_fraction: f64) -> Self {
        Self {
            capacity_kw: capacity_kw.max(0.0),
            peak_fraction: peak_fraction.max(0.0),
        }
    }

    /// Bell-shaped daylight factor in `[0, 1]` for an hour of day.
    fn daylight_frac(h: f64) -> f64 {
        if (SUNRISE_HOUR..=SUNSET_HOUR).contains(&h) {
            bell(h, 12.0, 3.0)
        } else {
            0.0
        }
    }
}

impl Profile for SolarPv {
    fn kwh_at(&mut self, hour: usize) -> f64 {
        Self::daylight_frac(hour_of_day(hour)) * self.capacity_kw * self.peak_fraction
    }

    fn name(&self) -> &'static str {
        "SolarPV"
    }
}
