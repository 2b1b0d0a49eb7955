use super::types::{Profile, bell, hour_of_day};

/// Public facility load rising from `base_kw` to `peak_kw` around 13:00.
#[derive(Debug, Clone)]
pub struct PublicFacilityLoad {
    /// Night-time load (kWh per hour).
    pub base_kw: f64,
    /// Load at 13:00 (kWh per hour).
    pub peak_kw: f64,
}

impl PublicFacilityLoad {
    /// Creates a public facility load.
    pub fn new(base_kw: f64, peak_kw: f64) -> Self {
        Self {
            base_kw: base_kw.max(0.0),
            peak_kw: peak_kw.max(0.0),
        }
    }
}

impl Profile for PublicFacilityLoad {
    fn kwh_at(&mut self, hour: usize) -> f64 {
        let kw = self.base_kw + (self.peak_kw - self.base_kw) * bell(hour_of_day(hour), 13.0, 4.0);
        kw.max(0.0)
    }

    fn name(&self) -> &'static str {
        "PublicFacilityLoad"
    }
}
