use super::types::{HOURS_PER_DAY, Profile};

/// Night-time EV charging of one household.
///
/// Draws a constant `charging_kw` during each configured hour of day and
/// nothing otherwise.
#[derive(Debug, Clone)]
pub struct EvCharging {
    /// Charging power while plugged in (kW).
    pub charging_kw: f64,
    active: [bool; HOURS_PER_DAY],
}

impl EvCharging {
    /// Creates an EV charging profile. Hours `>= 24` are ignored.
    pub fn new(charging_kw: f64, charging_hours: &[usize]) -> Self {
        let mut active = [false; HOURS_PER_DAY];
        for &h in charging_hours {
            if let Some(slot) = active.get_mut(h) {
                *slot = true;
            }
        }
        Self {
            charging_kw: charging_kw.max(0.0),
            active,
        }
    }

    /// Whether the car charges during this hour of day.
    pub fn is_charging(&self, hour: usize) -> bool {
        self.active[hour % HOURS_PER_DAY]
    }
}

impl Profile for EvCharging {
    fn kwh_at(&mut self, hour: usize) -> f64 {
        if self.is_charging(hour) {
            self.charging_kw
        } else {
            0.0
        }
    }

    fn name(&self) -> &'static str {
        "EvCharging"
    }
}
