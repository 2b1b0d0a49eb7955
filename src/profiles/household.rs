use super::types::{HOURS_PER_DAY, Profile, bell, hour_of_day};

/// Residential load of one household with a morning and an evening peak.
///
/// The daily shape is `0.2 + 0.1 sin(2πh/24)` plus a morning bell at 08:00
/// and a larger evening bell at 20:00, scaled so its highest hour equals
/// `peak_kw`.
///
/// # Examples
///
/// ```
/// use microgrid_sim::profiles::{HouseholdLoad, Profile};
///
/// let mut load = HouseholdLoad::new(1.0);
/// let day = load.series(24);
/// let peak = day.iter().cloned().fold(0.0, f64::max);
/// assert!((peak - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct HouseholdLoad {
    /// Load at the highest hour of the day (kWh).
    pub peak_kw: f64,
    shape_max: f64,
}

impl HouseholdLoad {
    /// Creates a household load whose daily maximum is `peak_kw` (clamped to >= 0).
    pub fn new(peak_kw: f64) -> Self {
        let shape_max = (0..HOURS_PER_DAY)
            .map(|h| Self::shape(h as f64))
            .fold(f64::MIN, f64::max);
        Self {
            peak_kw: peak_kw.max(0.0),
            shape_max,
        }
    }

    fn shape(h: f64) -> f64 {
        let base = 0.2 + 0.1 * (2.0 * std::f64::consts::PI * h / HOURS_PER_DAY as f64).sin();
        base + 0.3 * bell(h, 8.0, 1.5) + 0.5 * bell(h, 20.0, 2.0)
    }
}

impl Profile for HouseholdLoad {
    fn kwh_at(&mut self, hour: usize) -> f64 {
        Self::shape(hour_of_day(hour)) / self.shape_max * self.peak_kw
    }

    fn name(&self) -> &'static str {
        "HouseholdLoad"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evening_peak_is_highest() {
        let mut load = HouseholdLoad::new(1.0);
        let day = load.series(24);
        let (argmax, _) = day
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |(i, m), (j, &v)| if v > m { (j, v) } else { (i, m) });
        assert_eq!(argmax, 20);
    }

    #[test]
    fn morning_exceeds_night() {
        let mut load = HouseholdLoad::new(1.0);
        assert!(load.kwh_at(8) > load.kwh_at(3));
    }

    #[test]
    fn repeats_daily() {
        let mut load = HouseholdLoad::new(2.0);
        assert_eq!(load.kwh_at(7), load.kwh_at(31));
    }

    #[test]
    fn always_positive() {
        let mut load = HouseholdLoad::new(1.0);
        assert!(load.series(48).iter().all(|&v| v > 0.0));
    }
}
