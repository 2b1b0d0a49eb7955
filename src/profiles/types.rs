//! Common trait and helpers for hourly profile generators.

use rand::{Rng, rngs::StdRng};

/// Hours in one simulated day.
pub const HOURS_PER_DAY: usize = 24;

/// Trait for a closed-form hourly energy curve.
///
/// Generators may hold a seeded RNG, so sampling takes `&mut self` and the
/// sequence of calls matters: sample hours in increasing order for
/// reproducible output.
pub trait Profile {
    /// Returns the energy for `hour` (kWh over that hour, never negative).
    ///
    /// `hour` counts from the start of the run; generators repeat daily.
    fn kwh_at(&mut self, hour: usize) -> f64;

    /// Returns a human-readable name for the profile.
    fn name(&self) -> &'static str;

    /// Samples hours `0..hours` in order.
    fn series(&mut self, hours: usize) -> Vec<f64> {
        (0..hours).map(|h| self.kwh_at(h)).collect()
    }
}

/// Hour of day in `0..24` as a float.
pub fn hour_of_day(hour: usize) -> f64 {
    (hour % HOURS_PER_DAY) as f64
}

/// Gaussian bell `exp(-((h - center) / width)^2)`.
pub fn bell(h: f64, center: f64, width: f64) -> f64 {
    (-((h - center) / width).powi(2)).exp()
}

/// Gaussian noise with mean 0 via the Box-Muller transform.
///
/// # Arguments
///
/// * `rng` - Random number generator
/// * `std_dev` - Standard deviation of the noise
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    struct Ramp;

    impl Profile for Ramp {
        fn kwh_at(&mut self, hour: usize) -> f64 {
            hour as f64
        }

        fn name(&self) -> &'static str {
            "Ramp"
        }
    }

    #[test]
    fn series_samples_in_order() {
        assert_eq!(Ramp.series(4), vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn hour_of_day_wraps() {
        assert_eq!(hour_of_day(5), 5.0);
        assert_eq!(hour_of_day(29), 5.0);
    }

    #[test]
    fn bell_peaks_at_center() {
        assert_eq!(bell(12.0, 12.0, 3.0), 1.0);
        assert!(bell(9.0, 12.0, 3.0) < 1.0);
        assert!((bell(9.0, 12.0, 3.0) - bell(15.0, 12.0, 3.0)).abs() < 1e-12);
    }

    #[test]
    fn zero_std_noise_is_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(gaussian_noise(&mut rng, 0.0), 0.0);
    }

    #[test]
    fn noise_is_seed_deterministic() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(gaussian_noise(&mut a, 0.1), gaussian_noise(&mut b, 0.1));
        }
    }
}
