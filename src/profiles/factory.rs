use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::types::{HOURS_PER_DAY, Profile, bell, gaussian_noise, hour_of_day};

/// Operating pattern of the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactoryPattern {
    /// Pattern A: runs around the clock with a mild daily swing.
    Steady,
    /// Pattern B: load concentrated around 13:00 to follow PV output.
    DaytimeShifted,
}

impl FactoryPattern {
    /// Both patterns, A first.
    pub const ALL: [FactoryPattern; 2] = [FactoryPattern::Steady, FactoryPattern::DaytimeShifted];

    /// Single-letter scenario label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Steady => "A",
            Self::DaytimeShifted => "B",
        }
    }

    /// Stable identifier used in file names and URLs.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Steady => "pattern_a",
            Self::DaytimeShifted => "pattern_b",
        }
    }

    /// Parses a slug or label (`"pattern_a"`, `"a"`, `"A"`, ...).
    pub fn from_slug(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pattern_a" | "a" | "steady" => Some(Self::Steady),
            "pattern_b" | "b" | "daytime_shifted" => Some(Self::DaytimeShifted),
            _ => None,
        }
    }
}

impl std::fmt::Display for FactoryPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Steady => write!(f, "pattern A (steady)"),
            Self::DaytimeShifted => write!(f, "pattern B (daytime shifted)"),
        }
    }
}

/// Industrial load between a base and a peak level, with seeded noise.
///
/// - `Steady`: `base + span * (0.5 + 0.3 sin(2πh/24) + 0.2 ε)`, ε ~ N(0, 0.1),
///   clipped to `[0.8 base, 1.1 peak]`.
/// - `DaytimeShifted`: `base + span * (0.3 + 0.7 bell(h, 13, 3) + 0.1 ε)`,
///   ε ~ N(0, 0.05), clipped to `[0.5 base, 1.2 peak]`.
///
/// `span = peak - base`. The value is already a system total.
#[derive(Debug, Clone)]
pub struct FactoryLoad {
    /// Operating pattern.
    pub pattern: FactoryPattern,
    /// Base load (kWh per hour).
    pub base_kw: f64,
    /// Peak load (kWh per hour).
    pub peak_kw: f64,
    rng: StdRng,
}

impl FactoryLoad {
    /// Creates a factory load generator.
    ///
    /// # Arguments
    ///
    /// * `pattern` - Operating pattern
    /// * `base_kw` - Base load
    /// * `peak_kw` - Peak load (>= `base_kw`)
    /// * `seed` - Seed for the noise term
    pub fn new(pattern: FactoryPattern, base_kw: f64, peak_kw: f64, seed: u64) -> Self {
        Self {
            pattern,
            base_kw: base_kw.max(0.0),
            peak_kw: peak_kw.max(0.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Profile for FactoryLoad {
    fn kwh_at(&mut self, hour: usize) -> f64 {
        let h = hour_of_day(hour);
        let span = self.peak_kw - self.base_kw;
        let (level, lo, hi) = match self.pattern {
            FactoryPattern::Steady => {
                let daily = (2.0 * std::f64::consts::PI * h / HOURS_PER_DAY as f64).sin();
                let noise = gaussian_noise(&mut self.rng, 0.1);
                (
                    0.5 + 0.3 * daily + 0.2 * noise,
                    self.base_kw * 0.8,
                    self.peak_kw * 1.1,
                )
            }
            FactoryPattern::DaytimeShifted => {
                let noise = gaussian_noise(&mut self.rng, 0.05);
                (
                    0.3 + 0.7 * bell(h, 13.0, 3.0) + 0.1 * noise,
                    self.base_kw * 0.5,
                    self.peak_kw * 1.2,
                )
            }
        };
        (self.base_kw + span * level).clamp(lo, hi.max(lo))
    }

    fn name(&self) -> &'static str {
        match self.pattern {
            FactoryPattern::Steady => "FactoryLoadA",
            FactoryPattern::DaytimeShifted => "FactoryLoadB",
        }
    }
}
