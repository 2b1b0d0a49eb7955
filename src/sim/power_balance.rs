//! Hourly energy balance arithmetic and pre-run balance diagnostics.

use std::fmt;

use super::types::HourInput;

/// Sums the four load components of one hour (kWh).
pub fn total_load_kwh(household: f64, factory: f64, public: f64, ev: f64) -> f64 {
    household + factory + public + ev
}

/// Net generation: positive = surplus, negative = deficit (kWh).
pub fn net_generation_kwh(pv: f64, total_load: f64) -> f64 {
    pv - total_load
}

/// Range summary of a scenario's hourly inputs before any battery dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BalanceSummary {
    /// Smallest hourly PV generation (kWh).
    pub pv_min: f64,
    /// Largest hourly PV generation (kWh).
    pub pv_max: f64,
    /// Smallest hourly total load (kWh).
    pub load_min: f64,
    /// Largest hourly total load (kWh).
    pub load_max: f64,
    /// Smallest hourly net generation (kWh).
    pub net_min: f64,
    /// Largest hourly net generation (kWh).
    pub net_max: f64,
    /// Hours with net generation > 0.
    pub surplus_hours: usize,
    /// Hours with net generation < 0.
    pub deficit_hours: usize,
}

impl BalanceSummary {
    /// Summarizes a sequence of hourly inputs. Empty input yields all zeros.
    pub fn from_inputs(inputs: &[HourInput]) -> Self {
        let Some(first) = inputs.first() else {
            return Self::default();
        };

        let mut s = Self {
            pv_min: first.pv,
            pv_max: first.pv,
            load_min: first.total_load(),
            load_max: first.total_load(),
            net_min: first.net_generation(),
            net_max: first.net_generation(),
            surplus_hours: 0,
            deficit_hours: 0,
        };

        for input in inputs {
            let load = input.total_load();
            let net = input.net_generation();
            s.pv_min = s.pv_min.min(input.pv);
            s.pv_max = s.pv_max.max(input.pv);
            s.load_min = s.load_min.min(load);
            s.load_max = s.load_max.max(load);
            s.net_min = s.net_min.min(net);
            s.net_max = s.net_max.max(net);
            if net > 0.0 {
                s.surplus_hours += 1;
            } else if net < 0.0 {
                s.deficit_hours += 1;
            }
        }
        s
    }
}

impl fmt::Display for BalanceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pv=[{:.2}, {:.2}] load=[{:.2}, {:.2}] net=[{:.2}, {:.2}] kWh, \
             {} surplus h, {} deficit h",
            self.pv_min,
            self.pv_max,
            self.load_min,
            self.load_max,
            self.net_min,
            self.net_max,
            self.surplus_hours,
            self.deficit_hours,
        )
    }
}
