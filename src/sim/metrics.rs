//! Post-hoc summary indicators computed from simulation results.

use std::fmt;

use serde::Serialize;

use super::engine::SimulationResult;

/// Aggregate indicators of one completed run.
///
/// Computed post-hoc from the hourly records so reported numbers always
/// agree with the exported series.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Metrics {
    /// Sum of hourly grid purchases (kWh).
    pub total_grid_purchase_kwh: f64,
    /// Sum of hourly grid sales (kWh).
    pub total_grid_sell_kwh: f64,
    /// Sum of hourly PV generation (kWh).
    pub total_pv_kwh: f64,
    /// Sum of hourly total load (kWh).
    pub total_load_kwh: f64,
    /// Share of PV not exported, in percent. Zero when there was no PV.
    pub self_consumption_pct: f64,
    /// Hours with a non-zero grid sale.
    pub sell_hours: usize,
    /// Largest hourly grid sale (kWh).
    pub peak_sell_kwh: f64,
    /// Largest hourly grid purchase (kWh).
    pub peak_purchase_kwh: f64,
    /// Total stored energy after the first hour (kWh).
    pub stored_first_kwh: f64,
    /// Total stored energy after the last hour (kWh).
    pub stored_last_kwh: f64,
    /// Lowest total stored energy at any hour boundary (kWh).
    pub stored_min_kwh: f64,
    /// Highest total stored energy at any hour boundary (kWh).
    pub stored_max_kwh: f64,
}

/// Self-consumption rate: `(pv - sell) / pv * 100`, or 0 without PV.
pub fn self_consumption_pct(total_pv_kwh: f64, total_sell_kwh: f64) -> f64 {
    if total_pv_kwh > 0.0 {
        (total_pv_kwh - total_sell_kwh) / total_pv_kwh * 100.0
    } else {
        0.0
    }
}

impl Metrics {
    /// Reduces a run to its summary indicators. An empty run yields all zeros.
    pub fn from_result(result: &SimulationResult) -> Self {
        let Some(first) = result.records.first() else {
            return Self::default();
        };

        let mut m = Self {
            stored_first_kwh: first.total_stored_kwh(),
            stored_min_kwh: first.total_stored_kwh(),
            stored_max_kwh: first.total_stored_kwh(),
            ..Self::default()
        };

        for r in &result.records {
            m.total_grid_purchase_kwh += r.grid_purchase_kwh;
            m.total_grid_sell_kwh += r.grid_sell_kwh;
            m.total_pv_kwh += r.pv_kwh;
            m.total_load_kwh += r.total_load_kwh;

            if r.grid_sell_kwh > 0.0 {
                m.sell_hours += 1;
            }
            m.peak_sell_kwh = m.peak_sell_kwh.max(r.grid_sell_kwh);
            m.peak_purchase_kwh = m.peak_purchase_kwh.max(r.grid_purchase_kwh);

            let stored = r.total_stored_kwh();
            m.stored_min_kwh = m.stored_min_kwh.min(stored);
            m.stored_max_kwh = m.stored_max_kwh.max(stored);
            m.stored_last_kwh = stored;
        }

        m.self_consumption_pct = self_consumption_pct(m.total_pv_kwh, m.total_grid_sell_kwh);
        m
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid purchase total:   {:.2} kWh", self.total_grid_purchase_kwh)?;
        writeln!(f, "Grid sell total:       {:.2} kWh", self.total_grid_sell_kwh)?;
        writeln!(f, "PV generation total:   {:.2} kWh", self.total_pv_kwh)?;
        writeln!(f, "Load total:            {:.2} kWh", self.total_load_kwh)?;
        writeln!(f, "Self-consumption:      {:.2}%", self.self_consumption_pct)?;
        writeln!(
            f,
            "Storage (first/last):  {:.2} / {:.2} kWh",
            self.stored_first_kwh, self.stored_last_kwh
        )?;
        writeln!(
            f,
            "Storage (min/max):     {:.2} / {:.2} kWh",
            self.stored_min_kwh, self.stored_max_kwh
        )?;
        write!(
            f,
            "Sell hours:            {} (peak {:.2} kWh)",
            self.sell_hours, self.peak_sell_kwh
        )
    }
}

/// Difference between two scenarios run over the same household inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// `a.total_grid_purchase_kwh - b.total_grid_purchase_kwh`.
    pub purchase_diff_kwh: f64,
    /// `a.total_grid_sell_kwh - b.total_grid_sell_kwh`.
    pub sell_diff_kwh: f64,
    /// Purchase reduction of `b` relative to `a` in percent; 0 when `a` bought nothing.
    pub purchase_reduction_pct: f64,
}

impl Comparison {
    /// Compares scenario `b` against reference scenario `a`.
    pub fn between(a: &Metrics, b: &Metrics) -> Self {
        let purchase_diff_kwh = a.total_grid_purchase_kwh - b.total_grid_purchase_kwh;
        let purchase_reduction_pct = if a.total_grid_purchase_kwh > 0.0 {
            purchase_diff_kwh / a.total_grid_purchase_kwh * 100.0
        } else {
            0.0
        };
        Self {
            purchase_diff_kwh,
            sell_diff_kwh: a.total_grid_sell_kwh - b.total_grid_sell_kwh,
            purchase_reduction_pct,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Purchase diff (A - B): {:.2} kWh", self.purchase_diff_kwh)?;
        writeln!(f, "Sell diff (A - B):     {:.2} kWh", self.sell_diff_kwh)?;
        write!(f, "Purchase reduction:    {:.2}%", self.purchase_reduction_pct)
    }
}
