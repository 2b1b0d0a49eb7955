//! CSV export for hourly simulation records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::HourRecord;

/// Column header for the hourly CSV export.
pub const HEADER: &str = "hour,pv_kwh,household_load_kwh,factory_load_kwh,\
                          public_load_kwh,ev_load_kwh,total_load_kwh,\
                          net_generation_kwh,grid_purchase_kwh,grid_sell_kwh,\
                          shared_battery_kwh,household_battery_kwh";

/// Exports hourly records to a CSV file at the given path.
///
/// Writes a header row followed by one data row per hour. Produces
/// deterministic output for identical inputs.
///
/// # Arguments
///
/// * `records` - Hourly records of one run
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[HourRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_csv(records, io::BufWriter::new(file))
}

/// Writes hourly records as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[HourRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in records {
        let values = [
            r.pv_kwh,
            r.household_load_kwh,
            r.factory_load_kwh,
            r.public_load_kwh,
            r.ev_load_kwh,
            r.total_load_kwh,
            r.net_generation_kwh,
            r.grid_purchase_kwh,
            r.grid_sell_kwh,
            r.shared_battery_kwh,
            r.household_battery_kwh,
        ];
        let mut row = Vec::with_capacity(values.len() + 1);
        row.push(r.hour.to_string());
        row.extend(values.iter().map(|v| format!("{v:.4}")));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
