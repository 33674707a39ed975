//! CSV export for circuit sizing reports.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::ExportError;
use crate::sizing::CircuitReport;

/// Column header for the circuit schedule export.
const HEADER: &str = "circuit,load_name,branch_type,poles,breaker_rating,breaker_frame,\
                       load_current_a,length_ft,wire_material,wire_temp_rating,wire_insulation,\
                       sets,hot_qty,hot_size,neutral_qty,neutral_size,ground_qty,ground_size,\
                       ig_qty,ig_size,ampacity_a,voltage_drop_pct,conduit_type,conduit_size,\
                       conduit_fill_pct,callout,calc_failed,warnings,errors";

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn opt_fixed(value: Option<f64>, decimals: usize) -> String {
    value.map(|v| format!("{v:.decimals$}")).unwrap_or_default()
}

/// Exports circuit reports to a CSV file at the given path.
///
/// Writes a header row followed by one row per circuit. Empty outputs are
/// written as empty cells; notices are joined with `"; "`.
///
/// # Errors
///
/// Returns an [`ExportError`] if file creation or writing fails.
pub fn export_csv(reports: &[CircuitReport], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(reports, buf)
}

/// Writes circuit reports as CSV to any writer.
///
/// # Errors
///
/// Returns an [`ExportError`] if writing fails.
pub fn write_csv(reports: &[CircuitReport], writer: impl Write) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in reports {
        wtr.write_record(&[
            r.name.clone(),
            r.load_name.clone().unwrap_or_default(),
            r.branch_type.to_string(),
            r.poles.to_string(),
            opt(r.breaker_rating),
            opt(r.breaker_frame),
            opt_fixed(r.circuit_load_current, 2),
            opt_fixed(r.length, 1),
            opt(r.wire_material),
            opt(r.wire_temp_rating),
            r.wire_insulation.clone().unwrap_or_default(),
            opt(r.number_of_sets),
            r.hot_wire_quantity.to_string(),
            opt(r.hot_wire_size),
            r.neutral_wire_quantity.to_string(),
            opt(r.neutral_wire_size),
            r.ground_wire_quantity.to_string(),
            opt(r.ground_wire_size),
            r.isolated_ground_wire_quantity.to_string(),
            opt(r.isolated_ground_wire_size),
            opt(r.circuit_base_ampacity),
            opt_fixed(r.voltage_drop_percentage.map(|vd| vd * 100.0), 2),
            r.conduit_type.clone().unwrap_or_default(),
            r.conduit_size.clone().unwrap_or_default(),
            opt_fixed(r.conduit_fill_percentage.map(|fill| fill * 100.0), 1),
            r.conduit_and_wire_size.clone(),
            r.calc_failed.to_string(),
            r.notices.warnings.join("; "),
            r.notices.errors.join("; "),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
