//! Export plotted pairs to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::ChartPoint;
use crate::error::AppError;

/// Write `date,value` rows (date is the shifted key label).
pub fn write_points_csv(path: &Path, points: &[ChartPoint]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| AppError::file("Failed to create export CSV", path, e))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "date,value").map_err(|e| AppError::file("Failed to write export CSV header", path, e))?;
    for p in points {
        writeln!(out, "{},{}", p.label, p.value)
            .map_err(|e| AppError::file("Failed to write export CSV row", path, e))?;
    }
    out.flush()
        .map_err(|e| AppError::file("Failed to write export CSV", path, e))?;

    Ok(())
}
