//! Read/write raw series snapshots.
//!
//! A snapshot is exactly what the download endpoints return (one JSON object
//! of `yyyymmdd` → count), so a saved file can stand in for the network.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::Path;

use crate::domain::Count;
use crate::error::AppError;
use crate::series::Series;

/// Write the merged series as a pretty-printed JSON object.
pub fn write_snapshot(path: &Path, series: &Series) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| AppError::file("Failed to create snapshot", path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &series.to_raw())
        .map_err(|e| AppError::usage(format!("Failed to write snapshot '{}': {e}", path.display())))?;
    Ok(())
}

/// Read a snapshot written by [`write_snapshot`] (or saved from an endpoint).
pub fn read_snapshot(path: &Path) -> Result<Series, AppError> {
    let mut body = String::new();
    File::open(path)
        .and_then(|mut f| f.read_to_string(&mut body))
        .map_err(|e| AppError::file("Failed to read snapshot", path, e))?;
    let raw: BTreeMap<String, Count> = serde_json::from_str(&body)
        .map_err(|e| AppError::usage(format!("Invalid snapshot '{}': {e}", path.display())))?;
    Series::from_raw(raw)
}
