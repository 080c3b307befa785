//! Formatted terminal output.
//!
//! Formatting lives here so the fetch/transform code stays free of
//! presentation details.

use crate::domain::{ChartPoint, DateKey, KEY_SHIFT, PlotConfig};
use crate::series::Series;

/// Plotted pairs as a list of tuples: `[('210101', 5), ('210102', 8)]`.
pub fn format_points(points: &[ChartPoint]) -> String {
    let items: Vec<String> = points
        .iter()
        .map(|p| format!("('{}', {})", p.label, p.value))
        .collect();
    format!("[{}]", items.join(", "))
}

/// Short run summary: source, window, mode, and coverage.
pub fn format_run_summary(config: &PlotConfig, series: &Series, points: &[ChartPoint]) -> String {
    let mut out = String::new();

    out.push_str("=== milk-stats ===\n");
    out.push_str(&format!("Source: {}\n", config.source.display_name()));
    out.push_str(&format!(
        "Duration : {} - {} (exclusive)\n",
        config.window.min, config.window.max
    ));
    out.push_str(&format!("Mode : {}\n", config.mode.display_name()));

    let span = match (series.first_key(), series.last_key()) {
        (Some(first), Some(last)) => format!("{} .. {}", display_key(first), display_key(last)),
        _ => "-".to_string(),
    };
    out.push_str(&format!("Fetched: {} date(s) | {span}\n", series.len()));

    let total: i128 = points.iter().map(|p| i128::from(p.value)).sum();
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => out.push_str(&format!(
            "Plotted: {} point(s) | {} .. {} | last={} | sum={total}\n",
            points.len(),
            first.label,
            last.label,
            last.value
        )),
        _ => out.push_str("Plotted: 0 point(s)\n"),
    }

    out
}

/// `yyyy-mm-dd` for real dates, the raw key otherwise.
pub fn display_key(key: DateKey) -> String {
    key.as_date()
        .map(|d| d.to_string())
        .unwrap_or_else(|| key.to_string())
}

/// Calendar date behind a shifted label, if it names a real day.
pub fn label_date(label: &str) -> Option<String> {
    let raw = label.parse::<i64>().ok()? + KEY_SHIFT;
    let key = DateKey::new(u32::try_from(raw).ok()?).ok()?;
    key.as_date().map(|d| d.to_string())
}
