//! Chart rendering outside the TUI.
//!
//! - fixed-size text plot for terminals and pipes (`ascii`)
//! - SVG file export (`svg`)
//!
//! The x axis is categorical: point `i` sits at `x = i` and is labelled with
//! its shifted date key.

pub mod ascii;
pub mod svg;

pub use ascii::render_ascii_plot;
pub use svg::write_svg_chart;

use crate::domain::ChartPoint;

/// `(index, value)` coordinates for plotting.
pub fn coordinates(points: &[ChartPoint]) -> Vec<(f64, f64)> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value as f64))
        .collect()
}

/// X bounds covering every index; a single point still gets a non-empty range.
pub fn index_bounds(len: usize) -> [f64; 2] {
    let last = len.saturating_sub(1) as f64;
    if last > 0.0 { [0.0, last] } else { [-0.5, 0.5] }
}

/// Y bounds with 5% padding; a flat series gets a unit band around its level.
pub fn value_bounds(points: &[ChartPoint]) -> [f64; 2] {
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in points {
        let y = p.value as f64;
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !y_min.is_finite() || !y_max.is_finite() {
        return [0.0, 1.0];
    }
    if y_max <= y_min {
        return [y_min - 1.0, y_max + 1.0];
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    [y_min - pad, y_max + pad]
}

/// Tick label for x value `v`: the point label when `v` lands on an index.
pub fn label_at(labels: &[String], v: f64) -> String {
    let i = v.round();
    if (v - i).abs() > 1e-6 || i < 0.0 {
        return String::new();
    }
    labels.get(i as usize).cloned().unwrap_or_default()
}
