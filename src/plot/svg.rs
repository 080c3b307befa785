//! SVG chart export.
//!
//! Mirrors the terminal chart, with room for what a terminal cannot show:
//! a two-line title and x tick labels rotated by 90°.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::FontTransform;
use tracing::info;

use crate::domain::ChartPoint;
use crate::error::AppError;
use crate::plot::{coordinates, index_bounds, label_at, value_bounds};

pub const SVG_SIZE: (u32, u32) = (1024, 640);

const TITLE_HEIGHT: u32 = 56;

/// Draw `points` as a single line series into an SVG file at `path`.
pub fn write_svg_chart(path: &Path, points: &[ChartPoint], title: &str) -> Result<(), AppError> {
    let labels: Vec<String> = points.iter().map(|p| p.label.clone()).collect();
    let coords = coordinates(points);
    let [x0, x1] = index_bounds(points.len());
    let [y0, y1] = value_bounds(points);

    let root = SVGBackend::new(path, SVG_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let (header, body) = root.split_vertically(TITLE_HEIGHT);
    for (i, line) in title.lines().enumerate() {
        header
            .draw(&Text::new(
                line.to_string(),
                (12, 8 + 22 * i as i32),
                ("sans-serif", 18).into_font().color(&BLACK),
            ))
            .map_err(render_err)?;
    }

    let mut chart = ChartBuilder::on(&body)
        .margin(12)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 80)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(points.len().clamp(2, 40))
        .y_labels(8)
        .x_label_formatter(&|v| label_at(&labels, *v))
        .y_label_formatter(&|v| format!("{v:.0}"))
        .x_label_style(("sans-serif", 12).into_font().transform(FontTransform::Rotate90))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(coords.iter().copied(), &BLUE))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    info!(path = %path.display(), points = points.len(), "wrote svg chart");
    Ok(())
}

fn render_err(e: impl std::fmt::Display) -> AppError {
    AppError::Render(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_svg_with_title_and_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let points = vec![
            ChartPoint::new("210101", 5),
            ChartPoint::new("210102", 8),
            ChartPoint::new("210103", 15),
        ];

        write_svg_chart(&path, &points, "Duration : 20210100 - 20210104\nMode : Accumulation").unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Duration : 20210100 - 20210104"));
        assert!(svg.contains("Mode : Accumulation"));
        assert!(svg.contains("210101"));
    }
}
