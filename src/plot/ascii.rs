//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal or a pipe
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - data points: `o`
//! - connecting line: `-`

use crate::domain::ChartPoint;
use crate::plot::value_bounds;

/// Render `points` as a line plot of `width` × `height` characters plus a header.
pub fn render_ascii_plot(points: &[ChartPoint], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let [y_min, y_max] = value_bounds(points);

    let mut grid = vec![vec![' '; width]; height];

    let cells: Vec<(usize, usize)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            (
                map_x(i, points.len(), width),
                map_y(p.value as f64, y_min, y_max, height),
            )
        })
        .collect();

    // Line first, so points overlay it.
    for pair in cells.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        draw_line(&mut grid, x0, y0, x1, y1, '-');
    }
    for &(x, y) in &cells {
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => out.push_str(&format!(
            "Plot: {} .. {} (n={}) | y=[{y_min:.2}, {y_max:.2}]\n",
            first.label,
            last.label,
            points.len()
        )),
        _ => out.push_str("Plot: no points\n"),
    }

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn map_x(index: usize, len: usize, width: usize) -> usize {
    if len < 2 {
        return 0;
    }
    let u = index as f64 / (len as f64 - 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
