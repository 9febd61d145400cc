//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed points: `o`
//! - reconstructed curves: one glyph per model (`ModelKind::glyph`)

use crate::domain::{CurveFile, CurveSeries, ObservationPoint};

/// Render observations with every reconstructed curve overlaid.
pub fn render_ascii_plot(
    observations: &[ObservationPoint],
    curves: &[CurveSeries],
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (t_min, t_max) = time_range(observations, curves).unwrap_or((0.0, 1.0));
    let (c_min, c_max) = conc_range(observations, curves).unwrap_or((0.0, 1.0));
    let (c_min, c_max) = pad_range(c_min, c_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw curves first (so points can overlay). Earlier models keep their
    // cells where curves cross.
    for curve in curves {
        draw_curve(&mut grid, curve, t_min, t_max, c_min, c_max);
    }

    for p in observations {
        if !(p.time.is_finite() && p.concentration.is_finite()) {
            continue;
        }
        let x = map_x(p.time, t_min, t_max, width);
        let y = map_y(p.concentration, c_min, c_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: time=[{t_min:.3}, {t_max:.3}] | conc=[{c_min:.2}, {c_max:.2}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out.push_str("Legend: o data");
    for curve in curves {
        out.push_str(&format!(" | {} {}", curve.model.glyph(), curve.model.display_name()));
    }
    out.push('\n');

    out
}

/// Render a saved curve JSON file.
pub fn render_ascii_plot_from_curve_file(curve: &CurveFile, width: usize, height: usize) -> String {
    render_ascii_plot(&curve.observations, &curve.curves, width, height)
}

fn time_range(observations: &[ObservationPoint], curves: &[CurveSeries]) -> Option<(f64, f64)> {
    let times = observations
        .iter()
        .map(|p| p.time)
        .chain(curves.iter().flat_map(|c| c.time.iter().copied()));
    finite_range(times)
}

fn conc_range(observations: &[ObservationPoint], curves: &[CurveSeries]) -> Option<(f64, f64)> {
    let values = observations
        .iter()
        .map(|p| p.concentration)
        .chain(curves.iter().flat_map(|c| c.concentration.iter().copied()));
    finite_range(values)
}

fn finite_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }
    if min_v.is_finite() && max_v.is_finite() && max_v > min_v {
        Some((min_v, max_v))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &CurveSeries, t_min: f64, t_max: f64, c_min: f64, c_max: f64) {
    if curve.time.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();
    let ch = curve.model.glyph();

    let mut prev = None;
    for (&t, &c) in curve.time.iter().zip(&curve.concentration) {
        // Overflowing reconstructions (e.g. exp of a large line) break the line.
        if !(t.is_finite() && c.is_finite()) {
            prev = None;
            continue;
        }
        let x = map_x(t, t_min, t_max, width);
        let yy = map_y(c, c_min, c_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, yy, ch);
        } else if grid[yy][x] == ' ' {
            grid[yy][x] = ch;
        }
        prev = Some((x, yy));
    }
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
