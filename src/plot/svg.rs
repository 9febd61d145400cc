//! SVG chart of observations and reconstructed model curves.
//!
//! Rendered with Plotters' SVG backend: scatter of the observed samples, one
//! line per available model, and a legend.

use std::path::Path;

use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::domain::{CurveSeries, ObservationPoint};
use crate::error::AppError;

/// Minimum SVG canvas size in pixels.
pub const MIN_SVG_SIZE: u32 = 200;

/// Render the overlay chart to an SVG file.
pub fn render_svg(
    path: &Path,
    observations: &[ObservationPoint],
    curves: &[CurveSeries],
    size: (u32, u32),
) -> Result<(), AppError> {
    let ((x0, x1), (y0, y1)) = chart_bounds(observations, curves);
    let draw_err = |e: DrawingAreaErrorKind<std::io::Error>| {
        AppError::new(2, format!("Failed to render SVG '{}': {e}", path.display()))
    };

    let size = (size.0.max(MIN_SVG_SIZE), size.1.max(MIN_SVG_SIZE));
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Kinetic Models Fitting", ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc("Concentration")
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(
            observations
                .iter()
                .filter(|p| p.time.is_finite() && p.concentration.is_finite())
                .map(|p| Circle::new((p.time, p.concentration), 3, BLACK.filled())),
        )
        .map_err(draw_err)?
        .label("Data")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, BLACK.filled()));

    for (idx, curve) in curves.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let points: Vec<(f64, f64)> = curve
            .pairs()
            .into_iter()
            .filter(|(t, c)| t.is_finite() && c.is_finite())
            .collect();
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))
            .map_err(draw_err)?
            .label(curve.model.display_name())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Axis bounds covering observations and finite curve values, padded by 5%.
fn chart_bounds(observations: &[ObservationPoint], curves: &[CurveSeries]) -> ((f64, f64), (f64, f64)) {
    let mut t = (f64::INFINITY, f64::NEG_INFINITY);
    let mut c = (f64::INFINITY, f64::NEG_INFINITY);
    let all = observations
        .iter()
        .map(|p| (p.time, p.concentration))
        .chain(curves.iter().flat_map(|s| s.pairs()));
    // Axes are independent: an overflowed value still leaves its time on the x-axis.
    for (ti, ci) in all {
        if ti.is_finite() {
            t = (t.0.min(ti), t.1.max(ti));
        }
        if ci.is_finite() {
            c = (c.0.min(ci), c.1.max(ci));
        }
    }
    (pad(t), pad(c))
}

fn pad((lo, hi): (f64, f64)) -> (f64, f64) {
    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    if span <= 0.0 {
        return (lo - 0.5, hi + 0.5);
    }
    (lo - span * 0.05, hi + span * 0.05)
}
