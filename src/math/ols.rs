//! Simple ordinary least squares.
//!
//! Every kinetic model is fitted as a straight line in its linearized space:
//!
//! ```text
//! minimize Σ (y_i - (a + b x_i))^2
//! ```
//!
//! Implementation choices:
//! - We work on mean-centered vectors, which keeps `Sxx` and `Sxy` well
//!   conditioned even when x values sit far from zero.
//! - R² is `1 - SS_res / SS_tot`. When `SS_tot` is zero (constant y) R² is
//!   reported as `0.0`, the same convention as a zero Pearson correlation.

use nalgebra::DVector;

/// Slope, intercept, and coefficient of determination of a line fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

/// Fit `y = intercept + slope * x` by ordinary least squares.
///
/// Returns `None` when the lengths differ, fewer than two points are given,
/// all x values are identical (slope undefined), or the coefficients are not
/// representable as finite values.
pub fn linregress(x: &[f64], y: &[f64]) -> Option<LineFit> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    if x.iter().all(|&v| v == x[0]) {
        return None;
    }

    let x = DVector::from_column_slice(x);
    let y = DVector::from_column_slice(y);

    let x_mean = x.mean();
    let y_mean = y.mean();
    let xc = x.add_scalar(-x_mean);
    let yc = y.add_scalar(-y_mean);

    // Scale both centered vectors to unit max-abs so the sums of squares stay
    // finite for large magnitudes. R² is scale invariant.
    let sx = xc.amax();
    let sy = yc.amax();
    if !(sx.is_finite() && sx > 0.0 && sy.is_finite()) {
        return None;
    }
    let sy = if sy > 0.0 { sy } else { 1.0 };
    let xs = xc / sx;
    let ys = yc / sy;

    let sxx = xs.dot(&xs);
    if !(sxx.is_finite() && sxx > 0.0) {
        return None;
    }
    let scaled_slope = xs.dot(&ys) / sxx;

    let residuals = &ys - &xs * scaled_slope;
    let ss_res = residuals.dot(&residuals);
    let ss_tot = ys.dot(&ys);
    let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 };

    let slope = scaled_slope * (sy / sx);
    let intercept = y_mean - slope * x_mean;
    if !(slope.is_finite() && intercept.is_finite()) {
        return None;
    }

    Some(LineFit {
        slope,
        intercept,
        r_squared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_line_has_unit_r_squared() {
        // y = 5 - 2x on x = 0..=10
        let x: Vec<f64> = (0..=10).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| 5.0 - 2.0 * v).collect();

        let fit = linregress(&x, &y).unwrap();
        assert!((fit.slope + 2.0).abs() < 1e-12, "slope={}", fit.slope);
        assert!((fit.intercept - 5.0).abs() < 1e-12, "intercept={}", fit.intercept);
        assert!((fit.r_squared - 1.0).abs() < 1e-12, "r2={}", fit.r_squared);
    }

    #[test]
    fn noisy_line_matches_hand_computation() {
        // x = [0,1,2,3], y = [1,3,2,5]: slope 1.1, intercept 1.1, R² = 1 - 2.7/8.75
        let fit = linregress(&[0.0, 1.0, 2.0, 3.0], &[1.0, 3.0, 2.0, 5.0]).unwrap();
        assert!((fit.slope - 1.1).abs() < 1e-12);
        assert!((fit.intercept - 1.1).abs() < 1e-12);
        let expected_r2 = 1.0 - 2.7 / 8.75;
        assert!((fit.r_squared - expected_r2).abs() < 1e-12);
    }

    #[test]
    fn identical_x_is_degenerate() {
        assert!(linregress(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn rejects_short_or_mismatched_input() {
        assert!(linregress(&[1.0], &[1.0]).is_none());
        assert!(linregress(&[1.0, 2.0], &[1.0]).is_none());
    }

    #[test]
    fn large_finite_values_keep_a_finite_r_squared() {
        let fit = linregress(&[0.0, 1.0, 2.0], &[1e300, 1e200, 1e100]).unwrap();
        assert!((fit.r_squared - 0.75).abs() < 1e-12, "r2={}", fit.r_squared);
        assert!((fit.slope / 1e300 + 0.5).abs() < 1e-12);
        assert!(fit.intercept.is_finite());
    }

    #[test]
    fn overflowing_slope_is_degenerate() {
        assert!(linregress(&[0.0, 1e-300], &[0.0, 1e300]).is_none());
    }

    #[test]
    fn constant_y_reports_zero_r_squared() {
        let fit = linregress(&[0.0, 1.0, 2.0], &[4.0, 4.0, 4.0]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 4.0);
        assert_eq!(fit.r_squared, 0.0);
    }
}
