//! Synthetic time grid for curve reconstruction.
//!
//! Curves are drawn on an evenly spaced grid over `[0, max(observed time)]`,
//! independent of where the samples were taken.

use crate::error::FitError;

/// Default number of grid points.
pub const DEFAULT_GRID_POINTS: usize = 100;

/// Generate `steps` evenly spaced points between `min` and `max` (inclusive).
pub fn lin_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, FitError> {
    if !(min.is_finite() && max.is_finite() && max > min) {
        return Err(FitError::InvalidInput(format!(
            "invalid grid range: min={min}, max={max} (must be finite and max>min)"
        )));
    }
    if steps < 2 {
        return Err(FitError::InvalidInput("grid steps must be >= 2".to_string()));
    }

    let step = (max - min) / (steps as f64 - 1.0);
    let mut out = Vec::with_capacity(steps);
    for i in 0..steps - 1 {
        out.push(min + step * i as f64);
    }
    // Pin the endpoint exactly.
    out.push(max);
    Ok(out)
}

/// Ascending grid over `[0, t_max]`.
pub fn time_grid(t_max: f64, steps: usize) -> Result<Vec<f64>, FitError> {
    lin_space(0.0, t_max, steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lin_space_includes_endpoints() {
        let v = lin_space(0.0, 7.3, 100).unwrap();
        assert_eq!(v.len(), 100);
        assert_eq!(v[0], 0.0);
        assert_eq!(v[99], 7.3);
        assert!(v.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn time_grid_requires_positive_span() {
        assert!(time_grid(0.0, 10).is_err());
        assert!(time_grid(-1.0, 10).is_err());
        assert!(time_grid(f64::NAN, 10).is_err());
        assert!(time_grid(5.0, 1).is_err());
    }

    #[test]
    fn time_grid_spacing() {
        let g = time_grid(4.0, 5).unwrap();
        assert_eq!(g, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }
}
