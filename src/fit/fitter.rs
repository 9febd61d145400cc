//! Fitting routine for a single model kind.
//!
//! Given a validated observation series we:
//! - map it into the model's linearized space
//! - solve the simple OLS problem there
//! - package slope, intercept, and R² as a `FitResult`

use tracing::debug;

use crate::domain::{FitResult, ModelKind, ObservationSeries};
use crate::error::FitError;
use crate::math::linregress;
use crate::models::forward_transform;

/// Fit one model to the observations.
///
/// Errors are per-model (`Domain`, `DegenerateFit`); the ranking turns them
/// into "unavailable" entries.
pub fn fit_model(model: ModelKind, series: &ObservationSeries) -> Result<FitResult, FitError> {
    let lin = forward_transform(model, series)?;
    let line = linregress(&lin.x, &lin.y).ok_or(FitError::DegenerateFit { model })?;

    debug!(
        model = model.slug(),
        slope = line.slope,
        intercept = line.intercept,
        r_squared = line.r_squared,
        "fitted model"
    );

    Ok(FitResult {
        model,
        slope: line.slope,
        intercept: line.intercept,
        r_squared: line.r_squared,
        n: series.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_order_recovers_line() {
        let time: Vec<f64> = (0..=10).map(f64::from).collect();
        let conc: Vec<f64> = time.iter().map(|t| 5.0 - 2.0 * t).collect();
        let s = ObservationSeries::new(time, conc).unwrap();

        let fit = fit_model(ModelKind::ZeroOrder, &s).unwrap();
        assert!((fit.slope + 2.0).abs() < 1e-12);
        assert!((fit.intercept - 5.0).abs() < 1e-12);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
        assert!((fit.rate_constant() - 2.0).abs() < 1e-12);
        assert_eq!(fit.n, 11);
    }

    #[test]
    fn first_order_recovers_exponential_decay() {
        let time: Vec<f64> = (0..6).map(f64::from).collect();
        let conc: Vec<f64> = time.iter().map(|t| 100.0 * (-0.3 * t).exp()).collect();
        let s = ObservationSeries::new(time, conc).unwrap();

        let fit = fit_model(ModelKind::FirstOrder, &s).unwrap();
        assert!((fit.rate_constant() - 0.3).abs() < 1e-12);
        assert!((fit.intercept - 100.0f64.ln()).abs() < 1e-12);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
    }

    #[test]
    fn identical_times_are_degenerate_for_every_model() {
        let s = ObservationSeries::new(vec![3.0; 4], vec![10.0, 9.0, 8.0, 7.0]).unwrap();
        for model in ModelKind::ALL {
            assert_eq!(fit_model(model, &s), Err(FitError::DegenerateFit { model }));
        }
    }

    #[test]
    fn domain_error_is_propagated() {
        let s = ObservationSeries::new(vec![0.0, 1.0, 2.0], vec![5.0, 0.0, 1.0]).unwrap();
        let err = fit_model(ModelKind::FirstOrder, &s).unwrap_err();
        assert!(matches!(err, FitError::Domain { model: ModelKind::FirstOrder, index: 1, .. }));
    }
}
