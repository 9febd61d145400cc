//! Curve reconstruction for overlay plots.
//!
//! A fitted line lives in the model's linearized space. To draw it over the raw
//! observations we evaluate the line at each grid time and map the result back
//! through the inverse concentration transform.

use crate::domain::{CurveSeries, FitResult};
use crate::error::FitError;
use crate::fit::selection::Ranking;
use crate::models::{predict, regression_x};

/// Reconstruct concentrations for one fit at each grid time.
///
/// Grid times outside the model's time domain (negative time for the
/// square-root models) yield `FitError::Domain`.
pub fn reconstruct_curve(fit: &FitResult, grid: &[f64]) -> Result<Vec<f64>, FitError> {
    grid.iter()
        .enumerate()
        .map(|(index, &t)| {
            predict(fit.model, t, fit.slope, fit.intercept).ok_or_else(|| {
                let reason = regression_x(fit.model, t).err().unwrap_or("time outside model domain");
                FitError::Domain {
                    model: fit.model,
                    index,
                    reason,
                }
            })
        })
        .collect()
}

/// Reconstruct every available model of a ranking, in priority order.
pub fn reconstruct_all(ranking: &Ranking, grid: &[f64]) -> Result<Vec<CurveSeries>, FitError> {
    ranking
        .fits()
        .map(|fit| {
            Ok::<_, FitError>(CurveSeries {
                model: fit.model,
                time: grid.to_vec(),
                concentration: reconstruct_curve(fit, grid)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ModelKind, ObservationSeries};
    use crate::fit::fitter::fit_model;
    use crate::fit::grid::time_grid;
    use crate::fit::selection::rank_models;
    use crate::models::regression_y;

    fn release_profile() -> ObservationSeries {
        // Noisy, positive, decreasing profile; every model is defined on it.
        ObservationSeries::new(
            vec![0.0, 0.5, 1.0, 2.0, 3.0, 4.5, 6.0],
            vec![98.0, 83.0, 75.0, 58.0, 47.0, 33.0, 26.0],
        )
        .unwrap()
    }

    #[test]
    fn reconstruction_round_trips_through_fitted_line() {
        let s = release_profile();
        for model in ModelKind::ALL {
            let fit = fit_model(model, &s).unwrap();
            let curve = reconstruct_curve(&fit, s.time()).unwrap();

            for (&t, &c) in s.time().iter().zip(&curve) {
                let x = regression_x(model, t).unwrap();
                let expected = fit.linear_prediction(x);
                // Baker-Lonsdale squares the line, so only positive predictions
                // come back unchanged through the square root.
                if model == ModelKind::BakerLonsdale {
                    assert!(expected > 0.0);
                }
                let y = regression_y(model, c).unwrap();
                assert!(
                    (y - expected).abs() < 1e-9,
                    "{model} at t={t}: {y} vs {expected}"
                );
            }
        }
    }

    #[test]
    fn reconstruct_all_covers_available_models() {
        let s = ObservationSeries::new(vec![0.0, 1.0, 2.0, 3.0], vec![9.0, 6.0, 3.0, 0.0]).unwrap();
        let ranking = rank_models(&s).unwrap();
        let grid = time_grid(s.max_time(), 50).unwrap();

        let curves = reconstruct_all(&ranking, &grid).unwrap();
        let models: Vec<ModelKind> = curves.iter().map(|c| c.model).collect();
        assert!(!models.contains(&ModelKind::FirstOrder));
        assert_eq!(models[0], ModelKind::ZeroOrder);
        for c in &curves {
            assert_eq!(c.time.len(), 50);
            assert_eq!(c.concentration.len(), 50);
        }

        // Zero-Order is exact here: C = 9 - 3t.
        let zero = &curves[0];
        assert!((zero.concentration[49] - 0.0).abs() < 1e-9);
        assert!((zero.concentration[0] - 9.0).abs() < 1e-9);
    }

    #[test]
    fn negative_grid_time_is_a_domain_error_for_sqrt_models() {
        let fit = FitResult {
            model: ModelKind::Higuchi,
            slope: -1.0,
            intercept: 5.0,
            r_squared: 1.0,
            n: 3,
        };
        let err = reconstruct_curve(&fit, &[0.0, -1.0]).unwrap_err();
        assert!(matches!(err, FitError::Domain { model: ModelKind::Higuchi, index: 1, .. }));
    }
}
