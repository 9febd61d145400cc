//! Model ranking across the five kinetic models.
//!
//! The tool fits every model and compares them by R².
//!
//! Selection rules:
//! 1. A model whose transform or fit fails (`Domain`, `DegenerateFit`) is
//!    recorded as unavailable; it does not abort the run. Any other error does.
//! 2. The best model is the available one with the strictly largest R².
//! 3. Exact ties go to the earliest model in `ModelKind::ALL`.
//! 4. If no model is available the ranking fails with `NoViableModel`.

use rayon::prelude::*;
use tracing::{info, warn};

use crate::domain::{FitResult, ModelKind, ModelOutcome, ModelStatus, ObservationSeries};
use crate::error::FitError;
use crate::fit::fitter::fit_model;

/// Output of fitting + selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// One outcome per model, in priority order.
    pub outcomes: Vec<ModelOutcome>,
    pub best: FitResult,
}

impl Ranking {
    /// Successful fits, in priority order.
    pub fn fits(&self) -> impl Iterator<Item = &FitResult> {
        self.outcomes.iter().filter_map(ModelOutcome::fit)
    }

    pub fn outcome(&self, model: ModelKind) -> Option<&ModelOutcome> {
        self.outcomes.iter().find(|o| o.model == model)
    }
}

/// Fit all models and select the best one.
pub fn rank_models(series: &ObservationSeries) -> Result<Ranking, FitError> {
    // Models are independent; an indexed parallel collect keeps priority order.
    let outcomes: Vec<ModelOutcome> = ModelKind::ALL
        .par_iter()
        .map(|&model| {
            let status = match fit_model(model, series) {
                Ok(fit) => ModelStatus::Fitted(fit),
                Err(err) if err.is_per_model() => ModelStatus::Unavailable(err),
                Err(err) => return Err(err),
            };
            Ok(ModelOutcome { model, status })
        })
        .collect::<Result<Vec<_>, FitError>>()?;

    for outcome in &outcomes {
        if let ModelStatus::Unavailable(err) = &outcome.status {
            warn!(model = outcome.model.slug(), "model unavailable: {err}");
        }
    }

    let best = select_best(outcomes.iter().filter_map(ModelOutcome::fit))
        .copied()
        .ok_or(FitError::NoViableModel)?;

    info!(model = best.model.slug(), r_squared = best.r_squared, "selected best model");

    Ok(Ranking { outcomes, best })
}

/// Pick the fit with the largest R².
///
/// Fits must be supplied in priority order: a later fit replaces the current
/// best only when its R² is strictly greater, so ties keep the earlier model.
/// NaN scores never win.
pub fn select_best<'a>(fits: impl IntoIterator<Item = &'a FitResult>) -> Option<&'a FitResult> {
    let mut best: Option<&FitResult> = None;
    for fit in fits {
        if fit.r_squared.is_nan() {
            continue;
        }
        if best.is_none_or(|b| fit.r_squared > b.r_squared) {
            best = Some(fit);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(model: ModelKind, r_squared: f64) -> FitResult {
        FitResult {
            model,
            slope: -1.0,
            intercept: 1.0,
            r_squared,
            n: 5,
        }
    }

    #[test]
    fn first_order_wins_on_exponential_decay() {
        let s = ObservationSeries::new(
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            vec![100.0, 80.0, 64.0, 51.0, 41.0, 33.0],
        )
        .unwrap();

        let ranking = rank_models(&s).unwrap();
        assert_eq!(ranking.best.model, ModelKind::FirstOrder);
        assert_eq!(ranking.outcomes.len(), 5);
        assert!(ranking.outcomes.iter().all(ModelOutcome::is_available));
        for other in ranking.fits() {
            assert!(other.r_squared <= ranking.best.r_squared);
        }
    }

    #[test]
    fn outcomes_follow_priority_order() {
        let s = ObservationSeries::new(vec![0.0, 1.0, 2.0], vec![3.0, 2.0, 1.5]).unwrap();
        let ranking = rank_models(&s).unwrap();
        let order: Vec<ModelKind> = ranking.outcomes.iter().map(|o| o.model).collect();
        assert_eq!(order, ModelKind::ALL.to_vec());
    }

    #[test]
    fn positive_non_increasing_data_fits_core_models() {
        let s = ObservationSeries::new(
            vec![0.0, 0.5, 1.0, 2.0, 4.0],
            vec![50.0, 50.0, 31.0, 12.0, 0.4],
        )
        .unwrap();
        let ranking = rank_models(&s).unwrap();
        for model in [ModelKind::ZeroOrder, ModelKind::FirstOrder, ModelKind::Higuchi] {
            assert!(ranking.outcome(model).unwrap().is_available(), "{model} should fit");
        }
    }

    #[test]
    fn unavailable_first_order_does_not_abort_ranking() {
        let s = ObservationSeries::new(vec![0.0, 1.0, 2.0, 3.0], vec![9.0, 6.0, 3.0, 0.0]).unwrap();
        let ranking = rank_models(&s).unwrap();

        let first = ranking.outcome(ModelKind::FirstOrder).unwrap();
        assert_eq!(
            first.status,
            ModelStatus::Unavailable(FitError::Domain {
                model: ModelKind::FirstOrder,
                index: 3,
                reason: "non-positive concentration",
            })
        );
        assert!(first.unavailable_reason().unwrap().contains("index 3"));
        // Perfectly linear release.
        assert_eq!(ranking.best.model, ModelKind::ZeroOrder);
    }

    #[test]
    fn huge_concentrations_still_score_every_model() {
        let s = ObservationSeries::new(vec![0.0, 1.0, 2.0], vec![1e300, 1e200, 1e100]).unwrap();
        let ranking = rank_models(&s).unwrap();
        assert!(ranking.outcomes.iter().all(ModelOutcome::is_available));
        assert!(ranking.fits().all(|f| f.r_squared.is_finite()));
        assert!((ranking.outcome(ModelKind::ZeroOrder).unwrap().fit().unwrap().r_squared - 0.75).abs() < 1e-12);
        assert_eq!(ranking.best.model, ModelKind::FirstOrder);
    }

    #[test]
    fn identical_times_leave_no_viable_model() {
        let s = ObservationSeries::new(vec![1.0; 3], vec![3.0, 2.0, 1.0]).unwrap();
        assert_eq!(rank_models(&s), Err(FitError::NoViableModel));
    }

    #[test]
    fn ties_resolve_by_priority_order() {
        let fits = [
            fit(ModelKind::ZeroOrder, 0.9),
            fit(ModelKind::FirstOrder, 0.8),
            fit(ModelKind::Higuchi, 0.9),
        ];
        assert_eq!(select_best(&fits).unwrap().model, ModelKind::ZeroOrder);
    }

    #[test]
    fn ranking_tie_between_zero_order_and_higuchi_keeps_zero_order() {
        // With t in {0, 1}, sqrt(t) == t, so both lines are identical.
        let s = ObservationSeries::new(vec![0.0, 0.0, 1.0, 1.0], vec![-3.0, -1.0, -1.0, 5.0]).unwrap();
        let ranking = rank_models(&s).unwrap();

        let zero = ranking.outcome(ModelKind::ZeroOrder).unwrap().fit().unwrap();
        let higuchi = ranking.outcome(ModelKind::Higuchi).unwrap().fit().unwrap();
        assert_eq!(zero.r_squared, higuchi.r_squared);
        assert!((zero.r_squared - 4.0 / 9.0).abs() < 1e-12);
        assert!(!ranking.outcome(ModelKind::FirstOrder).unwrap().is_available());
        assert!(!ranking.outcome(ModelKind::BakerLonsdale).unwrap().is_available());
        assert_eq!(ranking.best.model, ModelKind::ZeroOrder);
    }

    #[test]
    fn strictly_greater_later_fit_wins() {
        let fits = [fit(ModelKind::ZeroOrder, 0.5), fit(ModelKind::Higuchi, 0.51)];
        assert_eq!(select_best(&fits).unwrap().model, ModelKind::Higuchi);
    }

    #[test]
    fn negative_r_squared_is_tolerated() {
        let fits = [fit(ModelKind::ZeroOrder, -0.2), fit(ModelKind::FirstOrder, -0.1)];
        assert_eq!(select_best(&fits).unwrap().model, ModelKind::FirstOrder);
        assert!(select_best(std::iter::empty()).is_none());
    }
}
