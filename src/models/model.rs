//! Linearizing transforms for the five release-kinetics models.
//!
//! Each model is fitted as a straight line `y = intercept + slope * x` where
//! `x` is a transform of time and `y` a transform of concentration:
//!
//! | model          | x     | y        | inverse of y |
//! |----------------|-------|----------|--------------|
//! | Zero-Order     | `t`   | `C`      | `y`          |
//! | First-Order    | `t`   | `ln C`   | `exp y`      |
//! | Hixson-Crowell | `t`   | `∛C`     | `y³`         |
//! | Baker-Lonsdale | `√t`  | `√C`     | `y²`         |
//! | Higuchi        | `√t`  | `C`      | `y`          |
//!
//! Reconstruction always goes through the fitted line and then the inverse of
//! the y transform, so a reconstructed curve lies on the least-squares line in
//! transformed space.

use crate::domain::{ModelKind, ObservationSeries};
use crate::error::FitError;

const NEGATIVE_TIME: &str = "negative time";
const NON_POSITIVE_CONCENTRATION: &str = "non-positive concentration";
const NEGATIVE_CONCENTRATION: &str = "negative concentration";

/// Observations mapped into a model's regression space.
#[derive(Debug, Clone, PartialEq)]
pub struct Linearized {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// Regression x for time `t`.
pub fn regression_x(model: ModelKind, t: f64) -> Result<f64, &'static str> {
    match model {
        ModelKind::ZeroOrder | ModelKind::FirstOrder | ModelKind::HixsonCrowell => Ok(t),
        ModelKind::BakerLonsdale | ModelKind::Higuchi => {
            if t < 0.0 {
                Err(NEGATIVE_TIME)
            } else {
                Ok(t.sqrt())
            }
        }
    }
}

/// Regression y for concentration `c`.
pub fn regression_y(model: ModelKind, c: f64) -> Result<f64, &'static str> {
    match model {
        ModelKind::ZeroOrder | ModelKind::Higuchi => Ok(c),
        ModelKind::FirstOrder => {
            if c <= 0.0 {
                Err(NON_POSITIVE_CONCENTRATION)
            } else {
                Ok(c.ln())
            }
        }
        // `cbrt` is the real (signed) cube root, defined for negative values.
        ModelKind::HixsonCrowell => Ok(c.cbrt()),
        ModelKind::BakerLonsdale => {
            if c < 0.0 {
                Err(NEGATIVE_CONCENTRATION)
            } else {
                Ok(c.sqrt())
            }
        }
    }
}

/// Map a regression-space y back to concentration.
pub fn invert_y(model: ModelKind, y: f64) -> f64 {
    match model {
        ModelKind::ZeroOrder | ModelKind::Higuchi => y,
        ModelKind::FirstOrder => y.exp(),
        ModelKind::HixsonCrowell => y * y * y,
        ModelKind::BakerLonsdale => y * y,
    }
}

/// Apply a model's forward transform to a whole series.
///
/// Fails on the first index whose time or concentration lies outside the
/// model's domain. Time is checked before concentration at each index.
pub fn forward_transform(model: ModelKind, series: &ObservationSeries) -> Result<Linearized, FitError> {
    let n = series.len();
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);

    for (index, (&t, &c)) in series.time().iter().zip(series.concentration()).enumerate() {
        let domain = |reason| FitError::Domain { model, index, reason };
        x.push(regression_x(model, t).map_err(domain)?);
        y.push(regression_y(model, c).map_err(domain)?);
    }

    Ok(Linearized { x, y })
}

/// Predict concentration at time `t` from a fitted line.
///
/// Returns `None` when `t` is outside the model's time domain.
pub fn predict(model: ModelKind, t: f64, slope: f64, intercept: f64) -> Option<f64> {
    let x = regression_x(model, t).ok()?;
    Some(invert_y(model, intercept + slope * x))
}
