//! Synthetic release-profile generation.
//!
//! A profile is generated from one model's linearized equation: the true line
//! `y = g(c0) - k * x(t)` is evaluated on an even time grid, mapped back to
//! concentration, and perturbed with seeded multiplicative Gaussian noise:
//!
//! `c_obs = c_true * exp(noise * z)`, `z ~ N(0, 1)`
//!
//! Multiplicative noise keeps the sign of every sample, so a profile that is
//! valid for its generating model stays valid after noise is added.

use std::fs::File;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::domain::{ModelKind, ObservationSeries};
use crate::error::AppError;
use crate::fit::lin_space;
use crate::models::{invert_y, regression_x, regression_y};

/// Parameters for a synthetic profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSpec {
    pub model: ModelKind,
    /// Concentration at `t = 0`.
    pub c0: f64,
    /// Release rate constant `k`.
    pub rate: f64,
    pub t_max: f64,
    pub points: usize,
    /// Relative noise level (standard deviation of the log-scale perturbation).
    pub noise: f64,
    pub seed: u64,
}

/// Generate a synthetic observation series.
pub fn simulate(spec: &SimulationSpec) -> Result<ObservationSeries, AppError> {
    if !(spec.c0.is_finite() && spec.c0 > 0.0) {
        return Err(AppError::new(2, "Initial concentration must be finite and > 0."));
    }
    if !spec.rate.is_finite() {
        return Err(AppError::new(2, "Rate constant must be finite."));
    }
    if !(spec.noise.is_finite() && spec.noise >= 0.0) {
        return Err(AppError::new(2, "Noise level must be finite and >= 0."));
    }

    let time = lin_space(0.0, spec.t_max, spec.points)
        .map_err(|e| AppError::new(2, format!("Invalid sampling schedule: {e}")))?;

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(2, format!("Noise distribution error: {e}")))?;

    let y0 = regression_y(spec.model, spec.c0)
        .map_err(|reason| AppError::new(2, format!("Initial concentration invalid for {}: {reason}.", spec.model)))?;

    let mut concentration = Vec::with_capacity(time.len());
    for &t in &time {
        let x = regression_x(spec.model, t)
            .map_err(|reason| AppError::new(2, format!("Simulation time invalid: {reason}.")))?;
        let c_true = invert_y(spec.model, y0 - spec.rate * x);
        let z: f64 = normal.sample(&mut rng);
        concentration.push(c_true * (spec.noise * z).exp());
    }

    Ok(ObservationSeries::new(time, concentration)?)
}

/// Write a series as a two-column `time,concentration` CSV.
pub fn write_series_csv(path: &Path, series: &ObservationSeries) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create CSV '{}': {e}", path.display())))?;
    write_series(file, series)
}

fn write_series<W: std::io::Write>(out: W, series: &ObservationSeries) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(["time", "concentration"])
        .map_err(|e| AppError::new(2, format!("Failed to write CSV header: {e}")))?;
    for p in series.points() {
        writer
            .write_record([p.time.to_string(), p.concentration.to_string()])
            .map_err(|e| AppError::new(2, format!("Failed to write CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush CSV: {e}")))?;
    Ok(())
}
