//! Shared "fit pipeline" logic used by the `fit` and `rank` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV ingest -> per-model fits -> ranking -> reconstructed curves
//!
//! The commands can then focus on presentation (report, plots, exports).

use tracing::info;

use crate::domain::{CurveSeries, FitConfig, ObservationSeries};
use crate::error::AppError;
use crate::fit::{Ranking, rank_models, reconstruct_all, time_grid};
use crate::io::ingest::{IngestedData, load_observations};
use crate::report::describe_series;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub ranking: Ranking,
    pub curves: Vec<CurveSeries>,
}

/// Load the configured CSV and run the full analysis.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let ingest = load_observations(config)?;
    info!(
        path = %config.csv_path.display(),
        "loaded observations: {}",
        describe_series(&ingest.series)
    );
    run_fit_with_data(config, ingest)
}

/// Run the analysis on already-ingested data.
pub fn run_fit_with_data(config: &FitConfig, ingest: IngestedData) -> Result<RunOutput, AppError> {
    let (ranking, curves) = analyze(&ingest.series, config.grid_points)?;
    Ok(RunOutput {
        ingest,
        ranking,
        curves,
    })
}

/// Rank all models and reconstruct curves for the available ones.
pub fn analyze(series: &ObservationSeries, grid_points: usize) -> Result<(Ranking, Vec<CurveSeries>), AppError> {
    let ranking = rank_models(series)?;
    let grid = time_grid(series.max_time(), grid_points)?;
    let curves = reconstruct_all(&ranking, &grid)?;
    Ok((ranking, curves))
}
