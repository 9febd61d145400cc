//! Export per-model results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts:
//! one row per model, in priority order, unavailable models included.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::fit::Ranking;
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    model: &'a str,
    available: bool,
    slope: Option<f64>,
    intercept: Option<f64>,
    rate_constant: Option<f64>,
    r_squared: Option<f64>,
    best: bool,
    reason: Option<String>,
}

/// Write per-model results to a CSV file.
pub fn write_results_csv(path: &Path, ranking: &Ranking) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results(file, ranking)
}

fn write_results<W: std::io::Write>(out: W, ranking: &Ranking) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);

    for outcome in &ranking.outcomes {
        let fit = outcome.fit();
        writer
            .serialize(ResultRow {
                model: outcome.model.slug(),
                available: fit.is_some(),
                slope: fit.map(|f| f.slope),
                intercept: fit.map(|f| f.intercept),
                rate_constant: fit.map(|f| f.rate_constant()),
                r_squared: fit.map(|f| f.r_squared),
                best: outcome.model == ranking.best.model,
                reason: outcome.unavailable_reason(),
            })
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}
