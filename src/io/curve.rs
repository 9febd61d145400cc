//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a run:
//! - the observations used for fitting
//! - every model's fit (or why it was unavailable)
//! - reconstructed curves on the synthetic time grid, for quick plotting
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{CurveFile, CurveSeries, ModelEntry, ObservationSeries};
use crate::error::AppError;
use crate::fit::Ranking;

/// Assemble the curve file contents for a run.
pub fn build_curve_file(series: &ObservationSeries, ranking: &Ranking, curves: &[CurveSeries]) -> CurveFile {
    let models = ranking
        .outcomes
        .iter()
        .map(|o| ModelEntry {
            model: o.model,
            display_name: o.model.display_name().to_string(),
            fit: o.fit().copied(),
            unavailable_reason: o.unavailable_reason(),
        })
        .collect();

    CurveFile {
        tool: "kinfit".to_string(),
        generated_at: Utc::now(),
        observations: series.points(),
        models,
        best: ranking.best.model,
        curves: curves.to_vec(),
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, curve: &CurveFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, curve)
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModelKind;
    use crate::fit::{rank_models, reconstruct_all, time_grid};

    #[test]
    fn curve_file_lists_all_models_and_available_curves() {
        let s = ObservationSeries::new(vec![0.0, 1.0, 2.0, 3.0], vec![9.0, 6.0, 3.0, 0.0]).unwrap();
        let ranking = rank_models(&s).unwrap();
        let grid = time_grid(s.max_time(), 10).unwrap();
        let curves = reconstruct_all(&ranking, &grid).unwrap();

        let file = build_curve_file(&s, &ranking, &curves);
        assert_eq!(file.models.len(), 5);
        assert_eq!(file.best, ModelKind::ZeroOrder);
        assert_eq!(file.observations.len(), 4);
        assert_eq!(file.curves.len(), 4);

        let first = &file.models[1];
        assert!(first.fit.is_none());
        assert!(first.unavailable_reason.is_some());

        let json = serde_json::to_string(&file).unwrap();
        assert!(json.contains("\"best\":\"zero-order\""));
        let back: CurveFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.best, file.best);
        assert_eq!(back.generated_at, file.generated_at);
        assert_eq!(back.curves.len(), 4);
        assert_eq!(back.observations, file.observations);
    }
}
