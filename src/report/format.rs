//! Terminal report formatting.

use crate::domain::{ModelStatus, ObservationSeries};
use crate::fit::Ranking;
use crate::io::ingest::IngestedData;

/// Format the full run summary (dataset stats + per-model fits + chosen model).
pub fn format_run_summary(ingest: &IngestedData, ranking: &Ranking) -> String {
    let mut out = String::new();

    out.push_str("=== kinfit - Release Kinetics Model Fit ===\n");
    out.push_str(&format!(
        "Columns: time='{}' | concentration='{}'\n",
        ingest.time_label, ingest.concentration_label
    ));
    out.push_str(&format!(
        "Rows: read={} | used={} | skipped={}\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len()
    ));
    for err in &ingest.row_errors {
        out.push_str(&format!("  (line {}) {}\n", err.line, err.message));
    }
    out.push_str(&format!(
        "Points: n={} | time=[{:.3}, {:.3}] | conc=[{:.3}, {:.3}]\n",
        ingest.stats.n_points,
        ingest.stats.time_min,
        ingest.stats.time_max,
        ingest.stats.conc_min,
        ingest.stats.conc_max
    ));

    out.push_str("\nModel diagnostics:\n");
    out.push_str(&format_model_table(ranking));
    out.push('\n');
    out.push_str(&format_best_line(ranking));
    out.push('\n');

    out
}

/// Compact per-model listing (used by `kinfit rank`).
pub fn format_ranking_only(ranking: &Ranking) -> String {
    let mut out = String::new();
    for outcome in &ranking.outcomes {
        match &outcome.status {
            ModelStatus::Fitted(fit) => {
                out.push_str(&format!("{:<16} {:.4}\n", outcome.model.display_name(), fit.r_squared));
            }
            ModelStatus::Unavailable(err) => {
                out.push_str(&format!("{:<16} unavailable: {err}\n", outcome.model.display_name()));
            }
        }
    }
    out.push_str(&format_best_line(ranking));
    out.push('\n');
    out
}

/// Per-model table: slope, intercept, rate constant, R² (or why it is unavailable).
pub fn format_model_table(ranking: &Ranking) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "  {:<16} {:>14} {:>14} {:>14} {:>8}  {}\n",
            "model", "slope", "intercept", "k", "R²", "linear form"
        )
        .as_str(),
    );

    for outcome in &ranking.outcomes {
        let chosen = if outcome.model == ranking.best.model { "*" } else { " " };
        let line = match &outcome.status {
            ModelStatus::Fitted(fit) => format!(
                "{chosen} {:<16} {:>14.6} {:>14.6} {:>14.6} {:>8.4}  {}",
                outcome.model.display_name(),
                fit.slope,
                fit.intercept,
                fit.rate_constant(),
                fit.r_squared,
                outcome.model.equation(),
            ),
            ModelStatus::Unavailable(err) => format!(
                "{chosen} {:<16} unavailable: {err}",
                outcome.model.display_name()
            ),
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// The single best-model line.
pub fn format_best_line(ranking: &Ranking) -> String {
    format!(
        "Best model: {} (R² = {:.4})",
        ranking.best.model.display_name(),
        ranking.best.r_squared
    )
}

/// One-line description of an observation series (used in log output).
pub fn describe_series(series: &ObservationSeries) -> String {
    let stats = series.stats();
    format!(
        "n={} time=[{:.3}, {:.3}] conc=[{:.3}, {:.3}]",
        stats.n_points, stats.time_min, stats.time_max, stats.conc_min, stats.conc_max
    )
}
