//! Shared domain types.
//!
//! These types are value objects scoped to a single analysis run. The ones that
//! leave the process (fit results, curve files) are serializable so they can be:
//!
//! - used in-memory during fitting and ranking
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// The five linearized release-kinetics models.
///
/// Declaration order is the tie-break priority order used by the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    ZeroOrder,
    FirstOrder,
    HixsonCrowell,
    BakerLonsdale,
    Higuchi,
}

impl ModelKind {
    /// All models in priority order.
    pub const ALL: [ModelKind; 5] = [
        ModelKind::ZeroOrder,
        ModelKind::FirstOrder,
        ModelKind::HixsonCrowell,
        ModelKind::BakerLonsdale,
        ModelKind::Higuchi,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::ZeroOrder => "Zero-Order",
            ModelKind::FirstOrder => "First-Order",
            ModelKind::HixsonCrowell => "Hixson-Crowell",
            ModelKind::BakerLonsdale => "Baker-Lonsdale",
            ModelKind::Higuchi => "Higuchi",
        }
    }

    /// Stable machine name, used in CSV exports.
    pub fn slug(self) -> &'static str {
        match self {
            ModelKind::ZeroOrder => "zero-order",
            ModelKind::FirstOrder => "first-order",
            ModelKind::HixsonCrowell => "hixson-crowell",
            ModelKind::BakerLonsdale => "baker-lonsdale",
            ModelKind::Higuchi => "higuchi",
        }
    }

    /// Character used for this model's curve in the ASCII plot.
    pub fn glyph(self) -> char {
        match self {
            ModelKind::ZeroOrder => '0',
            ModelKind::FirstOrder => '1',
            ModelKind::HixsonCrowell => 'h',
            ModelKind::BakerLonsdale => 'b',
            ModelKind::Higuchi => 'g',
        }
    }

    /// Linearized equation, for report headers.
    pub fn equation(self) -> &'static str {
        match self {
            ModelKind::ZeroOrder => "C = C0 - k*t",
            ModelKind::FirstOrder => "ln(C) = ln(C0) - k*t",
            ModelKind::HixsonCrowell => "C^(1/3) = C0^(1/3) - k*t",
            ModelKind::BakerLonsdale => "sqrt(C) = sqrt(C0) - k*sqrt(t)",
            ModelKind::Higuchi => "C = C0 - k*sqrt(t)",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A single (time, concentration) sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationPoint {
    pub time: f64,
    pub concentration: f64,
}

/// Validated concentration-vs-time samples, in acquisition order.
///
/// Invariants: both sequences have the same length, at least two samples,
/// every value is finite, and every time is non-negative. Time is not required
/// to be sorted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationSeries {
    time: Vec<f64>,
    concentration: Vec<f64>,
}

impl ObservationSeries {
    /// Minimum number of samples a linear fit can use.
    pub const MIN_POINTS: usize = 2;

    pub fn new(time: Vec<f64>, concentration: Vec<f64>) -> Result<Self, FitError> {
        if time.len() != concentration.len() {
            return Err(FitError::InvalidInput(format!(
                "time and concentration lengths differ ({} vs {})",
                time.len(),
                concentration.len()
            )));
        }
        if time.len() < Self::MIN_POINTS {
            return Err(FitError::InvalidInput(format!(
                "need at least {} observations, got {}",
                Self::MIN_POINTS,
                time.len()
            )));
        }
        if let Some(idx) = time.iter().position(|v| !v.is_finite()) {
            return Err(FitError::InvalidInput(format!("non-finite time at index {idx}")));
        }
        if let Some(idx) = concentration.iter().position(|v| !v.is_finite()) {
            return Err(FitError::InvalidInput(format!(
                "non-finite concentration at index {idx}"
            )));
        }
        if let Some(idx) = time.iter().position(|&v| v < 0.0) {
            return Err(FitError::InvalidInput(format!(
                "negative time {} at index {idx} (sampling times start at 0)",
                time[idx]
            )));
        }
        Ok(Self { time, concentration })
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn concentration(&self) -> &[f64] {
        &self.concentration
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Always false for a constructed series; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn points(&self) -> Vec<ObservationPoint> {
        self.time
            .iter()
            .zip(&self.concentration)
            .map(|(&time, &concentration)| ObservationPoint { time, concentration })
            .collect()
    }

    pub fn max_time(&self) -> f64 {
        self.time.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn stats(&self) -> DatasetStats {
        let (time_min, time_max) = min_max(&self.time);
        let (conc_min, conc_max) = min_max(&self.concentration);
        DatasetStats {
            n_points: self.len(),
            time_min,
            time_max,
            conc_min,
            conc_max,
        }
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Summary stats about the observations used for fitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub n_points: usize,
    pub time_min: f64,
    pub time_max: f64,
    pub conc_min: f64,
    pub conc_max: f64,
}

/// Least-squares fit of one model in its linearized space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub model: ModelKind,
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination. Can be negative; callers must tolerate it.
    pub r_squared: f64,
    pub n: usize,
}

impl FitResult {
    /// Release rate constant `k` in the model equation (`-slope`).
    pub fn rate_constant(&self) -> f64 {
        -self.slope
    }

    /// Fitted line in transformed space: `intercept + slope * x`.
    pub fn linear_prediction(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Whether a model could be fitted for this run.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelStatus {
    Fitted(FitResult),
    Unavailable(FitError),
}

/// The result of attempting one model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOutcome {
    pub model: ModelKind,
    pub status: ModelStatus,
}

impl ModelOutcome {
    pub fn fit(&self) -> Option<&FitResult> {
        match &self.status {
            ModelStatus::Fitted(fit) => Some(fit),
            ModelStatus::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.fit().is_some()
    }

    pub fn unavailable_reason(&self) -> Option<String> {
        match &self.status {
            ModelStatus::Fitted(_) => None,
            ModelStatus::Unavailable(err) => Some(err.to_string()),
        }
    }
}

/// A model's curve reconstructed over the synthetic time grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSeries {
    pub model: ModelKind,
    pub time: Vec<f64>,
    pub concentration: Vec<f64>,
}

impl CurveSeries {
    pub fn pairs(&self) -> Vec<(f64, f64)> {
        self.time.iter().copied().zip(self.concentration.iter().copied()).collect()
    }
}

/// Per-model entry of the curve JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub model: ModelKind,
    pub display_name: String,
    pub fit: Option<FitResult>,
    pub unavailable_reason: Option<String>,
}

/// Portable representation of a run, written by `kinfit fit --export-curve`
/// and read by `kinfit plot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub observations: Vec<ObservationPoint>,
    pub models: Vec<ModelEntry>,
    pub best: ModelKind,
    pub curves: Vec<CurveSeries>,
}

/// Selects a CSV column by zero-based index or by header name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    Index(usize),
    Name(String),
}

impl FromStr for ColumnSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("column selector must not be empty".to_string());
        }
        Ok(match s.parse::<usize>() {
            Ok(idx) => ColumnSelector::Index(idx),
            Err(_) => ColumnSelector::Name(s.to_string()),
        })
    }
}

impl fmt::Display for ColumnSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSelector::Index(idx) => write!(f, "#{idx}"),
            ColumnSelector::Name(name) => write!(f, "'{name}'"),
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub csv_path: PathBuf,
    pub time_column: ColumnSelector,
    pub concentration_column: ColumnSelector,
    /// Number of points in the reconstruction grid over `[0, max(time)]`.
    pub grid_points: usize,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub svg: Option<PathBuf>,
    pub svg_width: u32,
    pub svg_height: u32,

    pub export_results: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,
}
