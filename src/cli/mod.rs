//! Command-line parsing for the release-kinetics model fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{ColumnSelector, ModelKind};
use crate::fit::DEFAULT_GRID_POINTS;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "kinfit", version, about = "Drug-release kinetics model fitter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit all five kinetic models, print diagnostics, and optionally plot/export.
    Fit(FitArgs),
    /// Print per-model R² and the best model only (useful for scripting).
    Rank(FitArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
    /// Generate a synthetic release profile CSV from one model.
    Simulate(SimulateArgs),
}

/// Common options for fitting and ranking.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Input CSV with a header row.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Time column: zero-based index or header name.
    #[arg(short = 't', long, default_value = "0")]
    pub time_column: ColumnSelector,

    /// Concentration column: zero-based index or header name.
    #[arg(short = 'c', long, default_value = "1")]
    pub conc_column: ColumnSelector,

    /// Number of points in the reconstructed-curve time grid.
    #[arg(long, default_value_t = DEFAULT_GRID_POINTS)]
    pub grid_points: usize,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Write an SVG chart of the data and all fitted curves.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,

    /// SVG width (pixels).
    #[arg(long, default_value_t = 1200)]
    pub svg_width: u32,

    /// SVG height (pixels).
    #[arg(long, default_value_t = 800)]
    pub svg_height: u32,

    /// Export per-model results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export observations, fits, and reconstructed curves to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,
}

/// Options for plotting a saved curve.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Curve JSON file produced by `kinfit fit --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Also write an SVG chart.
    #[arg(long, value_name = "SVG")]
    pub svg: Option<PathBuf>,
}

/// Options for synthetic profile generation.
#[derive(Debug, Parser)]
pub struct SimulateArgs {
    /// Generating model.
    #[arg(short = 'm', long, value_enum, default_value_t = ModelKind::FirstOrder)]
    pub model: ModelKind,

    /// Concentration at t = 0.
    #[arg(long, default_value_t = 100.0)]
    pub c0: f64,

    /// Release rate constant k.
    #[arg(short = 'k', long, default_value_t = 0.2)]
    pub rate: f64,

    /// Last sampling time.
    #[arg(long, default_value_t = 10.0)]
    pub t_max: f64,

    /// Number of samples.
    #[arg(short = 'n', long, default_value_t = 11)]
    pub points: usize,

    /// Relative noise level (log-scale standard deviation).
    #[arg(long, default_value_t = 0.02)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output CSV path.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub output: PathBuf,
}
