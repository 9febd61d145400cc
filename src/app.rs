//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads observations and runs the model fits + ranking
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing::info;

use crate::cli::{Command, FitArgs, PlotArgs, SimulateArgs};
use crate::data::{SimulationSpec, simulate, write_series_csv};
use crate::domain::FitConfig;
use crate::error::AppError;
use crate::plot::MIN_SVG_SIZE;

pub mod pipeline;

/// Entry point for the `kinfit` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args, OutputMode::Full),
        Command::Rank(args) => handle_fit(args, OutputMode::RankOnly),
        Command::Plot(args) => handle_plot(args),
        Command::Simulate(args) => handle_simulate(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    RankOnly,
}

fn handle_fit(args: FitArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = fit_config_from_args(&args)?;
    let run = pipeline::run_fit(&config)?;

    match mode {
        OutputMode::Full => {
            println!("{}", crate::report::format_run_summary(&run.ingest, &run.ranking));
        }
        OutputMode::RankOnly => {
            print!("{}", crate::report::format_ranking_only(&run.ranking));
        }
    }

    let observations = run.ingest.series.points();
    if mode == OutputMode::Full && config.plot {
        let plot = crate::plot::render_ascii_plot(
            &observations,
            &run.curves,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    // Optional outputs.
    if let Some(path) = &config.svg {
        crate::plot::render_svg(path, &observations, &run.curves, (config.svg_width, config.svg_height))?;
        info!(path = %path.display(), "wrote SVG chart");
    }
    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.ranking)?;
        info!(path = %path.display(), "wrote results CSV");
    }
    if let Some(path) = &config.export_curve {
        let curve = crate::io::curve::build_curve_file(&run.ingest.series, &run.ranking, &run.curves);
        crate::io::curve::write_curve_json(path, &curve)?;
        info!(path = %path.display(), "wrote curve JSON");
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::curve::read_curve_json(&args.curve)?;

    let plot = crate::plot::render_ascii_plot_from_curve_file(&curve, args.width, args.height);
    println!("{plot}");

    if let Some(path) = &args.svg {
        crate::plot::render_svg(path, &curve.observations, &curve.curves, (1200, 800))?;
        info!(path = %path.display(), "wrote SVG chart");
    }
    Ok(())
}

fn handle_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let spec = SimulationSpec {
        model: args.model,
        c0: args.c0,
        rate: args.rate,
        t_max: args.t_max,
        points: args.points,
        noise: args.noise,
        seed: args.seed,
    };
    let series = simulate(&spec)?;
    write_series_csv(&args.output, &series)?;
    info!(path = %args.output.display(), model = args.model.slug(), "wrote synthetic profile");
    Ok(())
}

/// Validate CLI flags and convert them into a pipeline configuration.
pub fn fit_config_from_args(args: &FitArgs) -> Result<FitConfig, AppError> {
    if args.grid_points < 2 {
        return Err(AppError::new(2, "--grid-points must be >= 2."));
    }
    if args.svg.is_some() && (args.svg_width < MIN_SVG_SIZE || args.svg_height < MIN_SVG_SIZE) {
        return Err(AppError::new(
            2,
            format!("SVG size must be at least {MIN_SVG_SIZE}x{MIN_SVG_SIZE} pixels."),
        ));
    }

    Ok(FitConfig {
        csv_path: args.input.clone(),
        time_column: args.time_column.clone(),
        concentration_column: args.conc_column.clone(),
        grid_points: args.grid_points,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        svg: args.svg.clone(),
        svg_width: args.svg_width,
        svg_height: args.svg_height,
        export_results: args.export.clone(),
        export_curve: args.export_curve.clone(),
    })
}
