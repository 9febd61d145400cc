//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the kinetic model descriptor (`ModelKind`)
//! - validated observations (`ObservationSeries`)
//! - fit outputs (`FitResult`, `ModelOutcome`, `CurveFile`, etc.)
//! - run configuration (`FitConfig`)

pub mod types;

pub use types::*;
