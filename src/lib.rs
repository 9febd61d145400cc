//! `release-kinetics` library crate.
//!
//! Fits drug-release concentration-vs-time data against five linearized
//! kinetic models (Zero-Order, First-Order, Hixson-Crowell, Baker-Lonsdale,
//! Higuchi), ranks them by R², and reconstructs plottable curves.
//!
//! The binary (`kinfit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., notebooks, batch tools)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
