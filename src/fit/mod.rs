//! Model fitting orchestration.
//!
//! Responsibilities:
//!
//! - fit a single model in its linearized space (`fitter`)
//! - fit all models and pick the best by R² (`selection`)
//! - rebuild plottable curves on a synthetic time grid (`grid`, `reconstruct`)

pub mod fitter;
pub mod grid;
pub mod reconstruct;
pub mod selection;

pub use fitter::*;
pub use grid::*;
pub use reconstruct::*;
pub use selection::*;
