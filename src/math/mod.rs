//! Mathematical utilities: simple least squares.

pub mod ols;

pub use ols::*;
