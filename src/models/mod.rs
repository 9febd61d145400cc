//! Release-kinetics model transforms.
//!
//! Models are implemented as small, pure functions keyed by `ModelKind` so that
//! fitting and reconstruction code can stay generic.

pub mod model;

pub use model::*;
