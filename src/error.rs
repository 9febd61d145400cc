//! Error types.
//!
//! Two layers:
//!
//! - [`FitError`]: typed errors raised by the fitting core. Per-model variants
//!   (`Domain`, `DegenerateFit`) are recovered by the ranking as "unavailable";
//!   run-wide variants (`InvalidInput`, `NoViableModel`) escape to the caller.
//! - [`AppError`]: what the binary reports, carrying a process exit code.

use thiserror::Error;

use crate::domain::ModelKind;

/// Errors raised by transforms, the linear fit evaluator, and the ranking.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    /// Malformed or insufficient observation series.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A model's transform is undefined for the data at `index`.
    #[error("{model}: {reason} at index {index}")]
    Domain {
        model: ModelKind,
        index: usize,
        reason: &'static str,
    },

    /// The regression line is undefined: all x values are identical, or the
    /// coefficients overflow.
    #[error("{model}: degenerate fit (regression line undefined)")]
    DegenerateFit { model: ModelKind },

    /// Every model was unavailable for this data.
    #[error("no viable model: every kinetic model was unavailable for this data")]
    NoViableModel,
}

impl FitError {
    /// Whether this error only disqualifies a single model.
    pub fn is_per_model(&self) -> bool {
        matches!(self, FitError::Domain { .. } | FitError::DegenerateFit { .. })
    }
}

/// Application-level error with an exit code.
///
/// Exit codes:
/// - 2: usage, configuration, or file I/O problems
/// - 3: input data is unusable
/// - 4: no kinetic model could be fitted
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        let exit_code = match err {
            FitError::NoViableModel => 4,
            FitError::InvalidInput(_) | FitError::Domain { .. } | FitError::DegenerateFit { .. } => 3,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
