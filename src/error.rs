//! Error types for the forecast-lab library.

use thiserror::Error;

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur while conditioning a series or evaluating models.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient observations for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Two aligned sequences have different lengths.
    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// The operation requires a fully-defined series but undefined values remain.
    #[error("undefined values present in series")]
    UndefinedValues,

    /// A model engine failed to fit a candidate.
    #[error("model fit failed: {0}")]
    FitFailed(String),

    /// Numerical computation error.
    #[error("computation error: {0}")]
    ComputationError(String),
}
