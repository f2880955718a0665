//! Error types for the sales_insight crate

use thiserror::Error;

/// Custom error types for the sales_insight crate
#[derive(Debug, Error)]
pub enum InsightError {
    /// Fewer than two valid paired observations, or zero variance,
    /// so a correlation or fit is undefined
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The baseline sales level is zero or not finite, so relative
    /// deviations from it are meaningless
    #[error("Degenerate baseline: {0}")]
    DegenerateBaseline(String),

    /// Future points are not strictly increasing in date
    #[error("Invalid sequence: {0}")]
    InvalidSequence(String),

    /// Percent change requested against a zero previous value
    #[error("Undefined change: {0}")]
    UndefinedChange(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, InsightError>;
