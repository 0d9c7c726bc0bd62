use thiserror::Error;

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

/// Failures that make a prediction table unusable for the report.
///
/// These are wrapped in `anyhow::Error` with file/row context on the way up.
#[derive(Debug, Error, PartialEq)]
pub enum ReportError {
    #[error("missing '{0}' column")]
    MissingColumn(&'static str),

    #[error("row {row}, column '{column}': '{value}' is not a finite number")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: actual - predicted is not a finite number")]
    NonFiniteResidual { row: usize },

    #[error("dataset contains no records")]
    EmptyDataset,

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}
