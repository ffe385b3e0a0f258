//! Error types for report ingestion.

use thiserror::Error;

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while reading the source report and building
/// monthly return tables.
#[derive(Debug, Error)]
pub enum DataError {
    /// Section header not found often enough in the report
    #[error("section header {header:?} found {found} time(s), need at least {required}")]
    SectionNotFound {
        /// Header string that was searched for
        header: String,
        /// Number of occurrences required
        required: usize,
        /// Number of occurrences actually found
        found: usize,
    },

    /// Date field that is not a YYYYMM calendar month
    #[error("invalid month field: {0}")]
    InvalidDate(String),

    /// Same calendar month appears more than once in a table
    #[error("duplicate month in table: {0}")]
    DuplicateMonth(String),

    /// Data parsing error
    #[error("data parsing error: {0}")]
    Parse(String),

    /// Polars error
    #[error("polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
