//! CSV and JSON export of the monthly tables and summary statistics.

use crate::summary::SummaryStatistics;
use polars::prelude::*;
use sloan_data::DataError;
use sloan_data::buckets::{DATE, RETURN_COLUMNS, SPREAD};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),

    /// Ingestion-layer error.
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// Write one monthly return table as CSV: date, the 15 bucket columns and
/// the spread. Missing returns export as empty fields.
pub fn write_returns_csv(df: &DataFrame, path: &Path) -> Result<(), ExportError> {
    let dates = df.column(DATE)?.cast(&DataType::String)?;
    let dates = dates.str()?;

    let mut value_columns = Vec::with_capacity(RETURN_COLUMNS.len() + 1);
    for name in RETURN_COLUMNS.iter().chain(std::iter::once(&SPREAD)) {
        value_columns.push(df.column(name)?.f64()?);
    }

    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec![DATE];
    header.extend(RETURN_COLUMNS);
    header.push(SPREAD);
    writer.write_record(&header)?;

    for i in 0..df.height() {
        let date = dates
            .get(i)
            .ok_or_else(|| DataError::Parse("null month in table".to_string()))?;

        let mut record = Vec::with_capacity(header.len());
        record.push(date.to_string());
        for column in &value_columns {
            record.push(column.get(i).map(|v| v.to_string()).unwrap_or_default());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    log::info!("wrote {} monthly rows to {}", df.height(), path.display());
    Ok(())
}

/// Write summary statistics in the requested format. CSV carries the
/// per-portfolio records; JSON carries the whole structure including the
/// spread t-statistic.
pub fn write_summary(
    summary: &SummaryStatistics,
    format: ExportFormat,
    path: &Path,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_path(path)?;
            for record in &summary.records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }
        ExportFormat::Json => {
            std::fs::write(path, serde_json::to_string(summary)?)?;
        }
        ExportFormat::PrettyJson => {
            std::fs::write(path, serde_json::to_string_pretty(summary)?)?;
        }
    }

    log::info!(
        "wrote {} summary to {}",
        summary.weighting,
        path.display()
    );
    Ok(())
}
