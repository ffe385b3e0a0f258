//! Typed monthly return frames.
//!
//! Converts raw report rows into a Polars frame with one row per calendar
//! month: a `Date` column, the 15 portfolio return columns as fractional
//! returns, and the derived `Spread` column. Non-numeric return fields
//! become nulls; the percent-to-fraction rescaling and the spread are
//! applied in a single lazy pass.

use crate::buckets::{DATE, HI10, LO10, RETURN_COLUMNS, SPREAD};
use crate::error::{DataError, Result};
use crate::report::RawRow;
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::HashSet;

/// Parse a `YYYYMM` month field into the first day of that month.
pub fn parse_month(field: &str) -> Result<NaiveDate> {
    if field.len() != 6 || !field.is_ascii() {
        return Err(DataError::InvalidDate(field.to_string()));
    }
    let year: i32 = field[..4]
        .parse()
        .map_err(|_| DataError::InvalidDate(field.to_string()))?;
    let month: u32 = field[4..]
        .parse()
        .map_err(|_| DataError::InvalidDate(field.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| DataError::InvalidDate(field.to_string()))
}

/// Build the monthly table for one weighting scheme.
///
/// Return fields that fail to parse as numbers are stored as nulls and
/// excluded from every downstream statistic; the spread is null whenever
/// either leg is null.
///
/// # Errors
///
/// Fails on an unparseable month field or a duplicated calendar month.
pub fn build_returns_frame(rows: &[RawRow]) -> Result<DataFrame> {
    let mut seen = HashSet::with_capacity(rows.len());
    let mut dates = Vec::with_capacity(rows.len());
    for row in rows {
        let date = parse_month(&row.month)?;
        if !seen.insert(date) {
            return Err(DataError::DuplicateMonth(row.month.clone()));
        }
        dates.push(date.format("%Y-%m-%d").to_string());
    }

    let mut columns: Vec<Column> = Vec::with_capacity(1 + RETURN_COLUMNS.len());
    columns.push(Series::new(DATE.into(), dates).into());

    for (idx, name) in RETURN_COLUMNS.iter().enumerate() {
        let values: Vec<Option<f64>> = rows
            .iter()
            .map(|row| row.returns.get(idx).and_then(|s| s.parse::<f64>().ok()))
            .collect();
        columns.push(Series::new((*name).into(), values).into());
    }

    let df = DataFrame::new(columns)?;

    // Percentage points -> fractional returns, then the long-short spread.
    let rescaled: Vec<Expr> = RETURN_COLUMNS
        .iter()
        .map(|name| (col(*name) / lit(100.0)).alias(*name))
        .collect();

    let df = df
        .lazy()
        .with_column(col(DATE).cast(DataType::Date))
        .with_columns(rescaled)
        .with_column((col(HI10) - col(LO10)).alias(SPREAD))
        .sort([DATE], Default::default())
        .collect()?;

    Ok(df)
}

/// The frame's calendar months in row order.
pub fn month_dates(df: &DataFrame) -> Result<Vec<NaiveDate>> {
    let dates = df.column(DATE)?.cast(&DataType::String)?;
    let dates = dates.str()?;

    (0..dates.len())
        .map(|i| {
            let s = dates
                .get(i)
                .ok_or_else(|| DataError::Parse("null month in table".to_string()))?;
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|e| DataError::InvalidDate(format!("{s}: {e}")))
        })
        .collect()
}

/// A return column as `f64` values with nulls mapped to NaN, in row order.
pub fn column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let values = df.column(name)?.f64()?;
    Ok(values
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

/// Restrict a frame to the rows flagged `true` in `keep`.
///
/// # Errors
///
/// Fails when `keep` does not match the frame height.
pub fn filter_rows(df: &DataFrame, keep: &[bool]) -> Result<DataFrame> {
    if keep.len() != df.height() {
        return Err(DataError::Parse(format!(
            "mask length {} does not match table height {}",
            keep.len(),
            df.height()
        )));
    }
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    Ok(df.filter(&mask)?)
}
