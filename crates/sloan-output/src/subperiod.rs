//! Decade and recession/expansion sub-period breakdowns.
//!
//! The sample is restricted to months from 1960 on, then bucketed two
//! independent ways: by decade and by NBER recession membership. Decade
//! buckets partition the filtered range; recession/expansion is a second,
//! overlapping partition of the same months.

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use serde::Serialize;
use sloan_data::Result;
use sloan_data::buckets::{HI10, LO10, SPREAD, Weighting};
use sloan_data::frame::{column_values, filter_rows, month_dates};
use sloan_data::periods::{self, Decade};
use sloan_stats as stats;
use std::fmt;

/// Restrict a monthly frame to months on or after `start`.
pub fn filter_from(df: &DataFrame, start: NaiveDate) -> Result<DataFrame> {
    let keep: Vec<bool> = month_dates(df)?.iter().map(|d| *d >= start).collect();
    filter_rows(df, &keep)
}

/// Aggregates for one sub-period bucket.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubPeriodRow {
    /// Bucket label (`"1960s"` .. `"2010s"`, `"Recessions"`, `"Expansions"`).
    pub period: String,

    /// Annualized mean return of the low-accrual decile.
    pub lo10: f64,

    /// Annualized mean return of the high-accrual decile.
    pub hi10: f64,

    /// Annualized mean return of the spread.
    pub spread: f64,

    /// Raw (monthly) one-sample t-statistic of the spread in this bucket.
    pub spread_t_stat: f64,

    /// Months in the bucket.
    pub months: usize,
}

/// Sub-period breakdown for one weighting scheme: six decades followed by
/// the recession and expansion buckets.
#[derive(Debug, Clone, Serialize)]
pub struct SubPeriodReport {
    /// Weighting scheme the breakdown describes.
    pub weighting: Weighting,

    /// One row per bucket, decades first.
    pub rows: Vec<SubPeriodRow>,
}

impl SubPeriodReport {
    /// Compute the breakdown over a monthly return frame. The frame is
    /// filtered to the post-1960 sample internally.
    pub fn compute(df: &DataFrame, weighting: Weighting) -> Result<Self> {
        let df = filter_from(df, periods::subperiod_start())?;
        let dates = month_dates(&df)?;
        let lo10 = column_values(&df, LO10)?;
        let hi10 = column_values(&df, HI10)?;
        let spread = column_values(&df, SPREAD)?;

        let mut rows = Vec::with_capacity(Decade::ALL.len() + 2);

        for decade in Decade::ALL {
            let window = decade.window();
            let mask: Vec<bool> = dates.iter().map(|d| window.contains(*d)).collect();
            rows.push(bucket_row(decade.label(), &mask, &lo10, &hi10, &spread));
        }

        let recession: Vec<bool> = dates.iter().map(|d| periods::is_recession(*d)).collect();
        let expansion: Vec<bool> = recession.iter().map(|r| !r).collect();
        rows.push(bucket_row("Recessions", &recession, &lo10, &hi10, &spread));
        rows.push(bucket_row("Expansions", &expansion, &lo10, &hi10, &spread));

        Ok(Self { weighting, rows })
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{} Sub-Period Analysis\n", self.weighting));
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<12} {:>8} {:>12} {:>12} {:>12} {:>14}\n",
            "Period", "Months", "Lo10", "Hi10", "Spread", "t(Spread)"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<12} {:>8} {:>11.2}% {:>11.2}% {:>11.2}% {:>14.3}\n",
                row.period,
                row.months,
                row.lo10 * 100.0,
                row.hi10 * 100.0,
                row.spread * 100.0,
                row.spread_t_stat,
            ));
        }

        output.push_str(&"=".repeat(80));
        output.push('\n');

        output
    }
}

impl fmt::Display for SubPeriodReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii_table())
    }
}

fn bucket_row(
    label: &str,
    mask: &[bool],
    lo10: &[f64],
    hi10: &[f64],
    spread: &[f64],
) -> SubPeriodRow {
    let select = |values: &[f64]| -> Vec<f64> {
        mask.iter()
            .zip(values)
            .filter_map(|(keep, v)| keep.then_some(*v))
            .collect()
    };

    let bucket_spread = select(spread);
    SubPeriodRow {
        period: label.to_string(),
        lo10: stats::annualized_mean(&select(lo10)),
        hi10: stats::annualized_mean(&select(hi10)),
        spread: stats::annualized_mean(&bucket_spread),
        spread_t_stat: stats::one_sample_t(&bucket_spread),
        months: mask.iter().filter(|k| **k).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sloan_data::build_returns_frame;
    use sloan_data::report::RawRow;

    fn month_row(month: &str, lo: f64, hi: f64) -> RawRow {
        let mut returns = vec!["0.0".to_string(); 15];
        returns[5] = lo.to_string();
        returns[14] = hi.to_string();
        RawRow {
            month: month.to_string(),
            returns,
        }
    }

    fn fixture_frame() -> DataFrame {
        // Two pre-1960 months (filtered out), two 1970s months around the
        // 1969-70 recession end, one 2010s month.
        build_returns_frame(&[
            month_row("195101", 9.0, 9.0),
            month_row("195102", 9.0, 9.0),
            month_row("197011", 1.0, 3.0), // recession (inclusive end)
            month_row("197012", 2.0, 1.0), // expansion
            month_row("201506", -1.0, 2.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_pre_sample_months_are_dropped() {
        let report =
            SubPeriodReport::compute(&fixture_frame(), Weighting::ValueWeighted).unwrap();
        let total_decade_months: usize = report
            .rows
            .iter()
            .filter(|r| r.period.ends_with('s') && r.period.len() == 5)
            .map(|r| r.months)
            .sum();
        assert_eq!(total_decade_months, 3);
    }

    #[test]
    fn test_recession_boundary_month_is_recession() {
        let report =
            SubPeriodReport::compute(&fixture_frame(), Weighting::ValueWeighted).unwrap();

        let recessions = report
            .rows
            .iter()
            .find(|r| r.period == "Recessions")
            .unwrap();
        let expansions = report
            .rows
            .iter()
            .find(|r| r.period == "Expansions")
            .unwrap();

        assert_eq!(recessions.months, 1);
        assert_eq!(expansions.months, 2);

        // The single recession month is 1970-11: spread = 0.02 -> 24% annualized.
        assert_relative_eq!(recessions.spread, 0.24, epsilon = 1e-9);
    }

    #[test]
    fn test_decade_bucket_means() {
        let report =
            SubPeriodReport::compute(&fixture_frame(), Weighting::ValueWeighted).unwrap();

        let seventies = report.rows.iter().find(|r| r.period == "1970s").unwrap();
        assert_eq!(seventies.months, 2);
        // Lo10 months: 1%, 2% -> mean 1.5% monthly -> 18% annualized.
        assert_relative_eq!(seventies.lo10, 0.18, epsilon = 1e-9);

        let tens = report.rows.iter().find(|r| r.period == "2010s").unwrap();
        assert_eq!(tens.months, 1);
        // Single observation: t-stat undefined.
        assert!(tens.spread_t_stat.is_nan());
    }

    #[test]
    fn test_rows_are_in_fixed_order() {
        let report =
            SubPeriodReport::compute(&fixture_frame(), Weighting::EqualWeighted).unwrap();
        let labels: Vec<&str> = report.rows.iter().map(|r| r.period.as_str()).collect();
        assert_eq!(
            labels,
            [
                "1960s",
                "1970s",
                "1980s",
                "1990s",
                "2000s",
                "2010s",
                "Recessions",
                "Expansions"
            ]
        );
    }
}
