//! January-effect comparison and cumulative growth of $1.

use chrono::{Datelike, NaiveDate};
use polars::prelude::DataFrame;
use serde::Serialize;
use sloan_data::Result;
use sloan_data::buckets::{HI10, LO10, SPREAD, Weighting};
use sloan_data::frame::{column_values, month_dates};
use sloan_stats as stats;
use sloan_stats::ttest::{TwoSampleTest, pooled_t_test};
use std::fmt;

/// Mean monthly returns of the tracked legs over one month group.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct SeasonalMeans {
    /// Mean low-accrual decile return.
    pub lo10: f64,

    /// Mean high-accrual decile return.
    pub hi10: f64,

    /// Mean spread return.
    pub spread: f64,

    /// Months in the group.
    pub months: usize,
}

/// January vs non-January comparison of the accrual portfolios, with an
/// independent two-sample t-test on the spread.
#[derive(Debug, Clone)]
pub struct JanuaryEffect {
    /// Weighting scheme the comparison describes.
    pub weighting: Weighting,

    /// Means over January months.
    pub january: SeasonalMeans,

    /// Means over all other months.
    pub other: SeasonalMeans,

    /// Pooled t-test of January vs other spread returns.
    pub test: TwoSampleTest,
}

impl JanuaryEffect {
    /// Compute the comparison over a monthly return frame.
    pub fn compute(df: &DataFrame, weighting: Weighting) -> Result<Self> {
        let dates = month_dates(df)?;
        let lo10 = column_values(df, LO10)?;
        let hi10 = column_values(df, HI10)?;
        let spread = column_values(df, SPREAD)?;

        let january: Vec<bool> = dates.iter().map(|d| d.month() == 1).collect();
        let other: Vec<bool> = january.iter().map(|j| !j).collect();

        let jan_spread = select(&january, &spread);
        let other_spread = select(&other, &spread);

        Ok(Self {
            weighting,
            january: group_means(&january, &lo10, &hi10, &spread),
            other: group_means(&other, &lo10, &hi10, &spread),
            test: pooled_t_test(&jan_spread, &other_spread),
        })
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{} January Effect\n", self.weighting));
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>8} {:>12} {:>12} {:>12}\n",
            "Months", "Count", "Lo10", "Hi10", "Spread"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for (label, means) in [("January", &self.january), ("Other months", &self.other)] {
            output.push_str(&format!(
                "{:<16} {:>8} {:>11.3}% {:>11.3}% {:>11.3}%\n",
                label,
                means.months,
                means.lo10 * 100.0,
                means.hi10 * 100.0,
                means.spread * 100.0,
            ));
        }

        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "t-test (January vs Other): t={:.3}, p={:.4}\n",
            self.test.t_stat, self.test.p_value
        ));

        output
    }
}

impl fmt::Display for JanuaryEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii_table())
    }
}

fn select(mask: &[bool], values: &[f64]) -> Vec<f64> {
    mask.iter()
        .zip(values)
        .filter_map(|(keep, v)| keep.then_some(*v))
        .collect()
}

fn group_means(mask: &[bool], lo10: &[f64], hi10: &[f64], spread: &[f64]) -> SeasonalMeans {
    SeasonalMeans {
        lo10: stats::mean(&select(mask, lo10)),
        hi10: stats::mean(&select(mask, hi10)),
        spread: stats::mean(&select(mask, spread)),
        months: mask.iter().filter(|k| **k).count(),
    }
}

/// Growth of $1 invested in the tracked legs, month by month.
#[derive(Debug, Clone)]
pub struct GrowthSummary {
    /// Weighting scheme the growth paths describe.
    pub weighting: Weighting,

    /// Calendar months, in row order.
    pub dates: Vec<NaiveDate>,

    /// Growth path of the low-accrual decile.
    pub lo10: Vec<f64>,

    /// Growth path of the high-accrual decile.
    pub hi10: Vec<f64>,

    /// Growth path of the spread position.
    pub spread: Vec<f64>,
}

impl GrowthSummary {
    /// Compound $1 through each tracked leg of a monthly return frame.
    pub fn compute(df: &DataFrame, weighting: Weighting) -> Result<Self> {
        Ok(Self {
            weighting,
            dates: month_dates(df)?,
            lo10: stats::cumulative_growth(&column_values(df, LO10)?),
            hi10: stats::cumulative_growth(&column_values(df, HI10)?),
            spread: stats::cumulative_growth(&column_values(df, SPREAD)?),
        })
    }

    /// Terminal values of the three growth paths (lo10, hi10, spread).
    pub fn terminal(&self) -> (f64, f64, f64) {
        let last = |path: &[f64]| path.last().copied().unwrap_or(1.0);
        (last(&self.lo10), last(&self.hi10), last(&self.spread))
    }
}

impl fmt::Display for GrowthSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lo10, hi10, spread) = self.terminal();
        writeln!(f, "Cumulative growth of $1 ({}):", self.weighting)?;
        writeln!(f, "  Low accrual:  ${lo10:.2}")?;
        writeln!(f, "  High accrual: ${hi10:.2}")?;
        write!(f, "  Spread:       ${spread:.2}")
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
        build_returns_frame(&[
            month_row("197001", 5.0, 1.0),
            month_row("197002", 1.0, 1.0),
            month_row("197101", 6.0, 2.0),
            month_row("197102", 2.0, 2.0),
            month_row("197103", 3.0, 3.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_january_partition() {
        let effect = JanuaryEffect::compute(&fixture_frame(), Weighting::ValueWeighted).unwrap();

        assert_eq!(effect.january.months, 2);
        assert_eq!(effect.other.months, 3);

        // January Lo10: (5% + 6%) / 2.
        assert_relative_eq!(effect.january.lo10, 0.055, epsilon = 1e-12);
        // January spread: (-4% + -4%) / 2; other spread: 0%, 0%, 0%.
        assert_relative_eq!(effect.january.spread, -0.04, epsilon = 1e-12);
        assert_relative_eq!(effect.other.spread, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_growth_paths() {
        let growth = GrowthSummary::compute(&fixture_frame(), Weighting::ValueWeighted).unwrap();
        assert_eq!(growth.dates.len(), 5);

        // Lo10: 1.05 * 1.01 * 1.06 * 1.02 * 1.03
        let expected = 1.05 * 1.01 * 1.06 * 1.02 * 1.03;
        let (lo10, _, _) = growth.terminal();
        assert_relative_eq!(lo10, expected, epsilon = 1e-12);
    }
}
