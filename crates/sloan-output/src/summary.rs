//! Full-sample summary statistics for the decile and spread portfolios.

use polars::prelude::DataFrame;
use serde::Serialize;
use sloan_data::Result;
use sloan_data::buckets::{self, SPREAD, Weighting};
use sloan_data::frame::column_values;
use sloan_stats as stats;
use std::fmt;

/// Annualized statistics for one portfolio column.
///
/// The factor-model fields (CAPM and Fama-French alphas/betas) are
/// reserved in the output schema but not estimated here; they export as
/// nulls.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryRecord {
    /// Portfolio column name.
    pub portfolio: String,

    /// Annualized mean return (monthly mean × 12).
    pub mean: f64,

    /// Annualized volatility (monthly sample std × √12).
    pub std_dev: f64,

    /// Sharpe ratio, annualized mean over annualized volatility.
    pub sharpe: f64,

    /// CAPM alpha (not estimated).
    pub capm_alpha: Option<f64>,

    /// CAPM beta (not estimated).
    pub capm_beta: Option<f64>,

    /// Fama-French three-factor alpha (not estimated).
    pub ff_alpha: Option<f64>,

    /// Fama-French market beta (not estimated).
    pub ff_beta_mkt: Option<f64>,

    /// Fama-French size beta (not estimated).
    pub ff_beta_smb: Option<f64>,

    /// Fama-French value beta (not estimated).
    pub ff_beta_hml: Option<f64>,
}

/// Summary statistics for one weighting scheme: one record per tracked
/// column (ten deciles plus the spread) and the spread t-statistic.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStatistics {
    /// Weighting scheme the statistics describe.
    pub weighting: Weighting,

    /// One record per tracked portfolio column, in fixed report order.
    pub records: Vec<SummaryRecord>,

    /// One-sample t-statistic of the monthly spread against zero.
    pub spread_t_stat: f64,
}

impl SummaryStatistics {
    /// Compute summary statistics over a monthly return frame.
    pub fn compute(df: &DataFrame, weighting: Weighting) -> Result<Self> {
        let mut records = Vec::with_capacity(buckets::tracked_columns().len());

        for name in buckets::tracked_columns() {
            let values = column_values(df, name)?;
            records.push(SummaryRecord {
                portfolio: name.to_string(),
                mean: stats::annualized_mean(&values),
                std_dev: stats::annualized_std(&values),
                sharpe: stats::sharpe_ratio(&values),
                capm_alpha: None,
                capm_beta: None,
                ff_alpha: None,
                ff_beta_mkt: None,
                ff_beta_smb: None,
                ff_beta_hml: None,
            });
        }

        let spread = column_values(df, SPREAD)?;
        Ok(Self {
            weighting,
            records,
            spread_t_stat: stats::one_sample_t(&spread),
        })
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{} Summary Statistics\n", self.weighting));
        output.push_str(&"=".repeat(100));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>12} {:>12} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
            "Portfolio", "Mean", "StdDev", "Sharpe", "CAPM a", "CAPM b", "FF a", "FF b(MKT)"
        ));
        output.push_str(&"-".repeat(100));
        output.push('\n');

        for record in &self.records {
            output.push_str(&format!(
                "{:<10} {:>11.2}% {:>11.2}% {:>10.3} {:>10} {:>10} {:>10} {:>10}\n",
                record.portfolio,
                record.mean * 100.0,
                record.std_dev * 100.0,
                record.sharpe,
                placeholder(record.capm_alpha),
                placeholder(record.capm_beta),
                placeholder(record.ff_alpha),
                placeholder(record.ff_beta_mkt),
            ));
        }

        output.push_str(&"=".repeat(100));
        output.push('\n');
        output.push_str(&format!(
            "t-statistic for Spread portfolio: {:.3}\n",
            self.spread_t_stat
        ));

        output
    }
}

fn placeholder(value: Option<f64>) -> String {
    value.map_or_else(|| "--".to_string(), |v| format!("{v:.3}"))
}

impl fmt::Display for SummaryStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii_table())
    }
}

/// Sign statistics for the spread series: how often the long-short
/// position lost money.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SpreadSignStats {
    /// Months with a strictly negative spread return.
    pub negative: usize,

    /// Non-missing spread months.
    pub total: usize,
}

impl SpreadSignStats {
    /// Count negative and total non-missing spread months.
    pub fn compute(df: &DataFrame) -> Result<Self> {
        let spread = column_values(df, SPREAD)?;
        Ok(Self {
            negative: stats::negative_count(&spread),
            total: stats::observations(&spread),
        })
    }

    /// Share of negative months, in percent.
    pub fn pct_negative(&self) -> f64 {
        if self.total == 0 {
            return f64::NAN;
        }
        self.negative as f64 / self.total as f64 * 100.0
    }
}

impl fmt::Display for SpreadSignStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = self.pct_negative();
        writeln!(
            f,
            "Negative months: {} out of {} ({:.1}%)",
            self.negative, self.total, pct
        )?;
        write!(
            f,
            "Positive months: {} ({:.1}%)",
            self.total - self.negative,
            100.0 - pct
        )
    }
}
