#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sloan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod moments;
pub mod ttest;

pub use moments::{
    MONTHS_PER_YEAR, annualized_mean, annualized_std, cumulative_growth, mean, negative_count,
    observations, one_sample_t, sample_std, sharpe_ratio,
};
pub use ttest::{TwoSampleTest, pooled_t_test};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
