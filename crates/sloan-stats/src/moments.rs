//! Moments, annualization and per-series test statistics.
//!
//! All kernels take raw monthly observations with missing months encoded
//! as non-finite values; those are filtered before any computation.
//! Standard deviations are sample deviations (ddof = 1). Statistics that
//! are undefined for a series (empty sample, zero variance) come back as
//! NaN rather than an error.

/// Monthly observations per year.
pub const MONTHS_PER_YEAR: f64 = 12.0;

fn clean(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Number of non-missing observations.
pub fn observations(values: &[f64]) -> usize {
    values.iter().filter(|v| v.is_finite()).count()
}

/// Monthly mean over the non-missing observations.
pub fn mean(values: &[f64]) -> f64 {
    let clean = clean(values);
    if clean.is_empty() {
        return f64::NAN;
    }
    clean.iter().sum::<f64>() / clean.len() as f64
}

/// Monthly sample standard deviation (ddof = 1).
pub fn sample_std(values: &[f64]) -> f64 {
    let clean = clean(values);
    if clean.len() < 2 {
        return f64::NAN;
    }

    let n = clean.len() as f64;
    let mean = clean.iter().sum::<f64>() / n;
    let var = clean
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1.0);

    var.sqrt()
}

/// Annualized mean: monthly mean × 12.
pub fn annualized_mean(values: &[f64]) -> f64 {
    mean(values) * MONTHS_PER_YEAR
}

/// Annualized volatility: monthly sample std × √12.
pub fn annualized_std(values: &[f64]) -> f64 {
    sample_std(values) * MONTHS_PER_YEAR.sqrt()
}

/// Sharpe ratio from annualized mean and volatility; NaN when the
/// volatility is zero or undefined.
pub fn sharpe_ratio(values: &[f64]) -> f64 {
    let vol = annualized_std(values);
    if vol == 0.0 || !vol.is_finite() {
        return f64::NAN;
    }
    annualized_mean(values) / vol
}

/// One-sample t-statistic against a zero mean: t = m / (s / √n) over the
/// n non-missing monthly observations. Monthly, not annualized, on both
/// the mean and the deviation.
pub fn one_sample_t(values: &[f64]) -> f64 {
    let n = observations(values);
    let std = sample_std(values);
    if n == 0 || std == 0.0 || !std.is_finite() {
        return f64::NAN;
    }
    mean(values) / (std / (n as f64).sqrt())
}

/// Count of strictly negative non-missing observations.
pub fn negative_count(values: &[f64]) -> usize {
    values.iter().filter(|v| v.is_finite() && **v < 0.0).count()
}

/// Growth of $1 through the series: running ∏(1 + r). Missing months
/// carry the running value flat; a gap never resets compounding.
pub fn cumulative_growth(values: &[f64]) -> Vec<f64> {
    let mut acc = 1.0;
    values
        .iter()
        .map(|r| {
            if r.is_finite() {
                acc *= 1.0 + r;
            }
            acc
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SPREAD: [f64; 3] = [0.03, 0.03, -0.04];

    #[test]
    fn test_annualization_identities() {
        let m = mean(&SPREAD);
        let s = sample_std(&SPREAD);
        assert_relative_eq!(annualized_mean(&SPREAD), m * 12.0, epsilon = 1e-12);
        assert_relative_eq!(annualized_std(&SPREAD), s * 12.0f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_spread_fixture_moments() {
        assert_relative_eq!(mean(&SPREAD), 0.02 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(annualized_mean(&SPREAD), 0.08, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_values_are_excluded() {
        let with_gaps = [0.03, f64::NAN, 0.03, f64::NAN, -0.04];
        assert_eq!(observations(&with_gaps), 3);
        assert_relative_eq!(mean(&with_gaps), mean(&SPREAD), epsilon = 1e-12);
        assert_relative_eq!(
            sample_std(&with_gaps),
            sample_std(&SPREAD),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_one_sample_t_fixture() {
        // m = 0.0066667, s = 0.0404145, n = 3 -> t = 2/7.
        assert_relative_eq!(one_sample_t(&SPREAD), 2.0 / 7.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_variance_gives_nan() {
        let flat = [0.01, 0.01, 0.01];
        assert!(sharpe_ratio(&flat).is_nan());
        assert!(one_sample_t(&flat).is_nan());
    }

    #[test]
    fn test_degenerate_samples_give_nan() {
        assert!(mean(&[]).is_nan());
        assert!(sample_std(&[0.01]).is_nan());
        assert!(one_sample_t(&[f64::NAN]).is_nan());
    }

    #[test]
    fn test_negative_count() {
        assert_eq!(negative_count(&SPREAD), 1);
        assert_eq!(negative_count(&[f64::NAN, -0.01]), 1);
    }

    #[test]
    fn test_cumulative_growth_carries_gaps_flat() {
        let growth = cumulative_growth(&[0.1, f64::NAN, 0.1]);
        assert_relative_eq!(growth[0], 1.1, epsilon = 1e-12);
        assert_relative_eq!(growth[1], 1.1, epsilon = 1e-12);
        assert_relative_eq!(growth[2], 1.21, epsilon = 1e-12);
    }
}
