//! Independent two-sample t-test.

use crate::moments;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Result of an independent two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoSampleTest {
    /// The t-statistic.
    pub t_stat: f64,

    /// Two-sided p-value.
    pub p_value: f64,

    /// Degrees of freedom, n1 + n2 - 2.
    pub dof: f64,
}

/// Pooled (equal-variance) two-sample t-test of the hypothesis that two
/// series share a mean. Missing observations are filtered per series.
/// Degenerate inputs (fewer than two observations on a side, zero pooled
/// variance) yield NaN statistics.
pub fn pooled_t_test(a: &[f64], b: &[f64]) -> TwoSampleTest {
    let n1 = moments::observations(a) as f64;
    let n2 = moments::observations(b) as f64;
    let dof = n1 + n2 - 2.0;

    if n1 < 2.0 || n2 < 2.0 {
        return TwoSampleTest {
            t_stat: f64::NAN,
            p_value: f64::NAN,
            dof,
        };
    }

    let s1 = moments::sample_std(a);
    let s2 = moments::sample_std(b);
    let pooled_var = ((n1 - 1.0) * s1 * s1 + (n2 - 1.0) * s2 * s2) / dof;
    let se = (pooled_var * (1.0 / n1 + 1.0 / n2)).sqrt();

    if se == 0.0 || !se.is_finite() {
        return TwoSampleTest {
            t_stat: f64::NAN,
            p_value: f64::NAN,
            dof,
        };
    }

    let t_stat = (moments::mean(a) - moments::mean(b)) / se;
    let p_value = two_sided_p(t_stat, dof);

    TwoSampleTest {
        t_stat,
        p_value,
        dof,
    }
}

fn two_sided_p(t: f64, dof: f64) -> f64 {
    if !t.is_finite() || dof <= 0.0 {
        return f64::NAN;
    }
    match StudentsT::new(0.0, 1.0, dof) {
        Ok(dist) => 2.0 * (1.0 - dist.cdf(t.abs())),
        Err(_) => f64::NAN,
    }
}
