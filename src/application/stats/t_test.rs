//! Welch's two-sample t-test for a difference in means.

use crate::application::stats::descriptive::{mean, sample_variance};
use statrs::distribution::{ContinuousCDF, StudentsT};

#[derive(Debug, Clone, PartialEq)]
pub struct TTestResult {
    pub statistic: f64,
    /// Welch-Satterthwaite degrees of freedom (fractional).
    pub dof: f64,
    /// Two-sided p-value.
    pub p_value: f64,
}

/// Runs the test on two independent samples.
///
/// Returns `None` when either sample has fewer than two observations or both
/// variances are zero (the statistic is undefined).
pub fn welch(sample_a: &[f64], sample_b: &[f64]) -> Option<TTestResult> {
    let n_a = sample_a.len() as f64;
    let n_b = sample_b.len() as f64;

    let mean_a = mean(sample_a)?;
    let mean_b = mean(sample_b)?;
    let var_a = sample_variance(sample_a)?;
    let var_b = sample_variance(sample_b)?;

    let se_a = var_a / n_a;
    let se_b = var_b / n_b;
    let pooled = se_a + se_b;
    if pooled <= 0.0 {
        return None;
    }

    let statistic = (mean_a - mean_b) / pooled.sqrt();
    let dof = pooled.powi(2) / (se_a.powi(2) / (n_a - 1.0) + se_b.powi(2) / (n_b - 1.0));

    let distribution = StudentsT::new(0.0, 1.0, dof).ok()?;
    let p_value = (2.0 * (1.0 - distribution.cdf(statistic.abs()))).clamp(0.0, 1.0);

    Some(TTestResult {
        statistic,
        dof,
        p_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_samples_not_significant() {
        let sample = [2.0, 3.0, 4.0, 5.0, 6.0];
        let result = welch(&sample, &sample).unwrap();
        assert!(result.statistic.abs() < 1e-12);
        assert!(result.p_value > 0.999);
    }

    #[test]
    fn test_clearly_separated_means() {
        let slow: Vec<f64> = (0..30).map(|i| 5.0 + (i % 3) as f64).collect();
        let fast: Vec<f64> = (0..30).map(|i| 1.0 + (i % 3) as f64).collect();
        let result = welch(&slow, &fast).unwrap();
        assert!(result.statistic > 10.0);
        assert!(result.p_value < 1e-6);
    }

    #[test]
    fn test_known_welch_statistic() {
        // Hand-computed: t = -2.7078, dof = 26.95, two-sided p ~ 0.012.
        let a = [27.5, 21.0, 19.0, 23.6, 17.0, 17.9, 16.9, 20.1, 21.9, 22.6, 23.1, 19.6, 19.0, 21.7, 21.4];
        let b = [27.1, 22.0, 20.8, 23.4, 23.4, 23.5, 25.8, 22.0, 24.8, 20.2, 21.9, 22.1, 22.9, 30.5];
        let result = welch(&a, &b).unwrap();
        assert!((result.statistic + 2.7078).abs() < 1e-3, "t = {}", result.statistic);
        assert!((result.dof - 26.95).abs() < 0.01, "dof = {}", result.dof);
        assert!(result.p_value > 0.005 && result.p_value < 0.05);
    }

    #[test]
    fn test_degenerate_samples_rejected() {
        assert!(welch(&[1.0], &[2.0, 3.0]).is_none());
        assert!(welch(&[5.0, 5.0, 5.0], &[5.0, 5.0]).is_none());
    }
}
