//! Method-of-moments distribution fits. The parameters are descriptive
//! outputs for the analysis panel; nothing is sampled from them.

use crate::application::stats::descriptive::{mean, sample_variance};

#[derive(Debug, Clone, PartialEq)]
pub struct BinomialFit {
    pub n: u64,
    pub p: f64,
}

/// Fits Binomial(n, p) to count data via method of moments:
/// `p = 1 - var/mean`, `n = mean / p`.
///
/// Returns `None` for overdispersed data (variance >= mean), where the
/// moment equations have no valid solution.
pub fn binomial_moments(values: &[f64]) -> Option<BinomialFit> {
    let m = mean(values)?;
    let var = sample_variance(values)?;
    if m <= 0.0 || var >= m {
        return None;
    }

    let p = 1.0 - var / m;
    let n = (m / p).round();
    if n < 1.0 {
        return None;
    }

    Some(BinomialFit { n: n as u64, p })
}

#[derive(Debug, Clone, PartialEq)]
pub struct PoissonFit {
    pub lambda: f64,
}

/// Fits Poisson(lambda) with the maximum-likelihood/moment estimator
/// `lambda = sample mean`. Requires non-negative observations.
pub fn poisson(values: &[f64]) -> Option<PoissonFit> {
    if values.iter().any(|v| *v < 0.0) {
        return None;
    }
    let lambda = mean(values)?;
    if lambda <= 0.0 {
        return None;
    }
    Some(PoissonFit { lambda })
}
