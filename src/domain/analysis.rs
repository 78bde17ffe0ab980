//! Results of the startup statistical analyses.
//!
//! These are computed once over the full enriched table and are independent
//! of the dashboard filter state.

use serde::Serialize;

/// Outcome of one named analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TestOutcome {
    ChiSquare {
        statistic: f64,
        dof: usize,
        p_value: f64,
        significant: bool,
    },
    TTest {
        group_a: String,
        group_b: String,
        statistic: f64,
        dof: f64,
        p_value: f64,
        significant: bool,
    },
    BinomialFit {
        n: u64,
        p: f64,
    },
    PoissonFit {
        lambda: f64,
    },
    /// Preconditions unmet (too few levels, empty groups, degenerate
    /// variance). Reported, never raised.
    NotApplicable {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub name: String,
    pub outcome: TestOutcome,
}

impl TestResult {
    pub fn new(name: impl Into<String>, outcome: TestOutcome) -> Self {
        Self {
            name: name.into(),
            outcome,
        }
    }

    pub fn is_applicable(&self) -> bool {
        !matches!(self.outcome, TestOutcome::NotApplicable { .. })
    }

    /// One-line rendering for the report binary and the dashboard table.
    pub fn describe(&self) -> String {
        match &self.outcome {
            TestOutcome::ChiSquare {
                statistic,
                dof,
                p_value,
                significant,
            } => format!(
                "chi2={statistic:.3} dof={dof} p={p_value:.4} ({})",
                if *significant { "dependent" } else { "independent" }
            ),
            TestOutcome::TTest {
                group_a,
                group_b,
                statistic,
                dof,
                p_value,
                significant,
            } => format!(
                "{group_a} vs {group_b}: t={statistic:.3} dof={dof:.1} p={p_value:.4} ({})",
                if *significant {
                    "significant"
                } else {
                    "not significant"
                }
            ),
            TestOutcome::BinomialFit { n, p } => format!("Binomial(n={n}, p={p:.4})"),
            TestOutcome::PoissonFit { lambda } => format!("Poisson(lambda={lambda:.4})"),
            TestOutcome::NotApplicable { reason } => format!("not applicable: {reason}"),
        }
    }
}
