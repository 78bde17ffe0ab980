//! Chi-square test of independence between a categorical dimension and a
//! binary outcome.

use statrs::distribution::{ChiSquared, ContinuousCDF};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquareResult {
    pub statistic: f64,
    pub dof: usize,
    pub p_value: f64,
}

/// Runs the test over (level, outcome) observations.
///
/// Returns `None` when the contingency table is degenerate: fewer than two
/// levels, or one of the outcome columns is empty (dof would be zero).
pub fn independence<'a, I>(observations: I) -> Option<ChiSquareResult>
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    // Counts per level: [outcome=false, outcome=true]. BTreeMap keeps the
    // level order stable across runs.
    let mut counts: BTreeMap<&str, [u64; 2]> = BTreeMap::new();
    let mut total = 0u64;
    for (level, outcome) in observations {
        counts.entry(level).or_default()[usize::from(outcome)] += 1;
        total += 1;
    }

    if counts.len() < 2 || total == 0 {
        return None;
    }

    let col_totals = counts
        .values()
        .fold([0u64; 2], |acc, row| [acc[0] + row[0], acc[1] + row[1]]);
    if col_totals[0] == 0 || col_totals[1] == 0 {
        return None;
    }

    let mut statistic = 0.0;
    for row in counts.values() {
        let row_total = (row[0] + row[1]) as f64;
        for (outcome, &observed) in row.iter().enumerate() {
            let expected = row_total * col_totals[outcome] as f64 / total as f64;
            if expected > 0.0 {
                let diff = observed as f64 - expected;
                statistic += diff * diff / expected;
            }
        }
    }

    let dof = counts.len() - 1; // (levels - 1) * (2 - 1)
    let distribution = ChiSquared::new(dof as f64).ok()?;
    let p_value = (1.0 - distribution.cdf(statistic)).clamp(0.0, 1.0);

    Some(ChiSquareResult {
        statistic,
        dof,
        p_value,
    })
}
