//! The startup statistical analysis suite.
//!
//! Runs once over the full enriched table; the dashboard filter never
//! reaches in here. Identical input yields identical results.

pub mod chi_square;
pub mod descriptive;
pub mod fits;
pub mod t_test;

use crate::domain::analysis::{TestOutcome, TestResult};
use crate::domain::order::{EnrichedRecord, EnrichedTable};
use std::collections::BTreeMap;
use tracing::info;

pub struct StatisticsEngine {
    significance_level: f64,
}

impl StatisticsEngine {
    pub fn new(significance_level: f64) -> Self {
        Self { significance_level }
    }

    /// Runs the fixed analysis suite: independence tests of each categorical
    /// dimension against the late-delivery flag, a lead-time comparison
    /// between the two busiest shipping modes, and the two moment fits.
    pub fn run(&self, table: &EnrichedTable) -> Vec<TestResult> {
        let results = vec![
            self.independence("Region x late delivery", table, |r| &r.region),
            self.independence("Category x late delivery", table, |r| &r.category),
            self.independence("Customer segment x late delivery", table, |r| &r.segment),
            self.independence("Shipping mode x late delivery", table, |r| &r.shipping_mode),
            self.lead_time_by_mode(table),
            self.quantity_fit(table),
            self.lead_time_fit(table),
        ];

        let applicable = results.iter().filter(|r| r.is_applicable()).count();
        info!(
            total = results.len(),
            applicable, "statistical analysis suite complete"
        );
        for result in &results {
            tracing::debug!(name = %result.name, outcome = %result.describe());
        }
        results
    }

    fn independence(
        &self,
        name: &str,
        table: &EnrichedTable,
        dimension: impl Fn(&EnrichedRecord) -> &str,
    ) -> TestResult {
        let observations = table
            .records
            .iter()
            .map(|r| (dimension(r), r.late_delivery));
        let outcome = match chi_square::independence(observations) {
            Some(test) => TestOutcome::ChiSquare {
                statistic: test.statistic,
                dof: test.dof,
                p_value: test.p_value,
                significant: test.p_value < self.significance_level,
            },
            None => TestOutcome::NotApplicable {
                reason: "requires at least two levels and both outcomes present".to_string(),
            },
        };
        TestResult::new(name, outcome)
    }

    /// Welch's t-test on lead time between the two most frequent shipping
    /// modes. The group choice is deterministic: count descending, then name.
    fn lead_time_by_mode(&self, table: &EnrichedTable) -> TestResult {
        let name = "Lead time by shipping mode";

        let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for record in valid_lead_times(table) {
            groups
                .entry(record.shipping_mode.as_str())
                .or_default()
                .push(record.lead_time_days as f64);
        }
        if groups.len() < 2 {
            return TestResult::new(
                name,
                TestOutcome::NotApplicable {
                    reason: "fewer than two shipping modes in the data".to_string(),
                },
            );
        }

        let mut ranked: Vec<(&str, &Vec<f64>)> = groups.iter().map(|(k, v)| (*k, v)).collect();
        ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.0.cmp(b.0)));
        let (mode_a, sample_a) = ranked[0];
        let (mode_b, sample_b) = ranked[1];

        let outcome = match t_test::welch(sample_a, sample_b) {
            Some(test) => TestOutcome::TTest {
                group_a: mode_a.to_string(),
                group_b: mode_b.to_string(),
                statistic: test.statistic,
                dof: test.dof,
                p_value: test.p_value,
                significant: test.p_value < self.significance_level,
            },
            None => TestOutcome::NotApplicable {
                reason: "shipping-mode groups too small or without variance".to_string(),
            },
        };
        TestResult::new(name, outcome)
    }

    fn quantity_fit(&self, table: &EnrichedTable) -> TestResult {
        let name = "Order quantity ~ Binomial";
        let quantities: Vec<f64> = table.records.iter().map(|r| r.quantity as f64).collect();
        let outcome = match fits::binomial_moments(&quantities) {
            Some(fit) => TestOutcome::BinomialFit { n: fit.n, p: fit.p },
            None => TestOutcome::NotApplicable {
                reason: "quantity variance is not below its mean".to_string(),
            },
        };
        TestResult::new(name, outcome)
    }

    fn lead_time_fit(&self, table: &EnrichedTable) -> TestResult {
        let name = "Lead time ~ Poisson";
        let lead_times: Vec<f64> = valid_lead_times(table)
            .map(|r| r.lead_time_days as f64)
            .collect();
        let outcome = match fits::poisson(&lead_times) {
            Some(fit) => TestOutcome::PoissonFit { lambda: fit.lambda },
            None => TestOutcome::NotApplicable {
                reason: "no valid lead times to fit".to_string(),
            },
        };
        TestResult::new(name, outcome)
    }
}

/// Records whose lead time is trustworthy (date order not inverted).
fn valid_lead_times(table: &EnrichedTable) -> impl Iterator<Item = &EnrichedRecord> {
    table.records.iter().filter(|r| !r.date_order_invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::test_support::record;
    use crate::domain::order::EnrichmentReport;

    fn table_with(records: Vec<EnrichedRecord>) -> EnrichedTable {
        EnrichedTable {
            records,
            report: EnrichmentReport::default(),
        }
    }

    #[test]
    fn test_suite_is_deterministic() {
        let mut records = Vec::new();
        for i in 0..60 {
            let mut r = record(
                if i % 2 == 0 { "East Africa" } else { "Oceania" },
                if i % 3 == 0 { "Consumer" } else { "Corporate" },
                i % 2 == 0,
            );
            r.lead_time_days = 2 + (i % 5) as i64;
            r.quantity = 1 + (i % 4) as u32;
            r.shipping_mode = if i % 2 == 0 {
                "Standard Class".to_string()
            } else {
                "First Class".to_string()
            };
            records.push(r);
        }
        let table = table_with(records);

        let engine = StatisticsEngine::new(0.05);
        let first = engine.run(&table);
        let second = engine.run(&table);
        assert_eq!(first, second);
        assert_eq!(first.len(), 7);
    }

    #[test]
    fn test_single_level_dimension_not_applicable() {
        let records = vec![
            record("Oceania", "Consumer", true),
            record("Oceania", "Consumer", false),
        ];
        let table = table_with(records);
        let engine = StatisticsEngine::new(0.05);
        let results = engine.run(&table);

        let region_test = results
            .iter()
            .find(|r| r.name == "Region x late delivery")
            .unwrap();
        assert!(!region_test.is_applicable());
    }

    #[test]
    fn test_flagged_records_excluded_from_lead_time_fit() {
        let mut bad = record("Oceania", "Consumer", false);
        bad.date_order_invalid = true;
        bad.lead_time_days = 0;
        let good_a = record("Oceania", "Consumer", false);
        let good_b = record("East Africa", "Corporate", true);
        let table = table_with(vec![good_a, bad, good_b]);

        let engine = StatisticsEngine::new(0.05);
        let results = engine.run(&table);
        let fit = results
            .iter()
            .find(|r| r.name == "Lead time ~ Poisson")
            .unwrap();
        match &fit.outcome {
            TestOutcome::PoissonFit { lambda } => {
                // Both valid records have a 4-day lead time; the flagged
                // zero-day record must not drag the estimate down.
                assert!((lambda - 4.0).abs() < 1e-12);
            }
            other => panic!("expected Poisson fit, got {other:?}"),
        }
    }
}
