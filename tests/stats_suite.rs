//! The statistics engine over full pipeline output: suite shape,
//! determinism, and precondition handling.

use shipsight::application::pipeline;
use shipsight::application::stats::StatisticsEngine;
use shipsight::config::AnalyticsConfig;
use shipsight::domain::analysis::TestOutcome;
use shipsight::domain::order::EnrichedTable;
use shipsight::infrastructure::mock::MockDataset;

fn build(rows: usize, seed: u64) -> EnrichedTable {
    let raw = MockDataset::new(rows, seed).generate();
    pipeline::build_enriched_table(&raw, &AnalyticsConfig::default()).unwrap()
}

#[test]
fn suite_runs_every_analysis() {
    let table = build(2_000, 31);
    let results = StatisticsEngine::new(0.05).run(&table);

    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Region x late delivery",
            "Category x late delivery",
            "Customer segment x late delivery",
            "Shipping mode x late delivery",
            "Lead time by shipping mode",
            "Order quantity ~ Binomial",
            "Lead time ~ Poisson",
        ]
    );
}

#[test]
fn identical_input_identical_results() {
    let table = build(1_500, 8);
    let engine = StatisticsEngine::new(0.05);
    assert_eq!(engine.run(&table), engine.run(&table));

    // A fresh pipeline from the same seed must agree too.
    let rebuilt = build(1_500, 8);
    assert_eq!(engine.run(&table), engine.run(&rebuilt));
}

#[test]
fn chi_square_results_carry_valid_components() {
    let table = build(2_000, 31);
    let results = StatisticsEngine::new(0.05).run(&table);

    for result in results.iter().take(4) {
        match &result.outcome {
            TestOutcome::ChiSquare {
                statistic,
                dof,
                p_value,
                significant,
            } => {
                assert!(*statistic >= 0.0);
                assert!(*dof >= 1);
                assert!((0.0..=1.0).contains(p_value));
                assert_eq!(*significant, *p_value < 0.05);
            }
            TestOutcome::NotApplicable { .. } => {
                panic!("{} should be applicable on this dataset", result.name)
            }
            other => panic!("unexpected outcome for {}: {other:?}", result.name),
        }
    }
}

#[test]
fn t_test_compares_the_two_busiest_modes() {
    let table = build(2_000, 31);
    let results = StatisticsEngine::new(0.05).run(&table);
    let t_test = results
        .iter()
        .find(|r| r.name == "Lead time by shipping mode")
        .unwrap();

    match &t_test.outcome {
        TestOutcome::TTest {
            group_a, group_b, p_value, ..
        } => {
            assert_ne!(group_a, group_b);
            assert!((0.0..=1.0).contains(p_value));
            // Both groups come from the dataset's own modes.
            let modes = table.shipping_modes();
            assert!(modes.contains(group_a));
            assert!(modes.contains(group_b));
        }
        other => panic!("expected a t-test outcome, got {other:?}"),
    }
}

#[test]
fn distribution_fits_report_parameters() {
    let table = build(2_000, 31);
    let results = StatisticsEngine::new(0.05).run(&table);

    let binomial = results
        .iter()
        .find(|r| r.name == "Order quantity ~ Binomial")
        .unwrap();
    if let TestOutcome::BinomialFit { n, p } = &binomial.outcome {
        assert!(*n >= 1);
        assert!((0.0..=1.0).contains(p));
    }
    // Overdispersed quantities fall back to NotApplicable, which is a legal
    // outcome; anything else is not.
    assert!(matches!(
        binomial.outcome,
        TestOutcome::BinomialFit { .. } | TestOutcome::NotApplicable { .. }
    ));

    let poisson = results
        .iter()
        .find(|r| r.name == "Lead time ~ Poisson")
        .unwrap();
    match &poisson.outcome {
        TestOutcome::PoissonFit { lambda } => {
            // Mock lead times are 0..=6 days, so the mean must land inside.
            assert!(*lambda > 0.0 && *lambda < 7.0, "lambda = {lambda}");
        }
        other => panic!("expected a Poisson fit, got {other:?}"),
    }
}

#[test]
fn degenerate_dimension_reports_not_applicable() {
    // Single region: the region independence test has one level.
    let raw = MockDataset::new(300, 12).generate();
    let mut columns: Vec<shipsight::domain::table::Column> = raw.columns().to_vec();
    for column in &mut columns {
        if column.name == "Order Region" {
            column.cells = vec![Some("Oceania".to_string()); column.cells.len()];
        }
    }
    let table = pipeline::build_enriched_table(
        &shipsight::domain::table::Table::new(columns),
        &AnalyticsConfig::default(),
    )
    .unwrap();

    let results = StatisticsEngine::new(0.05).run(&table);
    let region_test = results
        .iter()
        .find(|r| r.name == "Region x late delivery")
        .unwrap();
    assert!(matches!(
        region_test.outcome,
        TestOutcome::NotApplicable { .. }
    ));

    // The other analyses still run.
    let segment_test = results
        .iter()
        .find(|r| r.name == "Customer segment x late delivery")
        .unwrap();
    assert!(segment_test.is_applicable());
}
