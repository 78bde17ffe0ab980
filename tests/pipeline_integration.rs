//! End-to-end pipeline checks over the seeded synthetic dataset: load,
//! clean, enrich, and verify the contracts every downstream consumer
//! relies on.

use shipsight::application::pipeline::{self, Cleaner};
use shipsight::config::AnalyticsConfig;
use shipsight::domain::errors::DataQualityError;
use shipsight::domain::schema;
use shipsight::domain::table::{Column, Table};
use shipsight::infrastructure::mock::MockDataset;

fn enriched(rows: usize, seed: u64) -> shipsight::domain::order::EnrichedTable {
    let raw = MockDataset::new(rows, seed)
        .with_inverted_date_share(0.05)
        .generate();
    pipeline::build_enriched_table(&raw, &AnalyticsConfig::default()).unwrap()
}

#[test]
fn cleaned_table_has_no_missing_cells_and_normalized_names() {
    let raw = MockDataset::new(500, 11).generate();
    let clean = Cleaner::new(1.5).clean(&raw).unwrap();

    assert_eq!(clean.table.total_missing(), 0);
    for column in clean.table.columns() {
        assert!(
            column
                .name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
            "unnormalized column name: {}",
            column.name
        );
        // Normalizing an already-clean name must be a no-op.
        assert_eq!(schema::normalize_column_name(&column.name), column.name);
    }
}

#[test]
fn pii_columns_are_dropped() {
    let raw = MockDataset::new(100, 11).generate();
    assert!(raw.column("Customer Email").is_some());

    let clean = Cleaner::new(1.5).clean(&raw).unwrap();
    assert!(clean.table.column("customer_email").is_none());
    assert!(clean.table.column("customer_street").is_none());
}

#[test]
fn lead_times_are_non_negative_or_flagged() {
    let table = enriched(2_000, 17);
    for record in &table.records {
        assert!(
            record.lead_time_days >= 0,
            "negative lead time on order {}",
            record.order_id
        );
    }
    // The generator produced inverted pairs; every one must be flagged and
    // recorded, none dropped.
    let flagged = table
        .records
        .iter()
        .filter(|r| r.date_order_invalid)
        .count();
    assert!(flagged > 0, "expected some inverted date pairs");
    assert_eq!(flagged, table.report.violations.len());
}

#[test]
fn order_month_is_calendar_month() {
    let table = enriched(500, 23);
    for record in &table.records {
        assert!((1..=12).contains(&record.order_month));
    }
}

#[test]
fn same_seed_builds_identical_enriched_tables() {
    assert_eq!(enriched(800, 5), enriched(800, 5));
}

#[test]
fn fully_missing_column_fails_the_load() {
    let raw = MockDataset::new(50, 3).generate();
    let mut columns: Vec<Column> = raw.columns().to_vec();
    for column in &mut columns {
        if column.name == "Sales" {
            column.cells = vec![None; column.cells.len()];
        }
    }
    let err = pipeline::build_enriched_table(&Table::new(columns), &AnalyticsConfig::default())
        .unwrap_err();
    assert!(matches!(err, DataQualityError::EmptyColumn { column } if column == "sales"));
}

#[test]
fn missing_required_column_fails_the_load() {
    let raw = MockDataset::new(50, 3).generate();
    let columns: Vec<Column> = raw
        .columns()
        .iter()
        .filter(|c| c.name != "Customer Segment")
        .cloned()
        .collect();
    let err = pipeline::build_enriched_table(&Table::new(columns), &AnalyticsConfig::default())
        .unwrap_err();
    assert!(
        matches!(err, DataQualityError::MissingColumn { column } if column == "customer_segment")
    );
}
