//! Dataset cleaning: drops PII, normalizes headers, fills missing values,
//! and flags IQR outliers. The raw table is read, never mutated, so the
//! original load stays available for auditing.

use crate::application::stats::descriptive;
use crate::domain::errors::DataQualityError;
use crate::domain::schema::{self, ImputePolicy};
use crate::domain::table::{Column, Table};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Cleaned table plus per-row outlier indicators for each numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanTable {
    pub table: Table,
    /// Keyed by normalized column name; one flag per row, true when the
    /// value falls outside the IQR fences. Flagged values are kept.
    pub outlier_flags: BTreeMap<String, Vec<bool>>,
}

pub struct Cleaner {
    iqr_multiplier: f64,
}

impl Cleaner {
    pub fn new(iqr_multiplier: f64) -> Self {
        Self { iqr_multiplier }
    }

    pub fn clean(&self, raw: &Table) -> Result<CleanTable, DataQualityError> {
        if raw.row_count() == 0 {
            return Err(DataQualityError::NoRows);
        }

        let mut columns = Vec::with_capacity(raw.column_count());
        let mut dropped = 0usize;
        for column in raw.columns() {
            let name = schema::normalize_column_name(&column.name);
            if schema::is_dropped(&name) {
                dropped += 1;
                continue;
            }
            columns.push(self.impute(name, column)?);
        }
        info!(
            rows = raw.row_count(),
            dropped,
            retained = columns.len(),
            "columns cleaned"
        );

        let mut outlier_flags = BTreeMap::new();
        for column in &columns {
            if let Some(flags) = self.flag_outliers(column) {
                outlier_flags.insert(column.name.clone(), flags);
            }
        }

        Ok(CleanTable {
            table: Table::new(columns),
            outlier_flags,
        })
    }

    /// Fills every missing cell of one column according to its policy.
    fn impute(&self, name: String, column: &Column) -> Result<Column, DataQualityError> {
        if column.is_fully_missing() {
            return Err(DataQualityError::EmptyColumn { column: name });
        }
        if column.missing_count() == 0 {
            return Ok(Column::new(name, column.cells.clone()));
        }

        let policy = match schema::schema_column(&name) {
            Some(declared) => declared.policy,
            // Undeclared columns keep the original dtype split: numeric
            // forward-fills, categorical takes the mode.
            None if column.is_numeric() => ImputePolicy::ForwardFill,
            None => ImputePolicy::Mode,
        };

        let filled = match policy {
            ImputePolicy::ForwardFill => forward_fill(column),
            ImputePolicy::Mode => mode_fill(column),
        };
        debug!(column = %filled.name, policy = ?policy, filled = column.missing_count(), "imputed");
        Ok(filled)
    }

    /// IQR fences for one numeric column; `None` for categorical columns.
    /// Columns declared mode-imputed are categorical in meaning (0/1 flags)
    /// even when their cells parse as numbers.
    fn flag_outliers(&self, column: &Column) -> Option<Vec<bool>> {
        if schema::schema_column(&column.name)
            .is_some_and(|c| c.policy == ImputePolicy::Mode)
        {
            return None;
        }
        let values = column.numeric_values()?;
        // After imputation every cell is present, so values align with rows.
        let (q1, q3) = descriptive::quartiles(&values)?;
        let spread = (q3 - q1) * self.iqr_multiplier;
        let (low, high) = (q1 - spread, q3 + spread);

        let flags: Vec<bool> = values.iter().map(|v| *v < low || *v > high).collect();
        let flagged = flags.iter().filter(|f| **f).count();
        if flagged > 0 {
            warn!(column = %column.name, flagged, low, high, "outliers flagged");
        }
        Some(flags)
    }
}

/// Carries the last known value forward. Leading gaps take the first present
/// value for text columns and zero for numeric ones.
fn forward_fill(column: &Column) -> Column {
    let numeric = column.is_numeric();
    let mut last: Option<String> = None;
    let cells = column
        .cells
        .iter()
        .map(|cell| match cell {
            Some(value) => {
                last = Some(value.clone());
                Some(value.clone())
            }
            None => match &last {
                Some(value) => Some(value.clone()),
                None if numeric => Some("0".to_string()),
                None => column.cells.iter().flatten().next().cloned(),
            },
        })
        .collect();
    Column::new(schema::normalize_column_name(&column.name), cells)
}

/// Replaces missing cells with the most frequent value; ties go to the value
/// seen first.
fn mode_fill(column: &Column) -> Column {
    let mut counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for (index, cell) in column.cells.iter().flatten().enumerate() {
        let entry = counts.entry(cell.as_str()).or_insert((0, index));
        entry.0 += 1;
    }
    let mode = counts
        .iter()
        .max_by(|a, b| a.1.0.cmp(&b.1.0).then(b.1.1.cmp(&a.1.1)))
        .map(|(value, _)| value.to_string())
        .unwrap_or_default();

    let cells = column
        .cells
        .iter()
        .map(|cell| cell.clone().or_else(|| Some(mode.clone())))
        .collect();
    Column::new(schema::normalize_column_name(&column.name), cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, values: &[&str]) -> Column {
        Column::new(
            name,
            values
                .iter()
                .map(|v| {
                    if v.is_empty() {
                        None
                    } else {
                        Some(v.to_string())
                    }
                })
                .collect(),
        )
    }

    fn cleaner() -> Cleaner {
        Cleaner::new(1.5)
    }

    #[test]
    fn test_clean_output_has_no_missing_cells() {
        let raw = Table::new(vec![
            column("Order Region", &["East", "", "West", ""]),
            column("Sales", &["10.0", "", "30.0", "40.0"]),
            column("Customer Email", &["a@x.com", "b@x.com", "", "d@x.com"]),
        ]);
        let clean = cleaner().clean(&raw).unwrap();

        assert_eq!(clean.table.total_missing(), 0);
        assert!(clean.table.column("customer_email").is_none(), "PII kept");
        for col in clean.table.columns() {
            assert!(
                col.name
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
                "unnormalized name: {}",
                col.name
            );
        }
    }

    #[test]
    fn test_forward_fill_carries_last_value() {
        let filled = forward_fill(&column("Days for shipping (real)", &["3", "", "", "5", ""]));
        let cells: Vec<&str> = filled.cells.iter().map(|c| c.as_deref().unwrap()).collect();
        assert_eq!(cells, vec!["3", "3", "3", "5", "5"]);
    }

    #[test]
    fn test_forward_fill_leading_gap_numeric_zero() {
        let filled = forward_fill(&column("Sales", &["", "12.5", ""]));
        let cells: Vec<&str> = filled.cells.iter().map(|c| c.as_deref().unwrap()).collect();
        assert_eq!(cells, vec!["0", "12.5", "12.5"]);
    }

    #[test]
    fn test_mode_fill_prefers_most_frequent_then_first_seen() {
        let filled = mode_fill(&column("Shipping Mode", &["First", "Standard", "Standard", ""]));
        assert_eq!(filled.cells[3].as_deref(), Some("Standard"));

        // Tie: "First" and "Standard" both appear once; first occurrence wins.
        let tied = mode_fill(&column("Shipping Mode", &["First", "Standard", ""]));
        assert_eq!(tied.cells[2].as_deref(), Some("First"));
    }

    #[test]
    fn test_fully_missing_column_is_fatal() {
        let raw = Table::new(vec![
            column("Sales", &["1.0", "2.0"]),
            column("Benefit per order", &["", ""]),
        ]);
        let err = cleaner().clean(&raw).unwrap_err();
        match err {
            DataQualityError::EmptyColumn { column } => {
                assert_eq!(column, "benefit_per_order");
            }
            other => panic!("expected EmptyColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_late_flag_imputes_by_mode_not_forward_fill() {
        let raw = Table::new(vec![column(
            "Late_delivery_risk",
            &["0", "0", "1", "", "0"],
        )]);
        let clean = cleaner().clean(&raw).unwrap();
        let cells = &clean.table.column("late_delivery_risk").unwrap().cells;
        // Forward-fill would carry the preceding "1"; the majority value
        // is "0".
        assert_eq!(cells[3].as_deref(), Some("0"));
    }

    #[test]
    fn test_outliers_flagged_never_removed() {
        let raw = Table::new(vec![column(
            "Order Item Quantity",
            &["1", "2", "2", "3", "2", "1", "3", "2", "50"],
        )]);
        let clean = cleaner().clean(&raw).unwrap();

        let flags = clean.outlier_flags.get("order_item_quantity").unwrap();
        assert_eq!(flags.len(), 9);
        assert!(flags[8], "50 should sit outside the IQR fences");
        assert_eq!(flags.iter().filter(|f| **f).count(), 1);
        // The value itself survives.
        assert_eq!(
            clean.table.cell("order_item_quantity", 8),
            Some("50")
        );
    }

    #[test]
    fn test_categorical_columns_have_no_outlier_flags() {
        let raw = Table::new(vec![column("Order Region", &["East", "West"])]);
        let clean = cleaner().clean(&raw).unwrap();
        assert!(clean.outlier_flags.is_empty());
    }

    #[test]
    fn test_empty_table_is_fatal() {
        let raw = Table::new(vec![]);
        assert!(matches!(
            cleaner().clean(&raw),
            Err(DataQualityError::NoRows)
        ));
    }

    #[test]
    fn test_raw_table_untouched() {
        let raw = Table::new(vec![column("Sales", &["1.0", ""])]);
        let before = raw.clone();
        let _ = cleaner().clean(&raw).unwrap();
        assert_eq!(raw, before);
    }
}
