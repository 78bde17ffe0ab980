//! Typed shipment records extracted from the cleaned table.

use crate::domain::errors::DateOrderViolation;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;

/// One shipment with its derived fields and quality flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    pub order_id: String,
    pub order_date: NaiveDate,
    pub shipping_date: NaiveDate,
    pub region: String,
    pub category: String,
    pub segment: String,
    pub shipping_mode: String,
    pub quantity: u32,
    pub sales: Decimal,
    pub profit: Decimal,
    pub late_delivery: bool,
    /// Whole days between ordering and shipping, never negative. When the
    /// raw dates are inverted this falls back to the carrier's realized
    /// shipping days and the record is flagged.
    pub lead_time_days: i64,
    /// Calendar month of the order date (1..=12), year-independent.
    pub order_month: u32,
    pub date_order_invalid: bool,
    pub quantity_outlier: bool,
    pub sales_outlier: bool,
    pub profit_outlier: bool,
}

/// Rows the deriver could not fully type plus every date-order violation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnrichmentReport {
    pub violations: Vec<DateOrderViolation>,
    pub unparseable_rows: usize,
}

/// The read-only table every downstream consumer works from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedTable {
    pub records: Vec<EnrichedRecord>,
    pub report: EnrichmentReport,
}

impl EnrichedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct sorted values of a dimension, for filter controls.
    fn distinct(&self, pick: impl Fn(&EnrichedRecord) -> &str) -> Vec<String> {
        let set: BTreeSet<&str> = self.records.iter().map(|r| pick(r)).collect();
        set.into_iter().map(String::from).collect()
    }

    pub fn regions(&self) -> Vec<String> {
        self.distinct(|r| &r.region)
    }

    pub fn categories(&self) -> Vec<String> {
        self.distinct(|r| &r.category)
    }

    pub fn segments(&self) -> Vec<String> {
        self.distinct(|r| &r.segment)
    }

    pub fn shipping_modes(&self) -> Vec<String> {
        self.distinct(|r| &r.shipping_mode)
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use rust_decimal_macros::dec;

    /// A plain valid record for unit tests; tweak fields as needed.
    pub fn record(region: &str, segment: &str, late: bool) -> EnrichedRecord {
        EnrichedRecord {
            order_id: "1".to_string(),
            order_date: NaiveDate::from_ymd_opt(2017, 5, 2).unwrap(),
            shipping_date: NaiveDate::from_ymd_opt(2017, 5, 6).unwrap(),
            region: region.to_string(),
            category: "Fitness".to_string(),
            segment: segment.to_string(),
            shipping_mode: "Standard Class".to_string(),
            quantity: 2,
            sales: dec!(327.50),
            profit: dec!(91.20),
            late_delivery: late,
            lead_time_days: 4,
            order_month: 5,
            date_order_invalid: false,
            quantity_outlier: false,
            sales_outlier: false,
            profit_outlier: false,
        }
    }
}
