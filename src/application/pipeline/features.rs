//! Feature derivation: turns the cleaned table into typed shipment records
//! with `lead_time_days` and `order_month` attached.

use crate::application::pipeline::cleaner::CleanTable;
use crate::domain::errors::{DataQualityError, DateOrderViolation};
use crate::domain::order::{EnrichedRecord, EnrichedTable, EnrichmentReport};
use crate::domain::schema;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{info, warn};

/// Date layouts seen in the export: `1/31/2018 22:56` and date-only.
const DATE_TIME_FORMAT: &str = "%m/%d/%Y %H:%M";
const DATE_FORMAT: &str = "%m/%d/%Y";

pub struct FeatureDeriver;

impl FeatureDeriver {
    /// Extracts typed records from the cleaned table.
    ///
    /// A shipping date before the order date flags the record and records a
    /// violation; the lead time then falls back to the carrier's realized
    /// shipping days. Rows whose cells cannot be typed at all are counted
    /// and skipped.
    pub fn enrich(clean: &CleanTable) -> Result<EnrichedTable, DataQualityError> {
        schema::verify(&clean.table)?;

        let table = &clean.table;
        let quantity_outliers = clean.outlier_flags.get("order_item_quantity");
        let sales_outliers = clean.outlier_flags.get("sales");
        let profit_outliers = clean.outlier_flags.get("order_profit_per_order");

        let mut records = Vec::with_capacity(table.row_count());
        let mut report = EnrichmentReport::default();

        for row in 0..table.row_count() {
            let Some(parsed) = Self::parse_row(table, row) else {
                report.unparseable_rows += 1;
                continue;
            };
            let (order_id, order_date, shipping_date, quantity, sales, profit, late) = parsed;

            let raw_lead_time = (shipping_date - order_date).num_days();
            let date_order_invalid = raw_lead_time < 0;
            let lead_time_days = if date_order_invalid {
                report.violations.push(DateOrderViolation {
                    order_id: order_id.clone(),
                    order_date,
                    shipping_date,
                });
                Self::realized_days(table, row)
            } else {
                raw_lead_time
            };

            let flag = |flags: Option<&Vec<bool>>| flags.is_some_and(|f| f[row]);
            records.push(EnrichedRecord {
                order_id,
                order_date,
                shipping_date,
                region: table.cell("order_region", row).unwrap_or_default().to_string(),
                category: table.cell("category_name", row).unwrap_or_default().to_string(),
                segment: table
                    .cell("customer_segment", row)
                    .unwrap_or_default()
                    .to_string(),
                shipping_mode: table
                    .cell("shipping_mode", row)
                    .unwrap_or_default()
                    .to_string(),
                quantity,
                sales,
                profit,
                late_delivery: late,
                lead_time_days,
                order_month: order_date.month(),
                date_order_invalid,
                quantity_outlier: flag(quantity_outliers),
                sales_outlier: flag(sales_outliers),
                profit_outlier: flag(profit_outliers),
            });
        }

        if records.is_empty() {
            return Err(DataQualityError::NoRows);
        }
        if !report.violations.is_empty() {
            warn!(
                violations = report.violations.len(),
                "records with shipping before ordering were flagged"
            );
        }
        info!(
            records = records.len(),
            skipped = report.unparseable_rows,
            "enrichment complete"
        );

        Ok(EnrichedTable { records, report })
    }

    #[allow(clippy::type_complexity)]
    fn parse_row(
        table: &crate::domain::table::Table,
        row: usize,
    ) -> Option<(String, NaiveDate, NaiveDate, u32, Decimal, Decimal, bool)> {
        let order_id = table.cell("order_id", row)?.to_string();
        let order_date = parse_date(table.cell("order_date_dateorders", row)?)?;
        let shipping_date = parse_date(table.cell("shipping_date_dateorders", row)?)?;
        let quantity = table
            .cell("order_item_quantity", row)?
            .trim()
            .parse::<f64>()
            .ok()? as u32;
        let sales = parse_money(table.cell("sales", row)?)?;
        let profit = parse_money(table.cell("order_profit_per_order", row)?)?;
        let late = parse_flag(table.cell("late_delivery_risk", row)?);
        Some((order_id, order_date, shipping_date, quantity, sales, profit, late))
    }

    /// Fallback lead time for inverted dates: the carrier-reported shipping
    /// days, floored at zero.
    fn realized_days(table: &crate::domain::table::Table, row: usize) -> i64 {
        table
            .cell("days_for_shipping_real", row)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .map(|v| v.max(0.0) as i64)
            .unwrap_or(0)
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, DATE_TIME_FORMAT)
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(raw, DATE_FORMAT))
        .ok()
}

fn parse_money(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim()).ok()
}

fn parse_flag(raw: &str) -> bool {
    let raw = raw.trim();
    raw == "1" || raw.eq_ignore_ascii_case("true")
}
