use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Errors that make the dataset unusable for analysis.
///
/// Raised during pipeline construction; any of these halts the load and is
/// surfaced to the user as a load failure.
#[derive(Debug, Error)]
pub enum DataQualityError {
    #[error("Column '{column}' is entirely missing; no fill value can be derived")]
    EmptyColumn { column: String },

    #[error("Required column '{column}' not found after cleaning")]
    MissingColumn { column: String },

    #[error("Dataset contains no data rows")]
    NoRows,
}

/// A shipment whose shipping date precedes its order date.
///
/// Recorded per offending row and carried in the enrichment report. The row
/// itself stays in the table, flagged, so totals remain auditable.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("Order {order_id}: shipping date {shipping_date} precedes order date {order_date}")]
pub struct DateOrderViolation {
    pub order_id: String,
    pub order_date: NaiveDate,
    pub shipping_date: NaiveDate,
}
