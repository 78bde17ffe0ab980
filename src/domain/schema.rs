//! Dataset schema: the columns the pipeline relies on, how their names are
//! normalized, and how missing values in them are filled.
//!
//! The raw export carries ~53 columns with inconsistent headers like
//! `order date (DateOrders)`. Everything downstream of the cleaner addresses
//! columns by their normalized name, and the retained analytic columns are
//! declared here so a missing or renamed column fails the load once, loudly,
//! instead of scattering lookup errors through the aggregations.

use crate::domain::errors::DataQualityError;
use crate::domain::table::Table;
use serde::Serialize;

/// How missing cells in a column are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImputePolicy {
    /// Carry the last known value forward (time-ordered and numeric fields).
    ForwardFill,
    /// Most frequent value (categorical fields, including 0/1-coded flags).
    Mode,
}

/// Analytic role of a retained column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    OrderId,
    OrderDate,
    ShippingDate,
    Region,
    Category,
    Segment,
    ShippingMode,
    Quantity,
    Sales,
    Profit,
    LateFlag,
    RealShippingDays,
}

/// A column the pipeline retains, keyed by its normalized name.
#[derive(Debug, Clone, Copy)]
pub struct SchemaColumn {
    pub role: ColumnRole,
    pub name: &'static str,
    pub policy: ImputePolicy,
}

/// The retained analytic columns, in dataset order.
///
/// `late_delivery_risk` is numeric-coded but categorical in meaning, so it
/// imputes by mode rather than forward-fill.
pub const RETAINED_COLUMNS: &[SchemaColumn] = &[
    SchemaColumn {
        role: ColumnRole::OrderId,
        name: "order_id",
        policy: ImputePolicy::ForwardFill,
    },
    SchemaColumn {
        role: ColumnRole::OrderDate,
        name: "order_date_dateorders",
        policy: ImputePolicy::ForwardFill,
    },
    SchemaColumn {
        role: ColumnRole::ShippingDate,
        name: "shipping_date_dateorders",
        policy: ImputePolicy::ForwardFill,
    },
    SchemaColumn {
        role: ColumnRole::Region,
        name: "order_region",
        policy: ImputePolicy::Mode,
    },
    SchemaColumn {
        role: ColumnRole::Category,
        name: "category_name",
        policy: ImputePolicy::Mode,
    },
    SchemaColumn {
        role: ColumnRole::Segment,
        name: "customer_segment",
        policy: ImputePolicy::Mode,
    },
    SchemaColumn {
        role: ColumnRole::ShippingMode,
        name: "shipping_mode",
        policy: ImputePolicy::Mode,
    },
    SchemaColumn {
        role: ColumnRole::Quantity,
        name: "order_item_quantity",
        policy: ImputePolicy::ForwardFill,
    },
    SchemaColumn {
        role: ColumnRole::Sales,
        name: "sales",
        policy: ImputePolicy::ForwardFill,
    },
    SchemaColumn {
        role: ColumnRole::Profit,
        name: "order_profit_per_order",
        policy: ImputePolicy::ForwardFill,
    },
    SchemaColumn {
        role: ColumnRole::LateFlag,
        name: "late_delivery_risk",
        policy: ImputePolicy::Mode,
    },
    SchemaColumn {
        role: ColumnRole::RealShippingDays,
        name: "days_for_shipping_real",
        policy: ImputePolicy::ForwardFill,
    },
];

/// Personally-identifying or unused columns, dropped before any analysis.
/// Normalized names.
pub const DROPPED_COLUMNS: &[&str] = &[
    "customer_password",
    "customer_street",
    "customer_zipcode",
    "order_zipcode",
    "customer_email",
    "customer_fname",
    "customer_lname",
    "product_image",
    "product_description",
    "product_card_id",
];

/// Normalizes a raw column header: lowercase, punctuation stripped,
/// whitespace to underscores, runs collapsed. Idempotent.
pub fn normalize_column_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;
    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '_' {
            pending_separator = true;
        }
        // Other punctuation is dropped without forcing a separator, so
        // "(DateOrders)" becomes "dateorders", not "_dateorders_".
    }
    out
}

/// Looks up the declared schema column for a normalized name.
pub fn schema_column(name: &str) -> Option<&'static SchemaColumn> {
    RETAINED_COLUMNS.iter().find(|c| c.name == name)
}

/// True if the normalized name is on the drop list.
pub fn is_dropped(name: &str) -> bool {
    DROPPED_COLUMNS.contains(&name)
}

/// Verifies every retained column exists in the cleaned table.
///
/// Returns the first missing column as a single load-time error.
pub fn verify(table: &Table) -> Result<(), DataQualityError> {
    for column in RETAINED_COLUMNS {
        if table.column(column.name).is_none() {
            return Err(DataQualityError::MissingColumn {
                column: column.name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_dataset_headers() {
        assert_eq!(
            normalize_column_name("order date (DateOrders)"),
            "order_date_dateorders"
        );
        assert_eq!(
            normalize_column_name("Days for shipping (real)"),
            "days_for_shipping_real"
        );
        assert_eq!(normalize_column_name("Late_delivery_risk"), "late_delivery_risk");
        assert_eq!(normalize_column_name("Sales"), "sales");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let headers = [
            "order date (DateOrders)",
            "Order Item Quantity",
            "Benefit per order",
            "  padded   name  ",
            "already_normal_123",
        ];
        for raw in headers {
            let once = normalize_column_name(raw);
            assert_eq!(normalize_column_name(&once), once, "not idempotent: {raw}");
        }
    }

    #[test]
    fn test_normalized_names_match_charset() {
        let once = normalize_column_name("Order Item (Discount) Rate!");
        assert!(once.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        assert!(!once.starts_with('_'));
        assert!(!once.ends_with('_'));
    }

    #[test]
    fn test_retained_names_are_already_normalized() {
        for column in RETAINED_COLUMNS {
            assert_eq!(normalize_column_name(column.name), column.name);
        }
    }

    #[test]
    fn test_late_flag_imputes_by_mode() {
        let column = schema_column("late_delivery_risk").unwrap();
        assert_eq!(column.policy, ImputePolicy::Mode);
    }
}
