//! KPI snapshots and the grouped summary rows behind each chart and table.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// A numeric KPI, or the sentinel shown when no rows match the filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum MetricValue {
    Value(f64),
    NotAvailable,
}

impl MetricValue {
    pub fn from_option(value: Option<f64>) -> Self {
        match value {
            Some(v) => MetricValue::Value(v),
            None => MetricValue::NotAvailable,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            MetricValue::Value(v) => Some(*v),
            MetricValue::NotAvailable => None,
        }
    }

    /// Fixed-precision rendering for cards and reports.
    pub fn display(&self, decimals: usize) -> String {
        match self {
            MetricValue::Value(v) => format!("{v:.decimals$}"),
            MetricValue::NotAvailable => "N/A".to_string(),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display(2))
    }
}

/// The (region, segment) pair with the worst late-delivery rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskCorridor {
    pub region: String,
    pub segment: String,
    pub late_rate: f64,
    pub orders: usize,
}

/// Headline metrics for the current filter. Rebuilt from scratch on every
/// filter change; never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSnapshot {
    pub rows: usize,
    pub total_sales: Decimal,
    pub total_profit: Decimal,
    pub avg_lead_time_days: MetricValue,
    pub late_delivery_pct: MetricValue,
    pub p90_lead_time_days: MetricValue,
    pub p90_quantity: MetricValue,
    pub high_risk_corridor: Option<RiskCorridor>,
    pub stockout_risk: MetricValue,
}

impl KpiSnapshot {
    /// Sentinel snapshot for an empty filter result.
    pub fn empty() -> Self {
        Self {
            rows: 0,
            total_sales: Decimal::ZERO,
            total_profit: Decimal::ZERO,
            avg_lead_time_days: MetricValue::NotAvailable,
            late_delivery_pct: MetricValue::NotAvailable,
            p90_lead_time_days: MetricValue::NotAvailable,
            p90_quantity: MetricValue::NotAvailable,
            high_risk_corridor: None,
            stockout_risk: MetricValue::NotAvailable,
        }
    }
}

/// Monthly aggregate for the Executive Summary trend charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrendRow {
    pub month: u32,
    pub total_sales: Decimal,
    pub avg_lead_time: f64,
    pub orders: usize,
}

/// One bar of the lead-time histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadTimeBucket {
    pub days: i64,
    pub orders: usize,
}

/// Late-delivery rate for one (region, category) cell of the risk matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskMatrixCell {
    pub region: String,
    pub category: String,
    pub late_rate: f64,
    pub orders: usize,
}

/// Average lead time per (region, shipping mode).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionModeLeadTime {
    pub region: String,
    pub shipping_mode: String,
    pub avg_lead_time: f64,
    pub orders: usize,
}

/// Sales and profit per (category, segment).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfitabilityRow {
    pub category: String,
    pub segment: String,
    pub total_sales: Decimal,
    pub total_profit: Decimal,
    pub avg_margin: Decimal,
    pub orders: usize,
}

/// Sales and profit rolled up by region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionProfitRow {
    pub region: String,
    pub total_sales: Decimal,
    pub total_profit: Decimal,
    pub avg_profit_per_order: Decimal,
}

/// High-revenue, high-delay (region, shipping mode) pocket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelayPocket {
    pub region: String,
    pub shipping_mode: String,
    pub total_sales: Decimal,
    pub late_rate: f64,
    pub avg_lead_time: f64,
}

/// Every grouped table the presentation tabs consume, for one filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupedSummaries {
    pub monthly_trend: Vec<MonthlyTrendRow>,
    pub lead_time_distribution: Vec<LeadTimeBucket>,
    pub risk_matrix: Vec<RiskMatrixCell>,
    pub region_mode_lead_times: Vec<RegionModeLeadTime>,
    pub profitability: Vec<ProfitabilityRow>,
    pub region_profit: Vec<RegionProfitRow>,
    pub delay_pockets: Vec<DelayPocket>,
}
