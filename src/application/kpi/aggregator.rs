//! KPI and grouped-summary computation under the active filter.
//!
//! Purely functional: the enriched table and the filter selection go in, a
//! fresh snapshot and fresh summary tables come out. Grouping runs over
//! `BTreeMap`s so every table is ordered the same way run to run.

use crate::application::stats::descriptive;
use crate::config::AnalyticsConfig;
use crate::domain::filter::FilterSelection;
use crate::domain::metrics::{
    DelayPocket, GroupedSummaries, KpiSnapshot, LeadTimeBucket, MetricValue, MonthlyTrendRow,
    ProfitabilityRow, RegionModeLeadTime, RegionProfitRow, RiskCorridor, RiskMatrixCell,
};
use crate::domain::order::{EnrichedRecord, EnrichedTable};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

pub struct Aggregator {
    percentile_level: f64,
    min_corridor_support: usize,
}

impl Aggregator {
    pub fn new(analytics: &AnalyticsConfig) -> Self {
        Self {
            percentile_level: analytics.percentile_level,
            min_corridor_support: analytics.min_corridor_support,
        }
    }

    /// Computes the snapshot and every grouped table for one filter.
    pub fn aggregate(
        &self,
        table: &EnrichedTable,
        filter: &FilterSelection,
    ) -> (KpiSnapshot, GroupedSummaries) {
        let rows: Vec<&EnrichedRecord> =
            table.records.iter().filter(|r| filter.matches(r)).collect();
        if rows.is_empty() {
            return (KpiSnapshot::empty(), GroupedSummaries::default());
        }

        (self.snapshot(&rows), self.summaries(&rows))
    }

    fn snapshot(&self, rows: &[&EnrichedRecord]) -> KpiSnapshot {
        let lead_times: Vec<f64> = rows
            .iter()
            .filter(|r| !r.date_order_invalid)
            .map(|r| r.lead_time_days as f64)
            .collect();
        let quantities: Vec<f64> = rows.iter().map(|r| r.quantity as f64).collect();

        let late = rows.iter().filter(|r| r.late_delivery).count();
        let late_pct = 100.0 * late as f64 / rows.len() as f64;

        let p90_lead = descriptive::percentile(&lead_times, self.percentile_level);
        let p90_quantity = descriptive::percentile(&quantities, self.percentile_level);

        KpiSnapshot {
            rows: rows.len(),
            total_sales: rows.iter().map(|r| r.sales).sum(),
            total_profit: rows.iter().map(|r| r.profit).sum(),
            avg_lead_time_days: MetricValue::from_option(descriptive::mean(&lead_times)),
            late_delivery_pct: MetricValue::Value(late_pct),
            p90_lead_time_days: MetricValue::from_option(p90_lead),
            p90_quantity: MetricValue::from_option(p90_quantity),
            high_risk_corridor: self.high_risk_corridor(rows),
            stockout_risk: MetricValue::from_option(self.stockout_risk(rows, p90_lead)),
        }
    }

    /// The (region, segment) pair with the highest late rate among pairs
    /// with enough rows to be meaningful. `BTreeMap` iteration plus a
    /// strictly-greater comparison makes ties resolve to the
    /// lexicographically smallest pair.
    fn high_risk_corridor(&self, rows: &[&EnrichedRecord]) -> Option<RiskCorridor> {
        let mut pairs: BTreeMap<(&str, &str), (usize, usize)> = BTreeMap::new();
        for record in rows {
            let entry = pairs
                .entry((record.region.as_str(), record.segment.as_str()))
                .or_default();
            entry.0 += usize::from(record.late_delivery);
            entry.1 += 1;
        }

        let mut best: Option<RiskCorridor> = None;
        for ((region, segment), (late, total)) in pairs {
            if total < self.min_corridor_support {
                continue;
            }
            let late_rate = late as f64 / total as f64;
            if best.as_ref().is_none_or(|b| late_rate > b.late_rate) {
                best = Some(RiskCorridor {
                    region: region.to_string(),
                    segment: segment.to_string(),
                    late_rate,
                    orders: total,
                });
            }
        }
        best
    }

    /// Share of rows whose quantity exceeds the safety-stock threshold:
    /// 90th-percentile lead time times average daily demand, where daily
    /// demand is total quantity over the distinct order dates in view.
    fn stockout_risk(&self, rows: &[&EnrichedRecord], p90_lead: Option<f64>) -> Option<f64> {
        let p90_lead = p90_lead?;
        let total_quantity: u64 = rows.iter().map(|r| u64::from(r.quantity)).sum();
        let days: BTreeSet<NaiveDate> = rows.iter().map(|r| r.order_date).collect();
        if days.is_empty() {
            return None;
        }

        let daily_demand = total_quantity as f64 / days.len() as f64;
        let threshold = p90_lead * daily_demand;
        let exceeding = rows
            .iter()
            .filter(|r| f64::from(r.quantity) > threshold)
            .count();
        Some(exceeding as f64 / rows.len() as f64)
    }

    fn summaries(&self, rows: &[&EnrichedRecord]) -> GroupedSummaries {
        GroupedSummaries {
            monthly_trend: monthly_trend(rows),
            lead_time_distribution: lead_time_distribution(rows),
            risk_matrix: risk_matrix(rows),
            region_mode_lead_times: region_mode_lead_times(rows),
            profitability: profitability(rows),
            region_profit: region_profit(rows),
            delay_pockets: delay_pockets(rows),
        }
    }
}

fn decimal_mean(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(count)
    }
}

fn monthly_trend(rows: &[&EnrichedRecord]) -> Vec<MonthlyTrendRow> {
    let mut months: BTreeMap<u32, (Decimal, Vec<f64>, usize)> = BTreeMap::new();
    for record in rows {
        let entry = months
            .entry(record.order_month)
            .or_insert((Decimal::ZERO, Vec::new(), 0));
        entry.0 += record.sales;
        if !record.date_order_invalid {
            entry.1.push(record.lead_time_days as f64);
        }
        entry.2 += 1;
    }
    months
        .into_iter()
        .map(|(month, (total_sales, lead_times, orders))| MonthlyTrendRow {
            month,
            total_sales,
            avg_lead_time: descriptive::mean(&lead_times).unwrap_or(0.0),
            orders,
        })
        .collect()
}

fn lead_time_distribution(rows: &[&EnrichedRecord]) -> Vec<LeadTimeBucket> {
    let mut buckets: BTreeMap<i64, usize> = BTreeMap::new();
    for record in rows.iter().filter(|r| !r.date_order_invalid) {
        *buckets.entry(record.lead_time_days).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|(days, orders)| LeadTimeBucket { days, orders })
        .collect()
}

fn risk_matrix(rows: &[&EnrichedRecord]) -> Vec<RiskMatrixCell> {
    let mut cells: BTreeMap<(&str, &str), (usize, usize)> = BTreeMap::new();
    for record in rows {
        let entry = cells
            .entry((record.region.as_str(), record.category.as_str()))
            .or_default();
        entry.0 += usize::from(record.late_delivery);
        entry.1 += 1;
    }
    cells
        .into_iter()
        .map(|((region, category), (late, total))| RiskMatrixCell {
            region: region.to_string(),
            category: category.to_string(),
            late_rate: late as f64 / total as f64,
            orders: total,
        })
        .collect()
}

fn region_mode_lead_times(rows: &[&EnrichedRecord]) -> Vec<RegionModeLeadTime> {
    let mut groups: BTreeMap<(&str, &str), (Vec<f64>, usize)> = BTreeMap::new();
    for record in rows {
        let entry = groups
            .entry((record.region.as_str(), record.shipping_mode.as_str()))
            .or_default();
        if !record.date_order_invalid {
            entry.0.push(record.lead_time_days as f64);
        }
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|((region, shipping_mode), (lead_times, orders))| RegionModeLeadTime {
            region: region.to_string(),
            shipping_mode: shipping_mode.to_string(),
            avg_lead_time: descriptive::mean(&lead_times).unwrap_or(0.0),
            orders,
        })
        .collect()
}

fn profitability(rows: &[&EnrichedRecord]) -> Vec<ProfitabilityRow> {
    let mut groups: BTreeMap<(&str, &str), (Decimal, Decimal, usize)> = BTreeMap::new();
    for record in rows {
        let entry = groups
            .entry((record.category.as_str(), record.segment.as_str()))
            .or_default();
        entry.0 += record.sales;
        entry.1 += record.profit;
        entry.2 += 1;
    }
    let mut out: Vec<ProfitabilityRow> = groups
        .into_iter()
        .map(
            |((category, segment), (total_sales, total_profit, orders))| ProfitabilityRow {
                category: category.to_string(),
                segment: segment.to_string(),
                total_sales,
                total_profit,
                avg_margin: decimal_mean(total_profit, orders),
                orders,
            },
        )
        .collect();
    // Highest-revenue pairs first; grouping order breaks exact ties.
    out.sort_by(|a, b| b.total_sales.cmp(&a.total_sales));
    out
}

fn region_profit(rows: &[&EnrichedRecord]) -> Vec<RegionProfitRow> {
    let mut groups: BTreeMap<&str, (Decimal, Decimal, usize)> = BTreeMap::new();
    for record in rows {
        let entry = groups.entry(record.region.as_str()).or_default();
        entry.0 += record.sales;
        entry.1 += record.profit;
        entry.2 += 1;
    }
    groups
        .into_iter()
        .map(|(region, (total_sales, total_profit, orders))| RegionProfitRow {
            region: region.to_string(),
            total_sales,
            total_profit,
            avg_profit_per_order: decimal_mean(total_profit, orders),
        })
        .collect()
}

fn delay_pockets(rows: &[&EnrichedRecord]) -> Vec<DelayPocket> {
    let mut groups: BTreeMap<(&str, &str), (Decimal, usize, Vec<f64>, usize)> = BTreeMap::new();
    for record in rows {
        let entry = groups
            .entry((record.region.as_str(), record.shipping_mode.as_str()))
            .or_default();
        entry.0 += record.sales;
        entry.1 += usize::from(record.late_delivery);
        if !record.date_order_invalid {
            entry.2.push(record.lead_time_days as f64);
        }
        entry.3 += 1;
    }
    let mut out: Vec<DelayPocket> = groups
        .into_iter()
        .map(
            |((region, shipping_mode), (total_sales, late, lead_times, total))| DelayPocket {
                region: region.to_string(),
                shipping_mode: shipping_mode.to_string(),
                total_sales,
                late_rate: late as f64 / total as f64,
                avg_lead_time: descriptive::mean(&lead_times).unwrap_or(0.0),
            },
        )
        .collect();
    // Worst late rate first, then revenue at stake.
    out.sort_by(|a, b| {
        b.late_rate
            .total_cmp(&a.late_rate)
            .then(b.total_sales.cmp(&a.total_sales))
    });
    out
}
