//! Executive Summary tab: KPI tiles, monthly trend charts, and a snapshot
//! of the first matching rows.

use crate::domain::metrics::{GroupedSummaries, KpiSnapshot};
use crate::domain::order::EnrichedRecord;
use crate::interfaces::dashboard_components::metrics_card::render_metric_card;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;
use egui_plot::{Legend, Line, Plot};

const SNAPSHOT_ROWS: usize = 20;

pub fn render(
    ui: &mut egui::Ui,
    snapshot: &KpiSnapshot,
    summaries: &GroupedSummaries,
    preview: &[&EnrichedRecord],
) {
    ui.add_space(DesignSystem::SPACING_SMALL);
    ui.columns(4, |columns| {
        render_metric_card(
            &mut columns[0],
            "TOTAL SALES",
            &format!("{:.0}", snapshot.total_sales),
            &format!("{} orders", snapshot.rows),
            DesignSystem::ACCENT_PRIMARY,
        );
        render_metric_card(
            &mut columns[1],
            "TOTAL PROFIT",
            &format!("{:.0}", snapshot.total_profit),
            "",
            DesignSystem::SUCCESS,
        );
        render_metric_card(
            &mut columns[2],
            "AVG LEAD TIME",
            &format!("{} d", snapshot.avg_lead_time_days),
            &format!("p90 {} d", snapshot.p90_lead_time_days),
            DesignSystem::ACCENT_SECONDARY,
        );
        render_metric_card(
            &mut columns[3],
            "LATE DELIVERIES",
            &format!("{} %", snapshot.late_delivery_pct.display(1)),
            &format!("stockout risk {}", snapshot.stockout_risk.display(3)),
            DesignSystem::WARNING,
        );
    });

    ui.add_space(DesignSystem::SPACING_MEDIUM);
    if let Some(corridor) = &snapshot.high_risk_corridor {
        ui.label(
            egui::RichText::new(format!(
                "High-risk corridor: {} / {} ({:.1} % late, {} orders)",
                corridor.region,
                corridor.segment,
                corridor.late_rate * 100.0,
                corridor.orders
            ))
            .color(DesignSystem::DANGER),
        );
        ui.add_space(DesignSystem::SPACING_MEDIUM);
    }

    ui.heading("Monthly trend");
    ui.add_space(DesignSystem::SPACING_SMALL);
    ui.columns(2, |columns| {
        render_sales_trend(&mut columns[0], summaries);
        render_lead_time_trend(&mut columns[1], summaries);
    });

    ui.add_space(DesignSystem::SPACING_MEDIUM);
    ui.heading("Data snapshot");
    ui.add_space(DesignSystem::SPACING_SMALL);
    render_preview_table(ui, preview);
}

fn render_sales_trend(ui: &mut egui::Ui, summaries: &GroupedSummaries) {
    use rust_decimal::prelude::ToPrimitive;
    let points: Vec<[f64; 2]> = summaries
        .monthly_trend
        .iter()
        .map(|row| [row.month as f64, row.total_sales.to_f64().unwrap_or(0.0)])
        .collect();
    Plot::new("monthly_sales")
        .height(240.0)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new("Total sales", points).color(DesignSystem::ACCENT_PRIMARY));
        });
}

fn render_lead_time_trend(ui: &mut egui::Ui, summaries: &GroupedSummaries) {
    let points: Vec<[f64; 2]> = summaries
        .monthly_trend
        .iter()
        .map(|row| [row.month as f64, row.avg_lead_time])
        .collect();
    Plot::new("monthly_lead_time")
        .height(240.0)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new("Avg lead time (d)", points).color(DesignSystem::SUCCESS));
        });
}

fn render_preview_table(ui: &mut egui::Ui, preview: &[&EnrichedRecord]) {
    egui::ScrollArea::both().max_height(260.0).show(ui, |ui| {
        egui::Grid::new("snapshot_grid")
            .striped(true)
            .min_col_width(80.0)
            .show(ui, |ui| {
                for header in [
                    "Order", "Ordered", "Shipped", "Region", "Segment", "Category", "Lead (d)",
                    "Sales", "Profit", "Late",
                ] {
                    ui.label(
                        egui::RichText::new(header)
                            .strong()
                            .color(DesignSystem::TEXT_SECONDARY),
                    );
                }
                ui.end_row();

                for record in preview.iter().take(SNAPSHOT_ROWS) {
                    ui.label(&record.order_id);
                    ui.label(record.order_date.to_string());
                    ui.label(record.shipping_date.to_string());
                    ui.label(&record.region);
                    ui.label(&record.segment);
                    ui.label(&record.category);
                    let lead = egui::RichText::new(record.lead_time_days.to_string());
                    ui.label(if record.date_order_invalid {
                        lead.color(DesignSystem::DANGER)
                    } else {
                        lead
                    });
                    ui.label(format!("{:.2}", record.sales));
                    ui.label(format!("{:.2}", record.profit));
                    ui.label(if record.late_delivery { "yes" } else { "no" });
                    ui.end_row();
                }
            });
    });
}
