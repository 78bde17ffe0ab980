//! Profitability tab: category/segment revenue table, per-region rollup,
//! and the high-revenue high-delay pockets.

use crate::domain::metrics::GroupedSummaries;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

const TOP_ROWS: usize = 15;

pub fn render(ui: &mut egui::Ui, summaries: &GroupedSummaries) {
    ui.add_space(DesignSystem::SPACING_SMALL);
    ui.heading(format!("Top {TOP_ROWS} category x segment by sales"));
    ui.add_space(DesignSystem::SPACING_SMALL);
    render_profitability_table(ui, summaries);

    ui.add_space(DesignSystem::SPACING_MEDIUM);
    ui.columns(2, |columns| {
        render_region_table(&mut columns[0], summaries);
        render_delay_pockets(&mut columns[1], summaries);
    });
}

fn render_profitability_table(ui: &mut egui::Ui, summaries: &GroupedSummaries) {
    egui::Grid::new("profitability_grid")
        .striped(true)
        .min_col_width(100.0)
        .show(ui, |ui| {
            for header in [
                "Category",
                "Segment",
                "Total sales",
                "Total profit",
                "Avg margin",
                "Orders",
            ] {
                ui.label(
                    egui::RichText::new(header)
                        .strong()
                        .color(DesignSystem::TEXT_SECONDARY),
                );
            }
            ui.end_row();
            for row in summaries.profitability.iter().take(TOP_ROWS) {
                ui.label(&row.category);
                ui.label(&row.segment);
                ui.label(format!("{:.2}", row.total_sales));
                let profit = egui::RichText::new(format!("{:.2}", row.total_profit));
                ui.label(if row.total_profit.is_sign_negative() {
                    profit.color(DesignSystem::DANGER)
                } else {
                    profit.color(DesignSystem::SUCCESS)
                });
                ui.label(format!("{:.2}", row.avg_margin));
                ui.label(row.orders.to_string());
                ui.end_row();
            }
        });
}

fn render_region_table(ui: &mut egui::Ui, summaries: &GroupedSummaries) {
    ui.heading("Profitability by region");
    ui.add_space(DesignSystem::SPACING_SMALL);
    egui::Grid::new("region_profit_grid")
        .striped(true)
        .show(ui, |ui| {
            for header in ["Region", "Total sales", "Total profit", "Avg profit/order"] {
                ui.label(
                    egui::RichText::new(header)
                        .strong()
                        .color(DesignSystem::TEXT_SECONDARY),
                );
            }
            ui.end_row();
            for row in &summaries.region_profit {
                ui.label(&row.region);
                ui.label(format!("{:.2}", row.total_sales));
                ui.label(format!("{:.2}", row.total_profit));
                ui.label(format!("{:.2}", row.avg_profit_per_order));
                ui.end_row();
            }
        });
}

fn render_delay_pockets(ui: &mut egui::Ui, summaries: &GroupedSummaries) {
    ui.heading("High revenue, high delay pockets");
    ui.add_space(DesignSystem::SPACING_SMALL);
    egui::Grid::new("delay_pockets_grid")
        .striped(true)
        .show(ui, |ui| {
            for header in ["Region", "Shipping mode", "Total sales", "Late rate", "Avg lead (d)"] {
                ui.label(
                    egui::RichText::new(header)
                        .strong()
                        .color(DesignSystem::TEXT_SECONDARY),
                );
            }
            ui.end_row();
            for pocket in summaries.delay_pockets.iter().take(TOP_ROWS) {
                ui.label(&pocket.region);
                ui.label(&pocket.shipping_mode);
                ui.label(format!("{:.2}", pocket.total_sales));
                let rate = egui::RichText::new(format!("{:.1} %", pocket.late_rate * 100.0));
                ui.label(if pocket.late_rate > 0.5 {
                    rate.color(DesignSystem::WARNING)
                } else {
                    rate
                });
                ui.label(format!("{:.2}", pocket.avg_lead_time));
                ui.end_row();
            }
        });
}
