//! Operations tab: lead-time distribution, the (region, category) late-risk
//! matrix, lead time by region and shipping mode, and the statistical
//! analysis table.

use crate::domain::analysis::TestResult;
use crate::domain::metrics::GroupedSummaries;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;
use egui_plot::{Bar, BarChart, Plot};

pub fn render(ui: &mut egui::Ui, summaries: &GroupedSummaries, tests: &[TestResult]) {
    ui.add_space(DesignSystem::SPACING_SMALL);
    ui.heading("Lead-time distribution (days)");
    ui.add_space(DesignSystem::SPACING_SMALL);
    render_lead_time_histogram(ui, summaries);

    ui.add_space(DesignSystem::SPACING_MEDIUM);
    ui.columns(2, |columns| {
        render_risk_matrix(&mut columns[0], summaries);
        render_region_mode_table(&mut columns[1], summaries);
    });

    ui.add_space(DesignSystem::SPACING_MEDIUM);
    ui.heading("Statistical analysis");
    ui.add_space(DesignSystem::SPACING_SMALL);
    render_test_table(ui, tests);
}

fn render_lead_time_histogram(ui: &mut egui::Ui, summaries: &GroupedSummaries) {
    let bars: Vec<Bar> = summaries
        .lead_time_distribution
        .iter()
        .map(|bucket| {
            Bar::new(bucket.days as f64, bucket.orders as f64)
                .fill(DesignSystem::ACCENT_PRIMARY)
        })
        .collect();
    Plot::new("lead_time_histogram")
        .height(220.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("Orders", bars));
        });
}

fn render_risk_matrix(ui: &mut egui::Ui, summaries: &GroupedSummaries) {
    ui.heading("Late-delivery risk by region and category");
    ui.add_space(DesignSystem::SPACING_SMALL);
    egui::ScrollArea::vertical()
        .id_salt("risk_matrix_scroll")
        .max_height(280.0)
        .show(ui, |ui| {
            egui::Grid::new("risk_matrix_grid").striped(true).show(ui, |ui| {
                for header in ["Region", "Category", "Late rate", "Orders"] {
                    ui.label(
                        egui::RichText::new(header)
                            .strong()
                            .color(DesignSystem::TEXT_SECONDARY),
                    );
                }
                ui.end_row();
                for cell in &summaries.risk_matrix {
                    ui.label(&cell.region);
                    ui.label(&cell.category);
                    let rate = egui::RichText::new(format!("{:.1} %", cell.late_rate * 100.0));
                    ui.label(if cell.late_rate > 0.5 {
                        rate.color(DesignSystem::DANGER)
                    } else {
                        rate
                    });
                    ui.label(cell.orders.to_string());
                    ui.end_row();
                }
            });
        });
}

fn render_region_mode_table(ui: &mut egui::Ui, summaries: &GroupedSummaries) {
    ui.heading("Lead time by region and shipping mode");
    ui.add_space(DesignSystem::SPACING_SMALL);
    egui::ScrollArea::vertical()
        .id_salt("region_mode_scroll")
        .max_height(280.0)
        .show(ui, |ui| {
            egui::Grid::new("region_mode_grid").striped(true).show(ui, |ui| {
                for header in ["Region", "Shipping mode", "Avg lead (d)", "Orders"] {
                    ui.label(
                        egui::RichText::new(header)
                            .strong()
                            .color(DesignSystem::TEXT_SECONDARY),
                    );
                }
                ui.end_row();
                for row in &summaries.region_mode_lead_times {
                    ui.label(&row.region);
                    ui.label(&row.shipping_mode);
                    ui.label(format!("{:.2}", row.avg_lead_time));
                    ui.label(row.orders.to_string());
                    ui.end_row();
                }
            });
        });
}

fn render_test_table(ui: &mut egui::Ui, tests: &[TestResult]) {
    DesignSystem::card_frame().show(ui, |ui| {
        egui::Grid::new("test_results_grid")
            .striped(true)
            .min_col_width(220.0)
            .show(ui, |ui| {
                for result in tests {
                    ui.label(
                        egui::RichText::new(&result.name).color(DesignSystem::TEXT_PRIMARY),
                    );
                    let line = egui::RichText::new(result.describe());
                    ui.label(if result.is_applicable() {
                        line.color(DesignSystem::TEXT_SECONDARY)
                    } else {
                        line.color(DesignSystem::TEXT_MUTED)
                    });
                    ui.end_row();
                }
            });
    });
}
