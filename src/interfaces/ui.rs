//! The dashboard application shell: filter sidebar, three presentation
//! tabs, and the per-filter recomputation hook.
//!
//! The enriched table is built once at startup and never mutated here; the
//! only state the UI owns is the active filter and the tab selection.

use crate::application::kpi::Aggregator;
use crate::domain::analysis::TestResult;
use crate::domain::filter::FilterSelection;
use crate::domain::order::{EnrichedRecord, EnrichedTable};
use crate::interfaces::dashboard_components::{
    operations_view, profitability_view, summary_view,
};
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::filter_panel::{self, FilterDimensions};
use crate::interfaces::view_models::dashboard_view_model::DashboardViewModel;
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Summary,
    Operations,
    Profitability,
}

pub struct DashboardApp {
    table: EnrichedTable,
    aggregator: Aggregator,
    test_results: Vec<TestResult>,
    dimensions: FilterDimensions,
    filter: FilterSelection,
    view_model: DashboardViewModel,
    active_tab: Tab,
}

impl DashboardApp {
    pub fn new(
        table: EnrichedTable,
        aggregator: Aggregator,
        test_results: Vec<TestResult>,
    ) -> Self {
        let dimensions = FilterDimensions {
            regions: table.regions(),
            categories: table.categories(),
            segments: table.segments(),
        };
        Self {
            table,
            aggregator,
            test_results,
            dimensions,
            filter: FilterSelection::all(),
            view_model: DashboardViewModel::default(),
            active_tab: Tab::Summary,
        }
    }

    fn preview_rows(&self) -> Vec<&EnrichedRecord> {
        self.table
            .records
            .iter()
            .filter(|r| self.filter.matches(r))
            .take(20)
            .collect()
    }
}

pub fn apply_theme(ctx: &egui::Context) {
    ctx.set_visuals(DesignSystem::theme());
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Shipsight");
                ui.separator();
                ui.label(
                    egui::RichText::new("Order-fulfillment analytics")
                        .color(DesignSystem::TEXT_SECONDARY),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let flagged = self.table.report.violations.len();
                    if flagged > 0 {
                        ui.label(
                            egui::RichText::new(format!("{flagged} flagged date pairs"))
                                .small()
                                .color(DesignSystem::WARNING),
                        );
                    }
                    ui.label(
                        egui::RichText::new(format!("{} records", self.table.len()))
                            .small()
                            .color(DesignSystem::TEXT_MUTED),
                    );
                });
            });
        });

        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(false)
            .show(ctx, |ui| {
                filter_panel::render_filter_panel(
                    ui,
                    &self.dimensions,
                    &mut self.filter,
                    self.view_model.snapshot.rows,
                );
            });

        // One synchronous pass per filter change; cached otherwise.
        self.view_model
            .ensure(&self.table, &self.aggregator, &self.filter);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                for (tab, label) in [
                    (Tab::Summary, "Executive Summary"),
                    (Tab::Operations, "Operations & Risk"),
                    (Tab::Profitability, "Profitability"),
                ] {
                    if ui
                        .selectable_label(self.active_tab == tab, label)
                        .clicked()
                    {
                        self.active_tab = tab;
                    }
                }
            });
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| match self.active_tab {
                Tab::Summary => {
                    let preview = self.preview_rows();
                    summary_view::render(
                        ui,
                        &self.view_model.snapshot,
                        &self.view_model.summaries,
                        &preview,
                    );
                }
                Tab::Operations => {
                    operations_view::render(ui, &self.view_model.summaries, &self.test_results);
                }
                Tab::Profitability => {
                    profitability_view::render(ui, &self.view_model.summaries);
                }
            });
        });
    }
}
