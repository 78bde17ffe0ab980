//! Sidebar filter controls: one combo box per dimension, each defaulting
//! to All. Produces a fresh `FilterSelection`; nothing here mutates shared
//! state.

use crate::domain::filter::{DimensionFilter, FilterSelection};
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// Distinct values per filterable dimension, computed once at startup.
pub struct FilterDimensions {
    pub regions: Vec<String>,
    pub categories: Vec<String>,
    pub segments: Vec<String>,
}

pub fn render_filter_panel(
    ui: &mut egui::Ui,
    dimensions: &FilterDimensions,
    filter: &mut FilterSelection,
    matching_rows: usize,
) {
    ui.add_space(DesignSystem::SPACING_SMALL);
    ui.heading("Filters");
    ui.add_space(DesignSystem::SPACING_MEDIUM);

    dimension_combo(ui, "Order region", &dimensions.regions, &mut filter.region);
    dimension_combo(
        ui,
        "Product category",
        &dimensions.categories,
        &mut filter.category,
    );
    dimension_combo(
        ui,
        "Customer segment",
        &dimensions.segments,
        &mut filter.segment,
    );

    ui.add_space(DesignSystem::SPACING_MEDIUM);
    ui.separator();
    ui.add_space(DesignSystem::SPACING_SMALL);
    ui.label(
        egui::RichText::new(format!("Matching rows: {matching_rows}"))
            .color(DesignSystem::TEXT_SECONDARY),
    );
    if ui.button("Reset filters").clicked() {
        *filter = FilterSelection::all();
    }
}

fn dimension_combo(
    ui: &mut egui::Ui,
    label: &str,
    values: &[String],
    selected: &mut DimensionFilter,
) {
    ui.label(
        egui::RichText::new(label)
            .small()
            .color(DesignSystem::TEXT_MUTED),
    );
    egui::ComboBox::from_id_salt(label)
        .width(180.0)
        .selected_text(selected.to_string())
        .show_ui(ui, |ui| {
            ui.selectable_value(selected, DimensionFilter::All, "All");
            for value in values {
                ui.selectable_value(
                    selected,
                    DimensionFilter::Only(value.clone()),
                    value,
                );
            }
        });
    ui.add_space(DesignSystem::SPACING_SMALL);
}
