use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// One KPI tile: muted title, large value, optional sub-line.
pub fn render_metric_card(
    ui: &mut egui::Ui,
    title: &str,
    value: &str,
    subtitle: &str,
    accent: egui::Color32,
) {
    DesignSystem::card_frame().show(ui, |ui| {
        ui.set_min_height(88.0);
        ui.label(
            egui::RichText::new(title)
                .size(12.0)
                .strong()
                .color(DesignSystem::TEXT_MUTED),
        );
        ui.add_space(6.0);
        ui.label(egui::RichText::new(value).size(26.0).strong().color(accent));
        if !subtitle.is_empty() {
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(subtitle)
                    .size(11.0)
                    .color(DesignSystem::TEXT_SECONDARY),
            );
        }
    });
}
