pub mod dashboard_components;
pub mod design_system;
pub mod filter_panel;
pub mod ui;
pub mod view_models;
