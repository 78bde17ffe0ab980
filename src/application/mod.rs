// KPI aggregation under the active filter
pub mod kpi;

// Data cleaning and feature derivation
pub mod pipeline;

// Hypothesis tests and distribution fits
pub mod stats;
