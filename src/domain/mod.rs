// Analysis result types (hypothesis tests, distribution fits)
pub mod analysis;

// Domain-specific error types
pub mod errors;

// Filter selections applied to the enriched table
pub mod filter;

// KPI snapshots and grouped summary rows
pub mod metrics;

// Typed order records and the enriched table
pub mod order;

// Dataset schema: column roles, naming, imputation policy
pub mod schema;

// Column-oriented raw/clean table model
pub mod table;
