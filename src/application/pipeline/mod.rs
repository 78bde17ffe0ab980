//! The startup pipeline: raw table -> cleaned table -> enriched table.
//!
//! Runs once when the application boots; everything downstream treats the
//! result as read-only.

pub mod cleaner;
pub mod features;

pub use cleaner::{CleanTable, Cleaner};
pub use features::FeatureDeriver;

use crate::config::AnalyticsConfig;
use crate::domain::errors::DataQualityError;
use crate::domain::order::EnrichedTable;
use crate::domain::table::Table;
use tracing::info;

/// Cleans and enriches a freshly loaded raw table.
pub fn build_enriched_table(
    raw: &Table,
    analytics: &AnalyticsConfig,
) -> Result<EnrichedTable, DataQualityError> {
    let clean = Cleaner::new(analytics.iqr_multiplier).clean(raw)?;
    let enriched = FeatureDeriver::enrich(&clean)?;
    info!(
        rows = enriched.len(),
        violations = enriched.report.violations.len(),
        "pipeline ready"
    );
    Ok(enriched)
}
