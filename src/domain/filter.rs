//! Filter selections over the enriched table.
//!
//! A selection is an immutable value created per user interaction and passed
//! explicitly into the aggregator, so every recomputation is reproducible
//! without a live UI.

use crate::domain::order::EnrichedRecord;
use serde::Serialize;
use std::fmt;

/// One selectable dimension: everything, or an exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub enum DimensionFilter {
    #[default]
    All,
    Only(String),
}

impl DimensionFilter {
    pub fn admits(&self, value: &str) -> bool {
        match self {
            DimensionFilter::All => true,
            DimensionFilter::Only(wanted) => wanted == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, DimensionFilter::All)
    }
}

impl fmt::Display for DimensionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionFilter::All => write!(f, "All"),
            DimensionFilter::Only(value) => write!(f, "{value}"),
        }
    }
}

/// The active (region, category, segment) selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FilterSelection {
    pub region: DimensionFilter,
    pub category: DimensionFilter,
    pub segment: DimensionFilter,
}

impl FilterSelection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, record: &EnrichedRecord) -> bool {
        self.region.admits(&record.region)
            && self.category.admits(&record.category)
            && self.segment.admits(&record.segment)
    }

    pub fn is_unfiltered(&self) -> bool {
        self.region.is_all() && self.category.is_all() && self.segment.is_all()
    }
}
