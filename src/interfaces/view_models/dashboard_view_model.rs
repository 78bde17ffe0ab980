//! Caches the aggregation for the active filter so the UI only recomputes
//! when a combo box actually changes.

use crate::application::kpi::Aggregator;
use crate::domain::filter::FilterSelection;
use crate::domain::metrics::{GroupedSummaries, KpiSnapshot};
use crate::domain::order::EnrichedTable;
use std::time::Instant;
use tracing::debug;

pub struct DashboardViewModel {
    cached_for: Option<FilterSelection>,
    pub snapshot: KpiSnapshot,
    pub summaries: GroupedSummaries,
}

impl Default for DashboardViewModel {
    fn default() -> Self {
        Self {
            cached_for: None,
            snapshot: KpiSnapshot::empty(),
            summaries: GroupedSummaries::default(),
        }
    }
}

impl DashboardViewModel {
    /// Recomputes the snapshot and summaries if `filter` differs from the
    /// one the cache was built for. One synchronous pass per filter change.
    pub fn ensure(
        &mut self,
        table: &EnrichedTable,
        aggregator: &Aggregator,
        filter: &FilterSelection,
    ) {
        if self.cached_for.as_ref() == Some(filter) {
            return;
        }
        let started = Instant::now();
        let (snapshot, summaries) = aggregator.aggregate(table, filter);
        debug!(
            rows = snapshot.rows,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "aggregation refreshed"
        );
        self.snapshot = snapshot;
        self.summaries = summaries;
        self.cached_for = Some(filter.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyticsConfig;
    use crate::domain::filter::DimensionFilter;
    use crate::domain::order::test_support::record;
    use crate::domain::order::EnrichmentReport;

    fn fixture() -> (EnrichedTable, Aggregator) {
        let table = EnrichedTable {
            records: vec![
                record("Oceania", "Consumer", false),
                record("Western Europe", "Corporate", true),
            ],
            report: EnrichmentReport::default(),
        };
        (table, Aggregator::new(&AnalyticsConfig::default()))
    }

    #[test]
    fn test_cache_refreshes_on_filter_change() {
        let (table, aggregator) = fixture();
        let mut vm = DashboardViewModel::default();

        vm.ensure(&table, &aggregator, &FilterSelection::all());
        assert_eq!(vm.snapshot.rows, 2);

        let narrowed = FilterSelection {
            region: DimensionFilter::Only("Oceania".to_string()),
            ..FilterSelection::all()
        };
        vm.ensure(&table, &aggregator, &narrowed);
        assert_eq!(vm.snapshot.rows, 1);

        // Same filter again: cache hit, same data.
        vm.ensure(&table, &aggregator, &narrowed);
        assert_eq!(vm.snapshot.rows, 1);
    }
}
