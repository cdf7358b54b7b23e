//! Latest-snapshot-per-key resolution
//!
//! The dataset is an irregularly sampled, append-only time series, not a
//! table keyed uniquely by the filter columns. Every lookup therefore
//! resolves a snapshot instant first:
//!
//! 1. observations whose horizon matches the requested one within
//!    tolerance, most recently captured wins;
//! 2. failing that, the observation with the numerically closest horizon,
//!    ties broken by most recent capture;
//! 3. no horizon requested: the latest capture for the key.
//!
//! Missing inputs and empty keys resolve to unavailable results, never
//! errors.

use super::types::{OccupancySummary, PriceSummary, ResolvedSnapshot, SnapshotQuery};
use crate::store::{
    DemandIndex, HoursWindow, ObservationFilter, ObservationStore, PriceObservation,
};
use std::collections::BTreeMap;

/// Resolves snapshot queries against an observation store
pub struct SnapshotResolver<'a> {
    store: &'a dyn ObservationStore,
    hours_tolerance: f64,
}

impl<'a> SnapshotResolver<'a> {
    /// Default tolerance for horizon matching; the stored values are
    /// nominally a small set of discrete hours with floating-point noise
    pub const DEFAULT_HOURS_TOLERANCE: f64 = 0.01;

    pub fn new(store: &'a dyn ObservationStore) -> Self {
        Self::with_tolerance(store, Self::DEFAULT_HOURS_TOLERANCE)
    }

    pub fn with_tolerance(store: &'a dyn ObservationStore, hours_tolerance: f64) -> Self {
        Self {
            store,
            hours_tolerance,
        }
    }

    pub fn store(&self) -> &'a dyn ObservationStore {
        self.store
    }

    pub fn hours_tolerance(&self) -> f64 {
        self.hours_tolerance
    }

    /// Resolve a query to a price summary. With a `seat_type` the key is
    /// `(schedule_id, seat_type)`; without one the schedule is treated as
    /// a single key.
    pub fn resolve(&self, query: &SnapshotQuery) -> PriceSummary {
        match self.resolve_observation(query, query.seat_type.as_deref()) {
            Some(obs) => PriceSummary::from_observation(&obs),
            None => PriceSummary::unavailable(),
        }
    }

    /// Resolve every seat type present at the schedule, each
    /// independently, keyed by seat type
    pub fn resolve_by_seat_type(&self, query: &SnapshotQuery) -> BTreeMap<String, PriceSummary> {
        let Some(schedule_id) = query.schedule_id.as_deref() else {
            return BTreeMap::new();
        };
        self.store
            .seat_types(schedule_id)
            .into_iter()
            .map(|seat_type| {
                let summary = match self.resolve_observation(query, Some(&seat_type)) {
                    Some(obs) => PriceSummary::from_observation(&obs),
                    None => PriceSummary::unavailable(),
                };
                (seat_type, summary)
            })
            .collect()
    }

    /// Occupancy at the resolved snapshot, under the same instant rule
    pub fn resolve_occupancy(&self, query: &SnapshotQuery) -> OccupancySummary {
        match self.resolve_observation(query, query.seat_type.as_deref()) {
            Some(obs) => OccupancySummary {
                actual_occupancy: obs.actual_occupancy,
                expected_occupancy: obs.expected_occupancy,
                resolved_at: Some(obs.captured_at),
            },
            None => OccupancySummary::unavailable(),
        }
    }

    /// Demand index at the resolved snapshot. Non-numeric tier codes are
    /// preserved as-is.
    pub fn resolve_demand_index(&self, query: &SnapshotQuery) -> Option<DemandIndex> {
        self.resolve_observation(query, query.seat_type.as_deref())
            .and_then(|obs| obs.demand_index)
    }

    /// Demand index per seat type, each independently resolved
    pub fn demand_index_by_seat_type(
        &self,
        query: &SnapshotQuery,
    ) -> BTreeMap<String, DemandIndex> {
        let Some(schedule_id) = query.schedule_id.as_deref() else {
            return BTreeMap::new();
        };
        self.store
            .seat_types(schedule_id)
            .into_iter()
            .filter_map(|seat_type| {
                self.resolve_observation(query, Some(&seat_type))
                    .and_then(|obs| obs.demand_index)
                    .map(|index| (seat_type, index))
            })
            .collect()
    }

    /// Resolve the snapshot instant for a key without fetching prices
    pub fn resolve_instant(
        &self,
        query: &SnapshotQuery,
        seat_type: Option<&str>,
    ) -> Option<ResolvedSnapshot> {
        self.resolve_observation(query, seat_type)
            .map(|obs| ResolvedSnapshot {
                captured_at: obs.captured_at,
                hours_before_departure: obs.hours_before_departure,
            })
    }

    pub(crate) fn resolve_observation(
        &self,
        query: &SnapshotQuery,
        seat_type: Option<&str>,
    ) -> Option<PriceObservation> {
        let schedule_id = query.schedule_id.as_deref()?;

        let mut filter = ObservationFilter::for_schedule(schedule_id);
        if let Some(seat_type) = seat_type {
            filter = filter.with_seat_type(seat_type);
        }
        if let Some(journey_date) = query.journey_date {
            filter = filter.with_journey_date(journey_date);
        }

        let Some(target) = query.hours_before_departure else {
            // No horizon requested: latest capture for the key
            return self.store.find(&filter, Some(1)).into_iter().next();
        };

        // Tolerance pass; rows come back captured_at-descending, so the
        // first hit is the most recent one consistent with the horizon
        let window = filter
            .clone()
            .with_hours_window(HoursWindow::new(target, self.hours_tolerance));
        if let Some(hit) = self.store.find(&window, Some(1)).into_iter().next() {
            return Some(hit);
        }

        // Closest-match fallback: minimum horizon distance, ties broken
        // by most recent capture
        self.store
            .find(&filter, None)
            .into_iter()
            .fold(None, |best: Option<PriceObservation>, obs| match best {
                None => Some(obs),
                Some(best) => {
                    let best_diff = (best.hours_before_departure - target).abs();
                    let diff = (obs.hours_before_departure - target).abs();
                    if diff < best_diff
                        || (diff == best_diff && obs.captured_at > best.captured_at)
                    {
                        Some(obs)
                    } else {
                        Some(best)
                    }
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn obs(
        schedule_id: &str,
        seat_type: &str,
        hours: f64,
        minute: u32,
        actual: Option<Decimal>,
        model: Option<Decimal>,
    ) -> PriceObservation {
        PriceObservation {
            schedule_id: schedule_id.to_string(),
            operator_id: None,
            seat_type: seat_type.to_string(),
            captured_at: Utc.with_ymd_and_hms(2025, 7, 31, 8, minute, 0).unwrap(),
            hours_before_departure: hours,
            journey_date: None,
            actual_price: actual,
            model_price: model,
            actual_occupancy: None,
            expected_occupancy: None,
            demand_index: None,
        }
    }

    #[test]
    fn test_tolerance_match_takes_latest_capture() {
        let mut store = MemoryStore::new();
        store.insert(obs("s1", "Semi Cama", 24.004, 0, Some(dec!(90)), Some(dec!(85))));
        store.insert(obs("s1", "Semi Cama", 24.006, 30, Some(dec!(100)), Some(dec!(95))));

        let resolver = SnapshotResolver::new(&store);
        let query = SnapshotQuery::for_schedule("s1")
            .with_seat_type("Semi Cama")
            .at_hours(24.0);
        let summary = resolver.resolve(&query);

        assert_eq!(summary.actual_price, Some(dec!(100)));
        assert_eq!(summary.model_price, Some(dec!(95)));
        assert_eq!(summary.delta, Some(dec!(5)));
        assert_eq!(
            summary.resolved_at,
            Some(Utc.with_ymd_and_hms(2025, 7, 31, 8, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_closest_match_fallback() {
        // Horizons {48.0, 24.01, 0.0}, request 24. The 24.01 row
        // misses the 0.01 tolerance but is the closest match.
        let mut store = MemoryStore::new();
        store.insert(obs("62534293", "Semi Cama", 48.0, 0, Some(dec!(80)), Some(dec!(78))));
        store.insert(obs("62534293", "Semi Cama", 24.01, 10, Some(dec!(100)), Some(dec!(90))));
        store.insert(obs("62534293", "Semi Cama", 0.0, 20, Some(dec!(120)), Some(dec!(118))));

        let resolver = SnapshotResolver::new(&store);
        let query = SnapshotQuery::for_schedule("62534293")
            .with_seat_type("Semi Cama")
            .at_hours(24.0);
        let summary = resolver.resolve(&query);

        assert_eq!(summary.actual_price, Some(dec!(100)));
        assert_eq!(summary.model_price, Some(dec!(90)));
        assert_eq!(summary.delta, Some(dec!(10)));
    }

    #[test]
    fn test_fallback_tie_breaks_by_latest_capture() {
        let mut store = MemoryStore::new();
        store.insert(obs("s1", "Semi Cama", 23.5, 0, Some(dec!(80)), Some(dec!(78))));
        store.insert(obs("s1", "Semi Cama", 24.5, 45, Some(dec!(100)), Some(dec!(90))));

        let resolver = SnapshotResolver::new(&store);
        let query = SnapshotQuery::for_schedule("s1")
            .with_seat_type("Semi Cama")
            .at_hours(24.0);
        let summary = resolver.resolve(&query);

        // Both rows are 0.5 hours away; the later capture wins
        assert_eq!(summary.actual_price, Some(dec!(100)));
    }

    #[test]
    fn test_no_horizon_means_latest() {
        let mut store = MemoryStore::new();
        store.insert(obs("s1", "Semi Cama", 48.0, 0, Some(dec!(80)), Some(dec!(78))));
        store.insert(obs("s1", "Semi Cama", 24.0, 30, Some(dec!(100)), Some(dec!(90))));

        let resolver = SnapshotResolver::new(&store);
        let query = SnapshotQuery::for_schedule("s1").with_seat_type("Semi Cama");
        let summary = resolver.resolve(&query);

        assert_eq!(summary.actual_price, Some(dec!(100)));
    }

    #[test]
    fn test_missing_schedule_id_is_unavailable() {
        let store = MemoryStore::new();
        let resolver = SnapshotResolver::new(&store);
        let summary = resolver.resolve(&SnapshotQuery::default());
        assert!(summary.is_unavailable());
    }

    #[test]
    fn test_unknown_schedule_is_unavailable() {
        let store = MemoryStore::new();
        let resolver = SnapshotResolver::new(&store);
        let summary = resolver.resolve(&SnapshotQuery::for_schedule("missing").at_hours(24.0));
        assert!(summary.is_unavailable());
        assert_eq!(summary.actual_price, None);
        assert_eq!(summary.model_price, None);
        assert_eq!(summary.delta, None);
    }

    #[test]
    fn test_delta_null_propagation() {
        let mut store = MemoryStore::new();
        store.insert(obs("s1", "Semi Cama", 24.0, 0, Some(dec!(100)), None));

        let resolver = SnapshotResolver::new(&store);
        let query = SnapshotQuery::for_schedule("s1")
            .with_seat_type("Semi Cama")
            .at_hours(24.0);
        let summary = resolver.resolve(&query);

        assert_eq!(summary.actual_price, Some(dec!(100)));
        assert_eq!(summary.model_price, None);
        assert_eq!(summary.delta, None);
        assert!(!summary.is_unavailable());
    }

    #[test]
    fn test_resolve_by_seat_type_is_independent() {
        let mut store = MemoryStore::new();
        // Semi Cama has an exact-window hit at minute 10; Salon Cama only
        // has a farther horizon and must fall back independently
        store.insert(obs("s1", "Semi Cama", 24.0, 10, Some(dec!(100)), Some(dec!(95))));
        store.insert(obs("s1", "Salon Cama", 30.0, 40, Some(dec!(150)), Some(dec!(140))));

        let resolver = SnapshotResolver::new(&store);
        let query = SnapshotQuery::for_schedule("s1").at_hours(24.0);
        let by_type = resolver.resolve_by_seat_type(&query);

        assert_eq!(by_type.len(), 2);
        assert_eq!(by_type["Semi Cama"].actual_price, Some(dec!(100)));
        assert_eq!(by_type["Salon Cama"].actual_price, Some(dec!(150)));
        assert_eq!(
            by_type["Semi Cama"].resolved_at,
            Some(Utc.with_ymd_and_hms(2025, 7, 31, 8, 10, 0).unwrap())
        );
        assert_eq!(
            by_type["Salon Cama"].resolved_at,
            Some(Utc.with_ymd_and_hms(2025, 7, 31, 8, 40, 0).unwrap())
        );
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut store = MemoryStore::new();
        store.insert(obs("s1", "Semi Cama", 24.01, 10, Some(dec!(100)), Some(dec!(90))));
        store.insert(obs("s1", "Semi Cama", 48.0, 0, Some(dec!(80)), Some(dec!(78))));

        let resolver = SnapshotResolver::new(&store);
        let query = SnapshotQuery::for_schedule("s1")
            .with_seat_type("Semi Cama")
            .at_hours(24.0);

        assert_eq!(resolver.resolve(&query), resolver.resolve(&query));
    }

    #[test]
    fn test_resolve_occupancy() {
        let mut store = MemoryStore::new();
        let mut row = obs("s1", "Semi Cama", 24.0, 10, Some(dec!(100)), Some(dec!(90)));
        row.actual_occupancy = Some(dec!(62.5));
        row.expected_occupancy = Some(dec!(70));
        store.insert(row);

        let resolver = SnapshotResolver::new(&store);
        let query = SnapshotQuery::for_schedule("s1")
            .with_seat_type("Semi Cama")
            .at_hours(24.0);
        let occupancy = resolver.resolve_occupancy(&query);

        assert_eq!(occupancy.actual_occupancy, Some(dec!(62.5)));
        assert_eq!(occupancy.expected_occupancy, Some(dec!(70)));
    }

    #[test]
    fn test_demand_index_code_preserved() {
        let mut store = MemoryStore::new();
        let mut row = obs("s1", "Semi Cama", 24.0, 10, Some(dec!(100)), Some(dec!(90)));
        row.demand_index = Some(DemandIndex::Code("M/L".to_string()));
        store.insert(row);

        let resolver = SnapshotResolver::new(&store);
        let query = SnapshotQuery::for_schedule("s1")
            .with_seat_type("Semi Cama")
            .at_hours(24.0);

        assert_eq!(
            resolver.resolve_demand_index(&query),
            Some(DemandIndex::Code("M/L".to_string()))
        );
    }

    #[test]
    fn test_demand_index_by_seat_type_skips_absent() {
        let mut store = MemoryStore::new();
        let mut semi = obs("s1", "Semi Cama", 24.0, 10, None, None);
        semi.demand_index = Some(DemandIndex::Numeric(dec!(1.2)));
        store.insert(semi);
        store.insert(obs("s1", "Salon Cama", 24.0, 10, None, None));

        let resolver = SnapshotResolver::new(&store);
        let query = SnapshotQuery::for_schedule("s1").at_hours(24.0);
        let by_type = resolver.demand_index_by_seat_type(&query);

        assert_eq!(by_type.len(), 1);
        assert_eq!(by_type["Semi Cama"], DemandIndex::Numeric(dec!(1.2)));
    }
}
