//! In-memory observation store

use super::{ObservationFilter, ObservationStore, PriceObservation, SeatObservation};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Holds the full dataset in memory, loaded once by the ingest batch and
/// read-only afterwards.
#[derive(Debug, Default)]
pub struct MemoryStore {
    observations: Vec<PriceObservation>,
    seats: Vec<SeatObservation>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, observation: PriceObservation) {
        self.observations.push(observation);
    }

    pub fn insert_seat(&mut self, seat: SeatObservation) {
        self.seats.push(seat);
    }

    pub fn extend(&mut self, observations: impl IntoIterator<Item = PriceObservation>) {
        self.observations.extend(observations);
    }

    pub fn extend_seats(&mut self, seats: impl IntoIterator<Item = SeatObservation>) {
        self.seats.extend(seats);
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn seat_len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty() && self.seats.is_empty()
    }

    fn matches(filter: &ObservationFilter, obs: &PriceObservation) -> bool {
        if let Some(ref schedule_id) = filter.schedule_id {
            if obs.schedule_id != *schedule_id {
                return false;
            }
        }
        if let Some(ref seat_type) = filter.seat_type {
            if obs.seat_type != *seat_type {
                return false;
            }
        }
        if let Some(journey_date) = filter.journey_date {
            if obs.journey_date != Some(journey_date) {
                return false;
            }
        }
        if let Some(captured_at) = filter.captured_at {
            if obs.captured_at != captured_at {
                return false;
            }
        }
        if let Some(window) = filter.hours_window {
            if !window.contains(obs.hours_before_departure) {
                return false;
            }
        }
        true
    }

    fn matches_seat(filter: &ObservationFilter, seat: &SeatObservation) -> bool {
        if let Some(ref schedule_id) = filter.schedule_id {
            if seat.schedule_id != *schedule_id {
                return false;
            }
        }
        if let Some(ref seat_type) = filter.seat_type {
            if seat.seat_type != *seat_type {
                return false;
            }
        }
        if let Some(journey_date) = filter.journey_date {
            if seat.journey_date != Some(journey_date) {
                return false;
            }
        }
        if let Some(captured_at) = filter.captured_at {
            if seat.captured_at != captured_at {
                return false;
            }
        }
        true
    }
}

impl ObservationStore for MemoryStore {
    fn find(&self, filter: &ObservationFilter, limit: Option<usize>) -> Vec<PriceObservation> {
        let mut rows: Vec<PriceObservation> = self
            .observations
            .iter()
            .filter(|obs| Self::matches(filter, obs))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.captured_at.cmp(&a.captured_at));
        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        rows
    }

    fn find_seats(&self, filter: &ObservationFilter, limit: Option<usize>) -> Vec<SeatObservation> {
        let mut rows: Vec<SeatObservation> = self
            .seats
            .iter()
            .filter(|seat| Self::matches_seat(filter, seat))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.captured_at
                .cmp(&a.captured_at)
                .then(a.seat_number.cmp(&b.seat_number))
        });
        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        rows
    }

    fn schedule_ids(&self) -> Vec<String> {
        let ids: BTreeSet<String> = self
            .observations
            .iter()
            .map(|obs| obs.schedule_id.clone())
            .collect();
        ids.into_iter().collect()
    }

    fn schedule_ids_by_date(&self, journey_date: NaiveDate) -> Vec<String> {
        let ids: BTreeSet<String> = self
            .observations
            .iter()
            .filter(|obs| obs.journey_date == Some(journey_date))
            .map(|obs| obs.schedule_id.clone())
            .collect();
        ids.into_iter().collect()
    }

    fn seat_types(&self, schedule_id: &str) -> Vec<String> {
        let types: BTreeSet<String> = self
            .observations
            .iter()
            .filter(|obs| obs.schedule_id == schedule_id)
            .map(|obs| obs.seat_type.clone())
            .collect();
        types.into_iter().collect()
    }

    fn departure_horizons(&self, schedule_id: &str) -> Vec<f64> {
        let mut horizons: Vec<f64> = self
            .observations
            .iter()
            .filter(|obs| obs.schedule_id == schedule_id)
            .map(|obs| obs.hours_before_departure)
            .collect();
        horizons.sort_by(|a, b| b.total_cmp(a));
        horizons.dedup();
        horizons
    }

    fn journey_dates(&self) -> Vec<NaiveDate> {
        let dates: BTreeSet<NaiveDate> = self
            .observations
            .iter()
            .filter_map(|obs| obs.journey_date)
            .collect();
        dates.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::HoursWindow;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn obs(schedule_id: &str, seat_type: &str, hours: f64, minute: u32) -> PriceObservation {
        PriceObservation {
            schedule_id: schedule_id.to_string(),
            operator_id: None,
            seat_type: seat_type.to_string(),
            captured_at: Utc.with_ymd_and_hms(2025, 7, 31, 8, minute, 0).unwrap(),
            hours_before_departure: hours,
            journey_date: NaiveDate::from_ymd_opt(2025, 8, 2),
            actual_price: Some(dec!(100)),
            model_price: Some(dec!(95)),
            actual_occupancy: None,
            expected_occupancy: None,
            demand_index: None,
        }
    }

    #[test]
    fn test_extend_and_counts() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        store.extend(vec![
            obs("s1", "Semi Cama", 48.0, 0),
            obs("s1", "Semi Cama", 24.0, 30),
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.seat_len(), 0);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_find_orders_by_captured_at_desc() {
        let mut store = MemoryStore::new();
        store.insert(obs("s1", "Semi Cama", 48.0, 0));
        store.insert(obs("s1", "Semi Cama", 48.0, 30));
        store.insert(obs("s1", "Semi Cama", 48.0, 15));

        let rows = store.find(&ObservationFilter::for_schedule("s1"), None);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].captured_at > rows[1].captured_at);
        assert!(rows[1].captured_at > rows[2].captured_at);
    }

    #[test]
    fn test_find_respects_limit() {
        let mut store = MemoryStore::new();
        store.insert(obs("s1", "Semi Cama", 48.0, 0));
        store.insert(obs("s1", "Semi Cama", 24.0, 30));

        let rows = store.find(&ObservationFilter::for_schedule("s1"), Some(1));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hours_before_departure, 24.0);
    }

    #[test]
    fn test_find_hours_window() {
        let mut store = MemoryStore::new();
        store.insert(obs("s1", "Semi Cama", 24.005, 0));
        store.insert(obs("s1", "Semi Cama", 48.0, 5));

        let filter = ObservationFilter::for_schedule("s1")
            .with_hours_window(HoursWindow::new(24.0, 0.01));
        let rows = store.find(&filter, None);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hours_before_departure, 24.005);
    }

    #[test]
    fn test_find_seat_type_filter() {
        let mut store = MemoryStore::new();
        store.insert(obs("s1", "Semi Cama", 24.0, 0));
        store.insert(obs("s1", "Salon Cama", 24.0, 0));

        let filter = ObservationFilter::for_schedule("s1").with_seat_type("Salon Cama");
        let rows = store.find(&filter, None);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].seat_type, "Salon Cama");
    }

    #[test]
    fn test_catalogs() {
        let mut store = MemoryStore::new();
        store.insert(obs("s2", "Salon Cama", 24.0, 0));
        store.insert(obs("s1", "Semi Cama", 48.0, 0));
        store.insert(obs("s1", "Semi Cama", 24.0, 5));
        store.insert(obs("s1", "Salon Cama", 24.0, 5));

        assert_eq!(store.schedule_ids(), vec!["s1", "s2"]);
        assert_eq!(store.seat_types("s1"), vec!["Salon Cama", "Semi Cama"]);
        assert_eq!(store.departure_horizons("s1"), vec![48.0, 24.0]);
        assert_eq!(
            store.journey_dates(),
            vec![NaiveDate::from_ymd_opt(2025, 8, 2).unwrap()]
        );
    }

    #[test]
    fn test_schedule_ids_by_date() {
        let mut store = MemoryStore::new();
        let mut other = obs("s2", "Semi Cama", 24.0, 0);
        other.journey_date = NaiveDate::from_ymd_opt(2025, 8, 3);
        store.insert(obs("s1", "Semi Cama", 24.0, 0));
        store.insert(other);

        let date = NaiveDate::from_ymd_opt(2025, 8, 2).unwrap();
        assert_eq!(store.schedule_ids_by_date(date), vec!["s1"]);
    }

    #[test]
    fn test_find_seats_order() {
        let mut store = MemoryStore::new();
        let seat = |number: u32, minute: u32| SeatObservation {
            schedule_id: "s1".to_string(),
            seat_number: number,
            seat_type: "Semi Cama".to_string(),
            captured_at: Utc.with_ymd_and_hms(2025, 7, 31, 8, minute, 0).unwrap(),
            journey_date: None,
            actual_price: Some(dec!(50)),
            model_price: Some(dec!(45)),
        };
        store.insert_seat(seat(3, 0));
        store.insert_seat(seat(1, 0));
        store.insert_seat(seat(2, 30));

        let rows = store.find_seats(&ObservationFilter::for_schedule("s1"), None);
        assert_eq!(rows[0].seat_number, 2);
        assert_eq!(rows[1].seat_number, 1);
        assert_eq!(rows[2].seat_number, 3);
    }
}
