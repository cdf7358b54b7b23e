//! Observation store module
//!
//! The resolver consumes observations through the [`ObservationStore`]
//! seam: filtered lookups returning rows in `captured_at`-descending
//! order, plus the distinct-value catalogs that back filter dropdowns.

mod memory;
mod types;

pub use memory::MemoryStore;
pub use types::{DemandIndex, PriceObservation, SeatObservation};

use chrono::{DateTime, NaiveDate, Utc};

/// Tolerance window on hours-before-departure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoursWindow {
    pub target: f64,
    pub tolerance: f64,
}

impl HoursWindow {
    pub fn new(target: f64, tolerance: f64) -> Self {
        Self { target, tolerance }
    }

    pub fn contains(&self, hours: f64) -> bool {
        (hours - self.target).abs() < self.tolerance
    }
}

/// Filter predicates for observation lookups. Unset fields match
/// everything.
#[derive(Debug, Clone, Default)]
pub struct ObservationFilter {
    pub schedule_id: Option<String>,
    pub seat_type: Option<String>,
    pub journey_date: Option<NaiveDate>,
    /// Exact snapshot instant
    pub captured_at: Option<DateTime<Utc>>,
    /// Tolerance window on hours-before-departure
    pub hours_window: Option<HoursWindow>,
}

impl ObservationFilter {
    pub fn for_schedule(schedule_id: &str) -> Self {
        Self {
            schedule_id: Some(schedule_id.to_string()),
            ..Self::default()
        }
    }

    pub fn with_seat_type(mut self, seat_type: &str) -> Self {
        self.seat_type = Some(seat_type.to_string());
        self
    }

    pub fn with_journey_date(mut self, journey_date: NaiveDate) -> Self {
        self.journey_date = Some(journey_date);
        self
    }

    pub fn with_captured_at(mut self, captured_at: DateTime<Utc>) -> Self {
        self.captured_at = Some(captured_at);
        self
    }

    pub fn with_hours_window(mut self, window: HoursWindow) -> Self {
        self.hours_window = Some(window);
        self
    }
}

/// Read-only query seam over the append-only observation dataset
pub trait ObservationStore {
    /// Schedule-level rows matching `filter`, ordered by `captured_at`
    /// descending, truncated to `limit` when given
    fn find(&self, filter: &ObservationFilter, limit: Option<usize>) -> Vec<PriceObservation>;

    /// Seat-level rows matching `filter`, ordered by `captured_at`
    /// descending then `seat_number` ascending
    fn find_seats(&self, filter: &ObservationFilter, limit: Option<usize>) -> Vec<SeatObservation>;

    /// Distinct schedule ids, ascending
    fn schedule_ids(&self) -> Vec<String>;

    /// Distinct schedule ids travelling on `journey_date`, ascending
    fn schedule_ids_by_date(&self, journey_date: NaiveDate) -> Vec<String>;

    /// Distinct seat types for a schedule, ascending
    fn seat_types(&self, schedule_id: &str) -> Vec<String>;

    /// Distinct hours-before-departure values for a schedule, descending
    fn departure_horizons(&self, schedule_id: &str) -> Vec<f64>;

    /// Distinct journey dates across the dataset, ascending
    fn journey_dates(&self) -> Vec<NaiveDate>;
}
