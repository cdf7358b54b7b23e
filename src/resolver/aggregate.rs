//! Seat-level price totals
//!
//! Sums are always taken over a single consistent snapshot instant per
//! `(schedule_id, seat_type)` key: the instant is resolved first, then
//! only seat observations captured at exactly that instant contribute.
//! Mixing captures from different instants would double-count seats that
//! appear in more than one snapshot.

use super::snapshot::SnapshotResolver;
use super::types::SnapshotQuery;
use crate::store::{ObservationFilter, ObservationStore};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;

/// Summed seat prices for one seat type at one departure horizon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatPriceTotals {
    pub hours_before_departure: f64,
    pub seat_type: String,
    /// Sum of present seat prices; `None` when no seat carried a value
    pub total_actual_price: Option<Decimal>,
    pub total_model_price: Option<Decimal>,
    pub seat_count: usize,
    pub resolved_at: DateTime<Utc>,
}

impl<'a> SnapshotResolver<'a> {
    /// Seat-price totals for every `(horizon, seat_type)` pair of a
    /// schedule, ordered horizon-descending then seat type ascending.
    /// Empty when the schedule has no observations.
    pub fn seat_price_totals(&self, schedule_id: &str) -> Vec<SeatPriceTotals> {
        let horizons = self.store().departure_horizons(schedule_id);
        let seat_types = self.store().seat_types(schedule_id);

        let mut totals = Vec::new();
        for &horizon in &horizons {
            for seat_type in &seat_types {
                let query = SnapshotQuery::for_schedule(schedule_id).at_hours(horizon);
                let Some(snapshot) = self.resolve_instant(&query, Some(seat_type)) else {
                    continue;
                };
                if let Some(row) =
                    self.totals_at_instant(schedule_id, seat_type, horizon, snapshot.captured_at)
                {
                    totals.push(row);
                }
            }
        }
        totals
    }

    /// Seat-price totals for one resolved query
    pub fn seat_price_totals_for(&self, query: &SnapshotQuery) -> Option<SeatPriceTotals> {
        let schedule_id = query.schedule_id.as_deref()?;
        let seat_type = query.seat_type.as_deref()?;
        let snapshot = self.resolve_instant(query, Some(seat_type))?;
        self.totals_at_instant(
            schedule_id,
            seat_type,
            snapshot.hours_before_departure,
            snapshot.captured_at,
        )
    }

    fn totals_at_instant(
        &self,
        schedule_id: &str,
        seat_type: &str,
        hours_before_departure: f64,
        captured_at: DateTime<Utc>,
    ) -> Option<SeatPriceTotals> {
        let filter = ObservationFilter::for_schedule(schedule_id)
            .with_seat_type(seat_type)
            .with_captured_at(captured_at);
        let seats = self.store().find_seats(&filter, None);
        if seats.is_empty() {
            return None;
        }

        // SUM over nullable values: missing prices are skipped, the
        // total is None only when nothing contributed
        let mut total_actual: Option<Decimal> = None;
        let mut total_model: Option<Decimal> = None;
        let mut seat_numbers = BTreeSet::new();
        for seat in &seats {
            if let Some(actual) = seat.actual_price {
                total_actual = Some(total_actual.unwrap_or_default() + actual);
            }
            if let Some(model) = seat.model_price {
                total_model = Some(total_model.unwrap_or_default() + model);
            }
            seat_numbers.insert(seat.seat_number);
        }

        Some(SeatPriceTotals {
            hours_before_departure,
            seat_type: seat_type.to_string(),
            total_actual_price: total_actual,
            total_model_price: total_model,
            seat_count: seat_numbers.len(),
            resolved_at: captured_at,
        })
    }
}
