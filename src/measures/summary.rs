//! Journey-date summaries
//!
//! Totals of actual/model price across every schedule travelling on a
//! date, taken at each `(schedule, seat_type)` key's latest consistent
//! snapshot, at both schedule-level and seat-level granularity.

use crate::resolver::{price_delta, SnapshotQuery, SnapshotResolver};
use crate::store::ObservationStore;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Nullable price totals; `None` means nothing contributed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceTotals {
    pub actual_sum: Option<Decimal>,
    pub model_sum: Option<Decimal>,
    pub delta: Option<Decimal>,
}

impl PriceTotals {
    fn add(&mut self, actual: Option<Decimal>, model: Option<Decimal>) {
        if let Some(actual) = actual {
            self.actual_sum = Some(self.actual_sum.unwrap_or_default() + actual);
        }
        if let Some(model) = model {
            self.model_sum = Some(self.model_sum.unwrap_or_default() + model);
        }
        self.delta = price_delta(self.actual_sum, self.model_sum);
    }
}

/// Price totals for one journey date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateSummary {
    pub journey_date: NaiveDate,
    pub schedule_count: usize,
    /// Totals over schedule-level observations
    pub schedule_totals: PriceTotals,
    /// Totals over seat-level observations
    pub seat_totals: PriceTotals,
}

/// Summarize every schedule travelling on `journey_date`. A date with no
/// schedules yields zero counts and absent totals.
pub fn date_summary(resolver: &SnapshotResolver<'_>, journey_date: NaiveDate) -> DateSummary {
    let schedule_ids = resolver.store().schedule_ids_by_date(journey_date);
    let mut summary = DateSummary {
        journey_date,
        schedule_count: schedule_ids.len(),
        schedule_totals: PriceTotals::default(),
        seat_totals: PriceTotals::default(),
    };

    for schedule_id in &schedule_ids {
        for seat_type in resolver.store().seat_types(schedule_id) {
            // Latest snapshot per key; no horizon filter on purpose
            let query = SnapshotQuery::for_schedule(schedule_id).with_seat_type(&seat_type);
            if let Some(obs) = resolver.resolve_observation(&query, Some(&seat_type)) {
                summary
                    .schedule_totals
                    .add(obs.actual_price, obs.model_price);
            }
            if let Some(totals) = resolver.seat_price_totals_for(&query) {
                summary
                    .seat_totals
                    .add(totals.total_actual_price, totals.total_model_price);
            }
        }
    }
    summary
}
