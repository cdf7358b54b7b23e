//! Snapshot resolution types

use crate::store::PriceObservation;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Filter state for one resolution request, built from user-selected
/// dropdown values. Not persisted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotQuery {
    /// Required for resolution; a query without one yields an
    /// unavailable result
    pub schedule_id: Option<String>,
    pub seat_type: Option<String>,
    /// Target horizon; absent means "latest snapshot"
    pub hours_before_departure: Option<f64>,
    pub journey_date: Option<NaiveDate>,
}

impl SnapshotQuery {
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

    pub fn at_hours(mut self, hours_before_departure: f64) -> Self {
        self.hours_before_departure = Some(hours_before_departure);
        self
    }

    pub fn on_date(mut self, journey_date: NaiveDate) -> Self {
        self.journey_date = Some(journey_date);
        self
    }
}

/// The snapshot instant a query resolved to. `hours_before_departure` is
/// the stored value of the winning observation, which may differ from the
/// requested horizon when the closest-match fallback fired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSnapshot {
    pub captured_at: DateTime<Utc>,
    pub hours_before_departure: f64,
}

/// Actual-vs-model price comparison at one resolved snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSummary {
    pub actual_price: Option<Decimal>,
    pub model_price: Option<Decimal>,
    /// `actual_price - model_price`; `None` whenever either side is
    /// missing, never a substitute numeric
    pub delta: Option<Decimal>,
    /// `captured_at` of the observation actually used
    pub resolved_at: Option<DateTime<Utc>>,
}

impl PriceSummary {
    /// The well-formed "no data" result
    pub fn unavailable() -> Self {
        Self {
            actual_price: None,
            model_price: None,
            delta: None,
            resolved_at: None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        self.resolved_at.is_none()
    }

    pub(crate) fn from_observation(obs: &PriceObservation) -> Self {
        Self {
            actual_price: obs.actual_price,
            model_price: obs.model_price,
            delta: price_delta(obs.actual_price, obs.model_price),
            resolved_at: Some(obs.captured_at),
        }
    }
}

/// Occupancy comparison at one resolved snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupancySummary {
    pub actual_occupancy: Option<Decimal>,
    pub expected_occupancy: Option<Decimal>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl OccupancySummary {
    pub fn unavailable() -> Self {
        Self {
            actual_occupancy: None,
            expected_occupancy: None,
            resolved_at: None,
        }
    }
}

/// Null-propagating delta: present only when both inputs are
pub fn price_delta(actual: Option<Decimal>, model: Option<Decimal>) -> Option<Decimal> {
    match (actual, model) {
        (Some(actual), Some(model)) => Some(actual - model),
        _ => None,
    }
}
