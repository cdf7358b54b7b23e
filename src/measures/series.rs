//! Per-horizon chart series
//!
//! One point per `(seat_type, horizon)` pair at that pair's latest
//! consistent snapshot, sorted seat type ascending then horizon
//! descending, matching the dashboard's trend charts.

use crate::resolver::{SnapshotQuery, SnapshotResolver};
use crate::store::ObservationStore;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// One price trend point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub seat_type: String,
    pub hours_before_departure: f64,
    pub actual_price: Option<Decimal>,
    pub model_price: Option<Decimal>,
    pub delta: Option<Decimal>,
    pub resolved_at: DateTime<Utc>,
}

/// One occupancy trend point; only emitted when both values are present
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupancyPoint {
    pub seat_type: String,
    pub hours_before_departure: f64,
    pub actual_occupancy: Decimal,
    pub expected_occupancy: Decimal,
    pub resolved_at: DateTime<Utc>,
}

/// Actual/model price series for a schedule
pub fn price_series(
    resolver: &SnapshotResolver<'_>,
    schedule_id: &str,
    journey_date: Option<NaiveDate>,
) -> Vec<PricePoint> {
    resolved_points(resolver, schedule_id, journey_date)
        .into_iter()
        .map(|(seat_type, obs)| PricePoint {
            seat_type,
            hours_before_departure: obs.hours_before_departure,
            actual_price: obs.actual_price,
            model_price: obs.model_price,
            delta: crate::resolver::price_delta(obs.actual_price, obs.model_price),
            resolved_at: obs.captured_at,
        })
        .collect()
}

/// Occupancy series for a schedule; pairs missing either occupancy value
/// are dropped rather than defaulted
pub fn occupancy_series(
    resolver: &SnapshotResolver<'_>,
    schedule_id: &str,
    journey_date: Option<NaiveDate>,
) -> Vec<OccupancyPoint> {
    resolved_points(resolver, schedule_id, journey_date)
        .into_iter()
        .filter_map(|(seat_type, obs)| {
            match (obs.actual_occupancy, obs.expected_occupancy) {
                (Some(actual), Some(expected)) => Some(OccupancyPoint {
                    seat_type,
                    hours_before_departure: obs.hours_before_departure,
                    actual_occupancy: actual,
                    expected_occupancy: expected,
                    resolved_at: obs.captured_at,
                }),
                _ => None,
            }
        })
        .collect()
}

fn resolved_points(
    resolver: &SnapshotResolver<'_>,
    schedule_id: &str,
    journey_date: Option<NaiveDate>,
) -> Vec<(String, crate::store::PriceObservation)> {
    let seat_types = resolver.store().seat_types(schedule_id);
    let horizons = resolver.store().departure_horizons(schedule_id);
    let mut points = Vec::new();
    for seat_type in seat_types {
        for &horizon in &horizons {
            let mut query = SnapshotQuery::for_schedule(schedule_id).at_hours(horizon);
            if let Some(date) = journey_date {
                query = query.on_date(date);
            }
            // Fallback resolution can pull a pair toward a different
            // horizon's row; keep only genuine window hits so each
            // horizon appears once
            if let Some(obs) = resolver
                .resolve_observation(&query, Some(&seat_type))
                .filter(|obs| {
                    (obs.hours_before_departure - horizon).abs() < resolver.hours_tolerance()
                })
            {
                points.push((seat_type.clone(), obs));
            }
        }
    }
    points
}
