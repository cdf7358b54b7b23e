//! Observation row types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One schedule-level row of the pricing time series.
///
/// Rows are append-only facts: ingested in periodic batches, never updated
/// or deleted. For a fixed `(schedule_id, seat_type)` they are totally
/// ordered by `captured_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceObservation {
    /// Schedule identifier (string-typed even when numeric)
    pub schedule_id: String,
    /// Operator identifier, when the export carries one
    pub operator_id: Option<String>,
    /// Seat category (e.g. "Semi Cama", "Salon Cama")
    pub seat_type: String,
    /// Snapshot instant at which this observation was recorded
    pub captured_at: DateTime<Utc>,
    /// Hours remaining until departure; decreases toward zero, stored
    /// with floating-point noise
    pub hours_before_departure: f64,
    /// Calendar date of the journey
    pub journey_date: Option<NaiveDate>,
    /// Observed/charged price
    pub actual_price: Option<Decimal>,
    /// Model-computed price
    pub model_price: Option<Decimal>,
    /// Observed occupancy percentage
    pub actual_occupancy: Option<Decimal>,
    /// Model-expected occupancy percentage
    pub expected_occupancy: Option<Decimal>,
    /// Demand tier, numeric or an opaque category code
    pub demand_index: Option<DemandIndex>,
}

/// One seat-level row of the pricing time series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatObservation {
    pub schedule_id: String,
    pub seat_number: u32,
    pub seat_type: String,
    pub captured_at: DateTime<Utc>,
    pub journey_date: Option<NaiveDate>,
    pub actual_price: Option<Decimal>,
    pub model_price: Option<Decimal>,
}

/// Demand index value as stored in the exports.
///
/// The column is duck-typed at the source: usually a number, sometimes a
/// tier label such as "M/L". Non-numeric values are preserved verbatim
/// rather than forced through numeric parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DemandIndex {
    Numeric(Decimal),
    Code(String),
}

impl DemandIndex {
    /// Parse a raw export field. Empty and NaN-like placeholders map to
    /// `None`; anything non-numeric is kept as an opaque code.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
            return None;
        }
        match trimmed.parse::<Decimal>() {
            Ok(value) => Some(DemandIndex::Numeric(value)),
            Err(_) => Some(DemandIndex::Code(trimmed.to_string())),
        }
    }
}

impl std::fmt::Display for DemandIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DemandIndex::Numeric(value) => write!(f, "{value}"),
            DemandIndex::Code(code) => write!(f, "{code}"),
        }
    }
}
