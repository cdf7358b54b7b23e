//! Dashboard KPI aggregates

use crate::resolver::price_delta;
use crate::store::PriceObservation;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Averages over a filtered observation set. Each field averages the rows
/// where the underlying values are present and is `None` when no row
/// qualifies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub avg_actual_price: Option<Decimal>,
    pub avg_model_price: Option<Decimal>,
    pub avg_delta: Option<Decimal>,
    /// Average of `(actual - model) / model * 100` over rows with a
    /// non-zero model price
    pub avg_delta_pct: Option<Decimal>,
    pub avg_actual_occupancy: Option<Decimal>,
    pub avg_expected_occupancy: Option<Decimal>,
    pub row_count: usize,
}

/// Compute KPI averages for a set of observations
pub fn kpi_summary(rows: &[PriceObservation]) -> KpiSummary {
    let deltas: Vec<Decimal> = rows
        .iter()
        .filter_map(|obs| price_delta(obs.actual_price, obs.model_price))
        .collect();
    let delta_pcts: Vec<Decimal> = rows
        .iter()
        .filter_map(|obs| match (obs.actual_price, obs.model_price) {
            (Some(actual), Some(model)) if !model.is_zero() => {
                Some((actual - model) / model * dec!(100))
            }
            _ => None,
        })
        .collect();

    KpiSummary {
        avg_actual_price: average(rows.iter().filter_map(|obs| obs.actual_price)),
        avg_model_price: average(rows.iter().filter_map(|obs| obs.model_price)),
        avg_delta: average(deltas.into_iter()),
        avg_delta_pct: average(delta_pcts.into_iter()),
        avg_actual_occupancy: average(rows.iter().filter_map(|obs| obs.actual_occupancy)),
        avg_expected_occupancy: average(rows.iter().filter_map(|obs| obs.expected_occupancy)),
        row_count: rows.len(),
    }
}

fn average(values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    let mut sum = Decimal::ZERO;
    let mut count = 0u32;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / Decimal::from(count))
    }
}
