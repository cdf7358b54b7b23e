//! Derived analytics over resolved snapshots
//!
//! KPI averages, per-horizon series, and journey-date summaries. All
//! outputs carry `Option` values: an empty input produces absent fields,
//! never a fabricated zero.

mod kpi;
mod series;
mod summary;

pub use kpi::{kpi_summary, KpiSummary};
pub use series::{occupancy_series, price_series, OccupancyPoint, PricePoint};
pub use summary::{date_summary, DateSummary, PriceTotals};
