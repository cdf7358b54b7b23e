//! Snapshot resolution module
//!
//! Resolves filter-state queries to the correct point-in-time snapshot of
//! the pricing time series and extracts actual-vs-model comparisons.

mod aggregate;
mod snapshot;
mod types;

pub use aggregate::SeatPriceTotals;
pub use snapshot::SnapshotResolver;
pub use types::{price_delta, OccupancySummary, PriceSummary, ResolvedSnapshot, SnapshotQuery};
