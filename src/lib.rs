//! fare-lens: snapshot resolution for bus seat dynamic-pricing data
//!
//! This library provides the core components for:
//! - An append-only observation store with filtered, time-ordered lookups
//! - Batch ingestion of periodic CSV snapshot exports
//! - Point-in-time snapshot resolution (tolerance match + closest-match fallback)
//! - Actual-vs-model price summaries with null-propagating deltas
//! - Seat-level price totals over a single consistent snapshot instant
//! - KPI, series, and journey-date summary measures
//! - Structured logging

pub mod cli;
pub mod config;
pub mod ingest;
pub mod measures;
pub mod resolver;
pub mod store;
pub mod telemetry;
