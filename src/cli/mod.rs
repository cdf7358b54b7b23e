//! CLI interface for fare-lens
//!
//! Provides subcommands for:
//! - `ingest`: load snapshot exports and report counts
//! - `resolve`: resolve one snapshot query to a price summary
//! - `totals`: seat-level price sums per departure horizon
//! - `kpi`: KPI averages over a filtered row set
//! - `summary`: journey-date price summary
//! - `config`: show effective configuration

mod ingest;
mod kpi;
mod resolve;
mod summary;
mod totals;

pub use ingest::IngestArgs;
pub use kpi::KpiArgs;
pub use resolve::ResolveArgs;
pub use summary::SummaryArgs;
pub use totals::TotalsArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fare-lens")]
#[command(about = "Snapshot resolution and pricing analytics for bus seat dynamic-pricing data")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load snapshot exports and report counts
    Ingest(IngestArgs),
    /// Resolve one snapshot query to a price summary
    Resolve(ResolveArgs),
    /// Seat-level price sums per departure horizon
    Totals(TotalsArgs),
    /// KPI averages over a filtered row set
    Kpi(KpiArgs),
    /// Journey-date price summary
    Summary(SummaryArgs),
    /// Show effective configuration
    Config,
}

/// Render an optional value, making "no data" explicit instead of
/// substituting a numeric default
pub(crate) fn display_opt<T: std::fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "unavailable".to_string(),
    }
}
