//! Totals command implementation

use super::display_opt;
use crate::config::Config;
use crate::ingest::load_store;
use crate::resolver::SnapshotResolver;
use clap::Args;

#[derive(Args, Debug)]
pub struct TotalsArgs {
    /// Schedule identifier
    #[arg(long)]
    pub schedule_id: String,
}

impl TotalsArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let (store, _) = load_store(&config.data)?;
        let resolver = SnapshotResolver::with_tolerance(&store, config.resolver.hours_tolerance);

        let totals = resolver.seat_price_totals(&self.schedule_id);
        if totals.is_empty() {
            println!("{}: no seat-level data", self.schedule_id);
            return Ok(());
        }

        println!("Seat price totals for {}", self.schedule_id);
        for row in totals {
            println!(
                "  {:>8.2}h {:<12} seats={:<3} actual={} model={} at {}",
                row.hours_before_departure,
                row.seat_type,
                row.seat_count,
                display_opt(&row.total_actual_price),
                display_opt(&row.total_model_price),
                row.resolved_at,
            );
        }
        Ok(())
    }
}
