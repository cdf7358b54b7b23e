//! Resolve command implementation

use super::display_opt;
use crate::config::Config;
use crate::ingest::load_store;
use crate::resolver::{SnapshotQuery, SnapshotResolver};
use chrono::NaiveDate;
use clap::Args;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Schedule identifier
    #[arg(long)]
    pub schedule_id: String,

    /// Seat type; omit to resolve every seat type independently
    #[arg(long)]
    pub seat_type: Option<String>,

    /// Target hours before departure; omit for the latest snapshot
    #[arg(long)]
    pub hours: Option<f64>,

    /// Journey date (YYYY-MM-DD)
    #[arg(long)]
    pub journey_date: Option<NaiveDate>,

    /// Emit JSON instead of the text report
    #[arg(long)]
    pub json: bool,
}

impl ResolveArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let (store, _) = load_store(&config.data)?;
        let resolver = SnapshotResolver::with_tolerance(&store, config.resolver.hours_tolerance);

        let mut query = SnapshotQuery::for_schedule(&self.schedule_id);
        if let Some(ref seat_type) = self.seat_type {
            query = query.with_seat_type(seat_type);
        }
        if let Some(hours) = self.hours {
            query = query.at_hours(hours);
        }
        if let Some(journey_date) = self.journey_date {
            query = query.on_date(journey_date);
        }

        match self.seat_type {
            Some(ref seat_type) => {
                let summary = resolver.resolve(&query);
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                    return Ok(());
                }
                let occupancy = resolver.resolve_occupancy(&query);
                let demand = resolver.resolve_demand_index(&query);
                println!("{} / {seat_type}", self.schedule_id);
                println!("  Actual price:       {}", display_opt(&summary.actual_price));
                println!("  Model price:        {}", display_opt(&summary.model_price));
                println!("  Delta:              {}", display_opt(&summary.delta));
                println!("  Resolved at:        {}", display_opt(&summary.resolved_at));
                println!(
                    "  Actual occupancy:   {}",
                    display_opt(&occupancy.actual_occupancy)
                );
                println!(
                    "  Expected occupancy: {}",
                    display_opt(&occupancy.expected_occupancy)
                );
                println!("  Demand index:       {}", display_opt(&demand));
            }
            None => {
                let by_type = resolver.resolve_by_seat_type(&query);
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&by_type)?);
                    return Ok(());
                }
                if by_type.is_empty() {
                    println!("{}: no data", self.schedule_id);
                    return Ok(());
                }
                for (seat_type, summary) in by_type {
                    println!(
                        "{} / {seat_type}: actual={} model={} delta={} resolved_at={}",
                        self.schedule_id,
                        display_opt(&summary.actual_price),
                        display_opt(&summary.model_price),
                        display_opt(&summary.delta),
                        display_opt(&summary.resolved_at),
                    );
                }
            }
        }
        Ok(())
    }
}
