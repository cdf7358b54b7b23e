//! Summary command implementation

use super::display_opt;
use crate::config::Config;
use crate::ingest::load_store;
use crate::measures::date_summary;
use crate::resolver::SnapshotResolver;
use chrono::NaiveDate;
use clap::Args;

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Journey date (YYYY-MM-DD)
    #[arg(long)]
    pub journey_date: NaiveDate,

    /// Emit JSON instead of the text report
    #[arg(long)]
    pub json: bool,
}

impl SummaryArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let (store, _) = load_store(&config.data)?;
        let resolver = SnapshotResolver::with_tolerance(&store, config.resolver.hours_tolerance);

        let summary = date_summary(&resolver, self.journey_date);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }
        println!(
            "Summary for {} ({} schedules)",
            summary.journey_date, summary.schedule_count
        );
        println!("  Schedule-level:");
        println!(
            "    Actual sum: {}",
            display_opt(&summary.schedule_totals.actual_sum)
        );
        println!(
            "    Model sum:  {}",
            display_opt(&summary.schedule_totals.model_sum)
        );
        println!("    Delta:      {}", display_opt(&summary.schedule_totals.delta));
        println!("  Seat-level:");
        println!(
            "    Actual sum: {}",
            display_opt(&summary.seat_totals.actual_sum)
        );
        println!(
            "    Model sum:  {}",
            display_opt(&summary.seat_totals.model_sum)
        );
        println!("    Delta:      {}", display_opt(&summary.seat_totals.delta));
        Ok(())
    }
}
