//! KPI command implementation

use super::display_opt;
use crate::config::Config;
use crate::ingest::load_store;
use crate::measures::kpi_summary;
use crate::store::{HoursWindow, ObservationFilter, ObservationStore};
use chrono::NaiveDate;
use clap::Args;

#[derive(Args, Debug)]
pub struct KpiArgs {
    /// Schedule identifier
    #[arg(long)]
    pub schedule_id: String,

    /// Seat type filter
    #[arg(long)]
    pub seat_type: Option<String>,

    /// Hours-before-departure filter
    #[arg(long)]
    pub hours: Option<f64>,

    /// Journey date filter (YYYY-MM-DD)
    #[arg(long)]
    pub journey_date: Option<NaiveDate>,
}

impl KpiArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let (store, _) = load_store(&config.data)?;

        let mut filter = ObservationFilter::for_schedule(&self.schedule_id);
        if let Some(ref seat_type) = self.seat_type {
            filter = filter.with_seat_type(seat_type);
        }
        if let Some(hours) = self.hours {
            filter = filter
                .with_hours_window(HoursWindow::new(hours, config.resolver.hours_tolerance));
        }
        if let Some(journey_date) = self.journey_date {
            filter = filter.with_journey_date(journey_date);
        }

        let rows = store.find(&filter, None);
        let summary = kpi_summary(&rows);

        println!("KPIs for {} ({} rows)", self.schedule_id, summary.row_count);
        println!("  Avg actual price:       {}", display_opt(&summary.avg_actual_price));
        println!("  Avg model price:        {}", display_opt(&summary.avg_model_price));
        println!("  Avg delta:              {}", display_opt(&summary.avg_delta));
        println!("  Avg delta %:            {}", display_opt(&summary.avg_delta_pct));
        println!(
            "  Avg actual occupancy:   {}",
            display_opt(&summary.avg_actual_occupancy)
        );
        println!(
            "  Avg expected occupancy: {}",
            display_opt(&summary.avg_expected_occupancy)
        );
        Ok(())
    }
}
