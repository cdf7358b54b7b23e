//! Ingest command implementation

use crate::config::Config;
use crate::ingest::load_store;
use crate::store::ObservationStore;
use clap::Args;

#[derive(Args, Debug)]
pub struct IngestArgs {}

impl IngestArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let (store, stats) = load_store(&config.data)?;
        println!("Ingest complete");
        println!("  Files loaded:        {}", stats.files_loaded);
        println!("  Files skipped:       {}", stats.files_skipped);
        println!("  Observations loaded: {}", stats.observations_loaded);
        println!("  Seat rows loaded:    {}", stats.seats_loaded);
        println!("  Rows skipped:        {}", stats.rows_skipped);
        println!("  Schedules:           {}", store.schedule_ids().len());
        Ok(())
    }
}
