use clap::Parser;
use fare_lens::cli::{Cli, Commands};
use fare_lens::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    // Initialize telemetry
    let _guard = fare_lens::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Ingest(args) => {
            tracing::info!("Loading snapshot exports");
            args.execute(&config)?;
        }
        Commands::Resolve(args) => {
            tracing::info!(schedule_id = %args.schedule_id, "Resolving snapshot query");
            args.execute(&config)?;
        }
        Commands::Totals(args) => {
            tracing::info!(schedule_id = %args.schedule_id, "Computing seat price totals");
            args.execute(&config)?;
        }
        Commands::Kpi(args) => {
            tracing::info!(schedule_id = %args.schedule_id, "Computing KPIs");
            args.execute(&config)?;
        }
        Commands::Summary(args) => {
            tracing::info!(journey_date = %args.journey_date, "Computing date summary");
            args.execute(&config)?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Seat prices dir:      {}",
                config.data.seat_prices_dir.display()
            );
            println!(
                "  Seat-wise prices dir: {}",
                config.data.seat_wise_prices_dir.display()
            );
            println!("  Hours tolerance:      {}", config.resolver.hours_tolerance);
            println!("  Log level:            {}", config.telemetry.log_level);
        }
    }

    Ok(())
}
