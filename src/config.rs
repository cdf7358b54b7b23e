//! Configuration types for fare-lens

use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Snapshot export directories consumed by the ingest loader
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory of schedule-level exports (`seat_prices_<ts>.csv`)
    pub seat_prices_dir: PathBuf,
    /// Directory of seat-level exports (`seat_wise_prices_<ts>.csv`)
    pub seat_wise_prices_dir: PathBuf,
}

/// Snapshot resolution configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverConfig {
    /// Tolerance for matching a requested hours-before-departure value.
    /// The stored values carry floating-point noise, so exact equality
    /// would miss nominally identical horizons.
    #[serde(default = "default_hours_tolerance")]
    pub hours_tolerance: f64,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_hours_tolerance() -> f64 {
    0.01
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            hours_tolerance: default_hours_tolerance(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            [data]
            seat_prices_dir = "./data/seat_prices"
            seat_wise_prices_dir = "./data/seat_wise_prices"

            [resolver]
            hours_tolerance = 0.05

            [telemetry]
            log_level = "debug"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.data.seat_prices_dir,
            PathBuf::from("./data/seat_prices")
        );
        assert_eq!(config.resolver.hours_tolerance, 0.05);
        assert_eq!(config.telemetry.log_level, "debug");
    }

    #[test]
    fn test_config_defaults() {
        let toml = r#"
            [data]
            seat_prices_dir = "./data/seat_prices"
            seat_wise_prices_dir = "./data/seat_wise_prices"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.resolver.hours_tolerance, 0.01);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn test_config_load_nonexistent() {
        let result = Config::load("/nonexistent/path/config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_clone() {
        let config = ResolverConfig::default();
        let cloned = config.clone();
        assert_eq!(config.hours_tolerance, cloned.hours_tolerance);
    }
}
