//! CSV snapshot loader

use super::{IngestError, IngestStats};
use crate::config::DataConfig;
use crate::store::{DemandIndex, MemoryStore, PriceObservation, SeatObservation};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const SEAT_PRICES_PREFIX: &str = "seat_prices_";
const SEAT_WISE_PRICES_PREFIX: &str = "seat_wise_prices_";

/// Extract the snapshot instant from an export filename such as
/// `seat_prices_2025-07-31_08-00.csv`
pub fn snapshot_instant_from_filename(filename: &str, prefix: &str) -> Option<DateTime<Utc>> {
    let stem = filename.strip_prefix(prefix)?.strip_suffix(".csv")?;
    let (date_part, time_part) = stem.split_once('_')?;
    let stamp = format!("{date_part} {}", time_part.replace('-', ":"));
    NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%d %H:%M")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Schedule-level export row; every column is text at the source
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SeatPricesRecord {
    schedule_id: Option<String>,
    operator_id: Option<String>,
    seat_type: Option<String>,
    hours_before_departure: Option<String>,
    date_of_journey: Option<String>,
    actual_fare: Option<String>,
    price: Option<String>,
    actual_occupancy: Option<String>,
    expected_occupancy: Option<String>,
    demand_index: Option<String>,
}

/// Seat-level export row
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SeatWisePricesRecord {
    schedule_id: Option<String>,
    seat_number: Option<String>,
    seat_type: Option<String>,
    actual_fare: Option<String>,
    final_price: Option<String>,
    travel_date: Option<String>,
}

fn parse_decimal(raw: Option<&str>) -> Option<Decimal> {
    raw.and_then(|value| value.trim().parse::<Decimal>().ok())
}

fn parse_hours(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
}

/// Journey dates appear as `%Y-%m-%d` in newer exports and `%d-%m-%Y`
/// in the legacy ones
fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let trimmed = raw?.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d-%m-%Y"))
        .ok()
}

impl SeatPricesRecord {
    fn into_observation(self, captured_at: DateTime<Utc>) -> Option<PriceObservation> {
        let schedule_id = self.schedule_id.as_deref()?.trim();
        let seat_type = self.seat_type.as_deref()?.trim();
        if schedule_id.is_empty() || seat_type.is_empty() {
            return None;
        }
        let hours_before_departure = parse_hours(self.hours_before_departure.as_deref())?;
        Some(PriceObservation {
            schedule_id: schedule_id.to_string(),
            operator_id: self
                .operator_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
            seat_type: seat_type.to_string(),
            captured_at,
            hours_before_departure,
            journey_date: parse_date(self.date_of_journey.as_deref()),
            actual_price: parse_decimal(self.actual_fare.as_deref()),
            model_price: parse_decimal(self.price.as_deref()),
            actual_occupancy: parse_decimal(self.actual_occupancy.as_deref()),
            expected_occupancy: parse_decimal(self.expected_occupancy.as_deref()),
            demand_index: self
                .demand_index
                .as_deref()
                .and_then(DemandIndex::parse),
        })
    }
}

impl SeatWisePricesRecord {
    fn into_observation(self, captured_at: DateTime<Utc>) -> Option<SeatObservation> {
        let schedule_id = self.schedule_id.as_deref()?.trim();
        let seat_type = self.seat_type.as_deref()?.trim();
        if schedule_id.is_empty() || seat_type.is_empty() {
            return None;
        }
        let seat_number = self.seat_number.as_deref()?.trim().parse::<u32>().ok()?;
        Some(SeatObservation {
            schedule_id: schedule_id.to_string(),
            seat_number,
            seat_type: seat_type.to_string(),
            captured_at,
            journey_date: parse_date(self.travel_date.as_deref()),
            actual_price: parse_decimal(self.actual_fare.as_deref()),
            model_price: parse_decimal(self.final_price.as_deref()),
        })
    }
}

/// Loads snapshot export directories into a store
pub struct SnapshotLoader {
    seat_prices_dir: PathBuf,
    seat_wise_prices_dir: PathBuf,
}

impl SnapshotLoader {
    pub fn new(config: &DataConfig) -> Self {
        Self {
            seat_prices_dir: config.seat_prices_dir.clone(),
            seat_wise_prices_dir: config.seat_wise_prices_dir.clone(),
        }
    }

    /// Load both export directories into a fresh store
    pub fn load(&self) -> Result<(MemoryStore, IngestStats), IngestError> {
        let mut store = MemoryStore::new();
        let mut stats = IngestStats::default();
        self.load_seat_prices(&mut store, &mut stats)?;
        self.load_seat_wise_prices(&mut store, &mut stats)?;
        tracing::info!(
            files = stats.files_loaded,
            observations = stats.observations_loaded,
            seats = stats.seats_loaded,
            skipped_rows = stats.rows_skipped,
            "Snapshot ingest complete"
        );
        Ok((store, stats))
    }

    pub fn load_seat_prices(
        &self,
        store: &mut MemoryStore,
        stats: &mut IngestStats,
    ) -> Result<(), IngestError> {
        for (path, captured_at) in
            snapshot_files(&self.seat_prices_dir, SEAT_PRICES_PREFIX, stats)?
        {
            let mut reader = csv::Reader::from_path(&path).map_err(|source| IngestError::Csv {
                path: path.clone(),
                source,
            })?;
            let mut batch = Vec::new();
            for result in reader.deserialize::<SeatPricesRecord>() {
                let record = result.map_err(|source| IngestError::Csv {
                    path: path.clone(),
                    source,
                })?;
                match record.into_observation(captured_at) {
                    Some(observation) => batch.push(observation),
                    None => stats.rows_skipped += 1,
                }
            }
            stats.observations_loaded += batch.len() as u64;
            store.extend(batch);
            stats.files_loaded += 1;
            tracing::debug!(path = %path.display(), %captured_at, "Loaded schedule-level snapshot");
        }
        Ok(())
    }

    pub fn load_seat_wise_prices(
        &self,
        store: &mut MemoryStore,
        stats: &mut IngestStats,
    ) -> Result<(), IngestError> {
        for (path, captured_at) in
            snapshot_files(&self.seat_wise_prices_dir, SEAT_WISE_PRICES_PREFIX, stats)?
        {
            let mut reader = csv::Reader::from_path(&path).map_err(|source| IngestError::Csv {
                path: path.clone(),
                source,
            })?;
            let mut batch = Vec::new();
            for result in reader.deserialize::<SeatWisePricesRecord>() {
                let record = result.map_err(|source| IngestError::Csv {
                    path: path.clone(),
                    source,
                })?;
                match record.into_observation(captured_at) {
                    Some(seat) => batch.push(seat),
                    None => stats.rows_skipped += 1,
                }
            }
            stats.seats_loaded += batch.len() as u64;
            store.extend_seats(batch);
            stats.files_loaded += 1;
            tracing::debug!(path = %path.display(), %captured_at, "Loaded seat-level snapshot");
        }
        Ok(())
    }
}

/// Convenience wrapper: load everything configured under `[data]`
pub fn load_store(config: &DataConfig) -> Result<(MemoryStore, IngestStats), IngestError> {
    SnapshotLoader::new(config).load()
}

fn snapshot_files(
    dir: &Path,
    prefix: &str,
    stats: &mut IngestStats,
) -> Result<Vec<(PathBuf, DateTime<Utc>)>, IngestError> {
    let entries = std::fs::read_dir(dir).map_err(|source| IngestError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| IngestError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(filename) = path.file_name().and_then(|name| name.to_str()) else {
            stats.files_skipped += 1;
            continue;
        };
        match snapshot_instant_from_filename(filename, prefix) {
            Some(captured_at) => files.push((path, captured_at)),
            None => {
                tracing::warn!(file = filename, "Skipping unrecognized snapshot filename");
                stats.files_skipped += 1;
            }
        }
    }
    files.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(files)
}
