//! JSON snapshot loading in the price feed's wire shapes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use flip_core::error::DataError;
use flip_core::types::{ItemMeta, PeriodStats, PriceQuote, TimeSeriesPoint};

/// Wrapper shape shared by the latest-prices and 24h endpoints:
/// `{"data": {"<itemId>": {...}}}`.
#[derive(Debug, Deserialize)]
struct KeyedEnvelope<T> {
    data: HashMap<String, T>,
}

/// Wrapper shape of the timeseries endpoint: `{"data": [{...}]}`.
#[derive(Debug, Deserialize)]
struct SeriesEnvelope {
    data: Vec<TimeSeriesPoint>,
}

/// Port for anything that can supply market data to the CLI.
#[async_trait]
pub trait MarketSource: Send + Sync {
    async fn catalog(&self) -> Result<Vec<ItemMeta>, DataError>;
    async fn latest_prices(&self) -> Result<HashMap<u32, PriceQuote>, DataError>;
    async fn daily_stats(&self) -> Result<HashMap<u32, PeriodStats>, DataError>;
    async fn timeseries(&self, item_id: u32) -> Result<Vec<TimeSeriesPoint>, DataError>;
}

/// Snapshot directory layout:
/// `mapping.json`, `latest.json`, `24h.json`, `timeseries-<id>.json`.
pub struct SnapshotSource {
    dir: PathBuf,
}

impl SnapshotSource {
    /// Open a snapshot directory.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, DataError> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err(DataError::NoDataAvailable(dir.display().to_string()));
        }
        Ok(Self { dir })
    }

    fn read_file(&self, name: &str) -> Result<String, DataError> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Err(DataError::NoDataAvailable(path.display().to_string()));
        }
        Ok(std::fs::read_to_string(path)?)
    }
}

#[async_trait]
impl MarketSource for SnapshotSource {
    async fn catalog(&self) -> Result<Vec<ItemMeta>, DataError> {
        parse_catalog(&self.read_file("mapping.json")?)
    }

    async fn latest_prices(&self) -> Result<HashMap<u32, PriceQuote>, DataError> {
        parse_keyed(&self.read_file("latest.json")?)
    }

    async fn daily_stats(&self) -> Result<HashMap<u32, PeriodStats>, DataError> {
        parse_keyed(&self.read_file("24h.json")?)
    }

    async fn timeseries(&self, item_id: u32) -> Result<Vec<TimeSeriesPoint>, DataError> {
        parse_timeseries(&self.read_file(&format!("timeseries-{item_id}.json"))?)
    }
}

/// The mapping endpoint is a bare JSON array of catalog entries.
fn parse_catalog(json: &str) -> Result<Vec<ItemMeta>, DataError> {
    serde_json::from_str(json).map_err(|e| DataError::ParseError(e.to_string()))
}

/// Parse a `{"data": {"<id>": ...}}` envelope into an id-keyed map.
///
/// Keys that are not numeric item ids are dropped rather than failing
/// the whole snapshot.
fn parse_keyed<T: for<'de> Deserialize<'de>>(json: &str) -> Result<HashMap<u32, T>, DataError> {
    let envelope: KeyedEnvelope<T> =
        serde_json::from_str(json).map_err(|e| DataError::ParseError(e.to_string()))?;
    Ok(envelope
        .data
        .into_iter()
        .filter_map(|(key, value)| key.parse::<u32>().ok().map(|id| (id, value)))
        .collect())
}

/// Parse a timeseries envelope, oldest point first.
fn parse_timeseries(json: &str) -> Result<Vec<TimeSeriesPoint>, DataError> {
    let envelope: SeriesEnvelope =
        serde_json::from_str(json).map_err(|e| DataError::ParseError(e.to_string()))?;
    let mut points = envelope.data;
    points.sort_by_key(|p| p.timestamp);
    Ok(points)
}
