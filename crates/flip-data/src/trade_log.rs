//! User trade-log import.

use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;

use flip_core::error::DataError;
use flip_core::types::Trade;

/// CSV trade-log row. Header names are tolerant of the common exports.
#[derive(Debug, Deserialize)]
struct CsvTrade {
    #[serde(alias = "Id", default)]
    id: String,
    #[serde(alias = "item_id", alias = "itemId", alias = "item")]
    item_id: u32,
    #[serde(alias = "Quantity", alias = "qty")]
    quantity: i64,
    #[serde(alias = "buy_price", alias = "buyPrice", default)]
    buy_price: i64,
    #[serde(alias = "sell_price", alias = "sellPrice", default)]
    sell_price: i64,
    #[serde(alias = "Profit", default)]
    profit: i64,
    #[serde(alias = "Timestamp", alias = "time")]
    timestamp: i64,
}

/// Load a trade log from a CSV file.
///
/// Rows missing an id get one synthesized from their position, so a
/// hand-edited log without an id column still matches cleanly.
pub fn load_trades_csv(path: impl AsRef<Path>) -> Result<Vec<Trade>, DataError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DataError::NoDataAvailable(path.display().to_string()));
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| DataError::ParseError(e.to_string()))?;

    let mut trades = Vec::new();
    for (row, result) in reader.deserialize().enumerate() {
        let record: CsvTrade = result.map_err(|e| DataError::ParseError(e.to_string()))?;
        trades.push(to_trade(record, row));
    }
    Ok(trades)
}

/// Load a trade log from a JSON array of trade records.
pub fn load_trades_json(path: impl AsRef<Path>) -> Result<Vec<Trade>, DataError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DataError::NoDataAvailable(path.display().to_string()));
    }
    let json = std::fs::read_to_string(path)?;
    parse_trades_json(&json)
}

fn parse_trades_json(json: &str) -> Result<Vec<Trade>, DataError> {
    serde_json::from_str(json).map_err(|e| DataError::ParseError(e.to_string()))
}

fn to_trade(record: CsvTrade, row: usize) -> Trade {
    Trade {
        id: if record.id.is_empty() {
            format!("csv-{row}")
        } else {
            record.id
        },
        item_id: record.item_id,
        quantity: record.quantity,
        buy_price: record.buy_price,
        sell_price: record.sell_price,
        profit: record.profit,
        timestamp: record.timestamp,
    }
}
