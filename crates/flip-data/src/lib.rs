//! File-backed market data loading.
//!
//! The analytics crates consume plain maps and vectors; this crate fills
//! them from captured feed snapshots (JSON, in the feed's wire shapes)
//! and user trade logs (CSV or JSON). Live network retrieval is out of
//! scope here: capture the feed however you like and point a
//! [`SnapshotSource`] at the directory.

mod snapshot;
mod trade_log;

pub use snapshot::{MarketSource, SnapshotSource};
pub use trade_log::{load_trades_csv, load_trades_json};
