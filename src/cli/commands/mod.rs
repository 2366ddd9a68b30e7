//! CLI command implementations.

pub mod history;
pub mod portfolio;
pub mod scan;
pub mod signal;
pub mod validate;

use std::path::Path;

use flip_config::AppConfig;
use flip_core::types::Trade;

/// Load the configuration, falling back to defaults when the file is
/// absent so the read-only commands work out of the box.
pub(crate) fn load_config_or_default(path: &Path) -> anyhow::Result<AppConfig> {
    if path.exists() {
        Ok(flip_config::load_config(path)?)
    } else {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        Ok(AppConfig::default())
    }
}

/// Load a trade log, dispatching on the file extension.
pub(crate) fn load_trades(path: &Path) -> anyhow::Result<Vec<Trade>> {
    let trades = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => flip_data::load_trades_json(path)?,
        _ => flip_data::load_trades_csv(path)?,
    };
    Ok(trades)
}
