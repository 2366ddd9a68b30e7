//! Validate configuration command.

use anyhow::Result;
use std::path::Path;

use flip_config::load_config;
use flip_core::math::format_gp;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path) {
        Ok(config) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!(
                "Signal risk profile: {:?} ({}m buckets)",
                config.signal.risk_profile, config.signal.interval_minutes
            );
            println!("Starting cash: {}", format_gp(config.ledger.starting_cash));
            println!(
                "Watcher threshold: {:.1}%",
                config.watcher.threshold * 100.0
            );
            println!("Strategy presets:");
            for preset in &config.strategy.presets {
                println!(
                    "  {} (price {}-{}, volume >= {}, roi >= {}%)",
                    preset.name,
                    format_gp(preset.filter.min_price),
                    format_gp(preset.filter.max_price),
                    format_gp(preset.filter.min_volume),
                    preset.filter.min_roi
                );
            }
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
