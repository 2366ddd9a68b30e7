//! Signal evaluation command.

use anyhow::Result;
use std::path::Path;

use flip_data::{MarketSource, SnapshotSource};

use crate::cli::SignalArgs;

pub async fn run(args: SignalArgs, config_path: &Path) -> Result<()> {
    let config = super::load_config_or_default(config_path)?;

    let mut signal_config = config.signal.to_signal_config();
    if let Some(risk) = args.risk {
        signal_config.risk_profile = risk.into();
    }

    let source = SnapshotSource::new(&args.snapshot)?;
    let history = source.timeseries(args.item).await?;
    let name = source
        .catalog()
        .await
        .ok()
        .and_then(|items| items.into_iter().find(|i| i.id == args.item))
        .map_or_else(|| format!("item {}", args.item), |i| i.name);

    tracing::info!(item = args.item, points = history.len(), "evaluating signal");
    let result = flip_signals::evaluate(&history, &signal_config);

    println!();
    println!("Signal for {name}");
    println!("═══════════════════════════════════════════════════════════");
    println!("  Action:     {}", result.action);
    println!("  Score:      {:.0}/100", result.score);
    println!("  Confidence: {:.0}%", result.confidence);
    println!(
        "  RSI:        {:.1}   Trend: {:?}   Volatility: {:.1}",
        result.indicators.rsi, result.indicators.trend, result.indicators.volatility
    );
    if !result.reasoning.is_empty() {
        println!("  Reasoning:");
        for reason in &result.reasoning {
            println!("    - {reason}");
        }
    }

    Ok(())
}
