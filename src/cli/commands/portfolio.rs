//! Portfolio replay command.

use anyhow::Result;
use std::path::Path;

use flip_core::math::format_gp;
use flip_core::types::Side;
use flip_data::{MarketSource, SnapshotSource};
use flip_ledger::PortfolioLedger;

use crate::cli::PortfolioArgs;

pub async fn run(args: PortfolioArgs, config_path: &Path) -> Result<()> {
    let config = super::load_config_or_default(config_path)?;
    let starting_cash = args.starting_cash.unwrap_or(config.ledger.starting_cash);

    let mut trades = super::load_trades(&args.trades)?;
    trades.sort_by_key(|t| t.timestamp);

    let mut ledger = PortfolioLedger::with_starting_cash(starting_cash);
    for trade in &trades {
        if trade.is_completed_entry() {
            // A manual round trip touches both sides of the book
            ledger.record_transaction(trade.item_id, Side::Buy, trade.quantity, trade.buy_price);
            ledger.record_transaction(trade.item_id, Side::Sell, trade.quantity, trade.sell_price);
        } else if trade.is_buy() {
            ledger.record_transaction(trade.item_id, Side::Buy, trade.quantity, trade.buy_price);
        } else if trade.is_sell() {
            ledger.record_transaction(trade.item_id, Side::Sell, trade.quantity, trade.sell_price);
        }
    }

    println!();
    println!("Portfolio");
    println!("═══════════════════════════════════════════════════════════");
    println!("  Cash: {}", format_gp(ledger.cash()));

    if ledger.holdings().is_empty() {
        println!("  No open holdings");
    } else {
        println!("  Holdings:");
        let mut holdings: Vec<_> = ledger.holdings().values().collect();
        holdings.sort_by_key(|h| h.item_id);
        for holding in holdings {
            println!(
                "    item {:<8} {:>8} @ avg {}",
                holding.item_id,
                holding.quantity,
                format_gp(holding.avg_buy_price as i64),
            );
        }
    }

    if let Some(snapshot) = &args.snapshot {
        let source = SnapshotSource::new(snapshot)?;
        let prices = source.latest_prices().await?;
        let summary = ledger.summary(&prices);
        println!("───────────────────────────────────────────────────────────");
        println!("  Invested:   {}", format_gp(summary.invested as i64));
        println!("  Value:      {}", format_gp(summary.current_value as i64));
        println!(
            "  Unrealized: {}",
            format_gp(summary.unrealized_profit as i64)
        );
    }

    Ok(())
}
