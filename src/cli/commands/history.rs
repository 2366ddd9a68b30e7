//! Trade history matching command.

use anyhow::Result;
use chrono::DateTime;

use flip_core::math::format_gp;
use flip_ledger::match_trades;

use crate::cli::HistoryArgs;

pub async fn run(args: HistoryArgs) -> Result<()> {
    let trades = super::load_trades(&args.trades)?;
    tracing::info!(trades = trades.len(), "matching trade log");
    let flips = match_trades(&trades);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&flips)?);
        return Ok(());
    }

    println!();
    println!("Completed Flips");
    println!("═══════════════════════════════════════════════════════════");

    if flips.is_empty() {
        println!("  (no completed flips)");
        return Ok(());
    }

    for flip in &flips {
        let when = DateTime::from_timestamp(flip.timestamp, 0)
            .map_or_else(|| flip.timestamp.to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());
        println!(
            "  {}  item {:<8} {:>6} @ {:>9} -> {:>9}   profit {:>9}",
            when,
            flip.item_id,
            flip.quantity,
            format_gp(flip.avg_buy_price as i64),
            format_gp(flip.sell_price),
            format_gp(flip.profit),
        );
    }

    let total: i64 = flips.iter().map(|f| f.profit).sum();
    println!("───────────────────────────────────────────────────────────");
    println!("  {} flips, total profit {}", flips.len(), format_gp(total));

    Ok(())
}
