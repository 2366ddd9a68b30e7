//! Market scan command.

use anyhow::Result;
use chrono::Utc;
use std::path::Path;

use flip_core::math::format_gp;
use flip_data::{MarketSource, SnapshotSource};
use flip_scanner::{scan_highlights, HighlightEntry, MarketOpportunity, OpportunityLabel};

use crate::cli::ScanArgs;

pub async fn run(args: ScanArgs, config_path: &Path) -> Result<()> {
    let config = super::load_config_or_default(config_path)?;

    let mut filter = match &args.preset {
        Some(name) => {
            config
                .strategy
                .preset(name)
                .ok_or_else(|| anyhow::anyhow!("unknown strategy preset: {name}"))?
                .filter
        }
        None => config.strategy.default,
    };
    if let Some(v) = args.min_price {
        filter.min_price = v;
    }
    if let Some(v) = args.max_price {
        filter.max_price = v;
    }
    if let Some(v) = args.min_volume {
        filter.min_volume = v;
    }
    if let Some(v) = args.min_roi {
        filter.min_roi = v;
    }

    let source = SnapshotSource::new(&args.snapshot)?;
    let items = source.catalog().await?;
    let prices = source.latest_prices().await?;
    let stats = source.daily_stats().await?;
    let now = Utc::now().timestamp();

    tracing::info!(items = items.len(), "scanning market");
    let scan = flip_scanner::scan_market(&items, &prices, &stats, &filter, now);

    print_opportunities("Active Dumps", &scan.dumps, args.top);
    print_opportunities("Best Flips", &scan.best_flips, args.top);

    if args.highlights {
        let boards = scan_highlights(&items, &prices, &stats, now);
        print_board("Top Gainers", &boards.top_gainers, |e| {
            format!("{:+.1}%", e.change_24h)
        });
        print_board("Top Losers", &boards.top_losers, |e| {
            format!("{:+.1}%", e.change_24h)
        });
        print_board("High Volume", &boards.high_volume, |e| {
            format!("{} traded", format_gp(e.daily_volume))
        });
        print_board("Most Profitable", &boards.most_profitable, |e| {
            format!("{}/day", format_gp(e.achievable_profit))
        });
        print_board("Most Profitable (F2P)", &boards.most_profitable_f2p, |e| {
            format!("{}/day", format_gp(e.achievable_profit))
        });
        print_board("Most Expensive", &boards.most_expensive, |e| {
            format_gp(e.high)
        });
        print_board("Profitable Alchs", &boards.profitable_alchs, |e| {
            format!("{}/cast", format_gp(e.alch_profit.unwrap_or(0)))
        });
    }

    Ok(())
}

fn print_opportunities(title: &str, list: &[MarketOpportunity], top: usize) {
    println!();
    println!("{title}");
    println!("═══════════════════════════════════════════════════════════");

    if list.is_empty() {
        println!("  (nothing right now)");
        return;
    }

    for opp in list.iter().take(top) {
        match opp.label {
            OpportunityLabel::Flip => println!(
                "  {:<32} score {:>6.1}  margin {:>9}  roi {:>5.1}%",
                opp.item.name,
                opp.score,
                format_gp(opp.metric as i64),
                opp.secondary_metric,
            ),
            _ => println!(
                "  {:<32} score {:>6.1}  drop {:>5.1}%  potential {:>9}  [{}]",
                opp.item.name,
                opp.score,
                opp.metric,
                format_gp(opp.secondary_metric as i64),
                opp.label,
            ),
        }
    }
}

fn print_board(title: &str, board: &[HighlightEntry], value: impl Fn(&HighlightEntry) -> String) {
    println!();
    println!("{title}");
    println!("───────────────────────────────────────────────────────────");

    if board.is_empty() {
        println!("  (empty)");
        return;
    }

    for entry in board {
        println!(
            "  {:<32} {:>10}  {}",
            entry.name,
            format_gp(entry.high),
            value(entry)
        );
    }
}
