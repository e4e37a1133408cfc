//! Demo 1: Market Overview
//!
//! Showcases: public market listing, orderbook snapshot, recent candles
//!
//! Run: cargo run --bin market_overview -- [MARKET]

use colored::*;
use ftx_rest::{FtxRestClient, HistoryFilter, Resolution};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let pair = std::env::args().nth(1).unwrap_or_else(|| "BTC/USD".to_string());

    println!("{}", "═".repeat(65).cyan());
    println!("{}", "  MARKET OVERVIEW".cyan().bold());
    println!("{}", format!("  FTX REST Demo - {}", pair).cyan());
    println!("{}", "═".repeat(65).cyan());
    println!();

    let client = FtxRestClient::new()?;

    // Top markets by 24h USD volume
    let mut markets = client.get_markets().await?;
    markets.sort_by(|a, b| b.volume_usd24h.cmp(&a.volume_usd24h));

    println!(
        "  {:<14} {:>8} {:>14} {:>16}",
        "MARKET".white().bold(),
        "TYPE".white().bold(),
        "LAST".white().bold(),
        "VOLUME 24H".white().bold()
    );
    println!("  {}", "─".repeat(55));
    for market in markets.iter().take(10) {
        let last = market.last.map(|p| p.to_string()).unwrap_or_else(|| "-".into());
        let volume = market.volume_usd24h.unwrap_or_default().round();
        println!(
            "  {:<14} {:>8} {:>14} {:>16}",
            market.name.cyan(),
            market.market_type,
            last,
            format!("${}", volume)
        );
    }
    println!();

    // Orderbook
    let book = client.get_orderbook(&pair, 20).await?;
    println!("  {} {}", "Orderbook".white().bold(), pair.cyan());
    for level in book.asks.iter().take(5).rev() {
        println!("  {:>14} {:>12}", level.price().to_string().red(), level.size());
    }
    println!("  {}", "─".repeat(27));
    for level in book.bids.iter().take(5) {
        println!("  {:>14} {:>12}", level.price().to_string().green(), level.size());
    }

    if let (Some(spread), Some(mid)) = (book.spread(), book.mid_price()) {
        let bps = if mid > Decimal::ZERO {
            (spread / mid * dec!(10000)).round_dp(2)
        } else {
            Decimal::ZERO
        };
        println!("\n  Spread: {} ({} bps)  Mid: {}", spread, bps, mid);
    }
    println!();

    // Hourly candles
    let candles = client
        .market()
        .get_candles(&pair, Resolution::H1.seconds(), HistoryFilter::new().limit(6))
        .await?;

    println!(
        "  {:<22} {:>12} {:>12} {:>12} {:>12}",
        "HOUR".white().bold(),
        "OPEN".white().bold(),
        "HIGH".white().bold(),
        "LOW".white().bold(),
        "CLOSE".white().bold()
    );
    for candle in &candles {
        let close = if candle.close >= candle.open {
            candle.close.to_string().green()
        } else {
            candle.close.to_string().red()
        };
        println!(
            "  {:<22} {:>12} {:>12} {:>12} {:>12}",
            candle.start_time.format("%Y-%m-%d %H:%M"),
            candle.open,
            candle.high,
            candle.low,
            close
        );
    }

    Ok(())
}
