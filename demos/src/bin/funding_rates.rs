//! Demo 2: Perpetual Funding Rate Monitor
//!
//! Showcases: futures listing, perpetual filtering, funding history
//!
//! Run: cargo run --bin funding_rates

use std::collections::HashMap;

use chrono::{Duration, Utc};
use colored::*;
use ftx_rest::{FtxRestClient, HistoryFilter};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const FUTURES: [&str; 4] = ["BTC-PERP", "ETH-PERP", "SOL-PERP", "FTT-PERP"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(70).cyan());
    println!("{}", "  PERPETUAL FUNDING RATE MONITOR".cyan().bold());
    println!("{}", "  FTX REST Demo - Hourly Funding Analytics".cyan());
    println!("{}", "═".repeat(70).cyan());
    println!();

    let client = FtxRestClient::new()?;
    let market = client.market();

    let perpetuals = market.get_perpetual_futures().await?;
    let marks: HashMap<_, _> = perpetuals
        .iter()
        .map(|f| (f.name.as_str(), f.mark.unwrap_or_default()))
        .collect();
    println!("{} {} perpetual futures listed\n", "✓".green(), perpetuals.len());

    println!(
        "  {:<12} {:>12} {:>14} {:>12}",
        "FUTURE".white().bold(),
        "MARK PRICE".white().bold(),
        "AVG 24H RATE".white().bold(),
        "ANNUAL".white().bold()
    );
    println!("  {}", "─".repeat(54));

    let since = HistoryFilter::new().since(Utc::now() - Duration::hours(24));

    for future in FUTURES {
        let rates = match market.get_funding_rates(Some(future), since).await {
            Ok(rates) => rates,
            Err(e) => {
                println!("  {:<12} {}", future.cyan(), format!("error: {}", e).red());
                continue;
            }
        };
        if rates.is_empty() {
            println!("  {:<12} {:>12} {:>14} {:>12}", future.cyan(), "-", "-", "-");
            continue;
        }

        let average = rates.iter().map(|r| r.rate).sum::<Decimal>() / Decimal::from(rates.len());
        // Funding settles hourly
        let annual = average * dec!(24) * dec!(365) * dec!(100);
        let rate_pct = format!("{:+.6}%", average * dec!(100));
        let rate_color = if average > Decimal::ZERO {
            rate_pct.green()
        } else if average < Decimal::ZERO {
            rate_pct.red()
        } else {
            rate_pct.white()
        };

        println!(
            "  {:<12} ${:>11.2} {:>14} {:>12}",
            future.cyan(),
            marks.get(future).copied().unwrap_or_default(),
            rate_color,
            format!("{:+.2}%", annual)
        );
    }

    println!();
    println!("  {} Positive rate = Longs pay shorts (bullish sentiment)", "•".green());
    println!("  {} Negative rate = Shorts pay longs (bearish sentiment)", "•".red());
    println!("  {} Funding occurs every hour on FTX", "•".white());

    Ok(())
}
