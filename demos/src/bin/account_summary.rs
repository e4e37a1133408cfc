//! Demo 3: Account Summary
//!
//! Showcases: signed requests, balances, positions, open orders and fills
//!
//! Run: FTX_API_KEY=... FTX_API_SECRET=... cargo run --bin account_summary
//! Set FTX_SUBACCOUNT to inspect a subaccount instead of the main account.

use colored::*;
use ftx_rest::{FtxRestClient, HistoryFilter, RestError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(65).cyan());
    println!("{}", "  ACCOUNT SUMMARY".cyan().bold());
    println!("{}", "  FTX REST Demo - Authenticated Endpoints".cyan());
    println!("{}", "═".repeat(65).cyan());
    println!();

    let client = match FtxRestClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            println!("{} {}", "✗".red(), e);
            println!("  Set FTX_API_KEY and FTX_API_SECRET to run this demo.");
            return Ok(());
        }
    };

    let account = client.account()?;
    let info = match account.get_account_info().await {
        Ok(info) => info,
        Err(RestError::RemoteRejected(message)) => {
            println!("{} Exchange rejected the request: {}", "✗".red(), message);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("  {:<24} {}", "Account".white().bold(), info.username.unwrap_or_default());
    println!("  {:<24} ${}", "Collateral", info.collateral.round_dp(2));
    println!("  {:<24} ${}", "Free collateral", info.free_collateral.round_dp(2));
    println!("  {:<24} ${}", "Account value", info.total_account_value.round_dp(2));
    println!("  {:<24} {}x", "Max leverage", info.leverage);
    println!("  {:<24} {} / {}", "Maker / taker fee", info.maker_fee, info.taker_fee);
    println!();

    // Balances
    let balances = client.get_balances().await?;
    println!(
        "  {:<10} {:>16} {:>16} {:>14}",
        "COIN".white().bold(),
        "FREE".white().bold(),
        "TOTAL".white().bold(),
        "USD".white().bold()
    );
    println!("  {}", "─".repeat(59));
    for balance in balances.iter().filter(|b| !b.total.is_zero()) {
        println!(
            "  {:<10} {:>16} {:>16} {:>14}",
            balance.coin.cyan(),
            balance.free,
            balance.total,
            balance.usd_value.unwrap_or_default().round_dp(2)
        );
    }
    println!();

    // Positions
    let positions = account.get_positions(true).await?;
    let open: Vec<_> = positions.iter().filter(|p| p.is_open()).collect();
    println!("  {} {}", "Open positions:".white().bold(), open.len());
    for position in open {
        let pnl = position.unrealized_pnl.round_dp(2).to_string();
        let pnl = if position.unrealized_pnl.is_sign_negative() {
            pnl.red()
        } else {
            pnl.green()
        };
        println!(
            "  {:<12} {:>5} {:>12} entry {:>12}  uPnL {}",
            position.future.cyan(),
            position.side.to_string(),
            position.net_size,
            position
                .entry_price
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".into()),
            pnl
        );
    }
    println!();

    // Orders
    let orders = client.get_open_orders(None).await?;
    println!("  {} {}", "Open orders:".white().bold(), orders.len());
    for order in &orders {
        println!(
            "  #{:<12} {:<12} {:>5} {:>12} @ {}",
            order.id,
            order.market.cyan(),
            order.side.to_string(),
            order.size,
            order.price.map(|p| p.to_string()).unwrap_or_else(|| "market".into())
        );
    }

    // Latest fills on the first open order's market
    if let Some(order) = orders.first() {
        let fills = account
            .get_fills(&order.market, HistoryFilter::new().limit(5), None, None)
            .await?;
        println!();
        println!("  {} {}", "Recent fills on".white().bold(), order.market.cyan());
        for fill in fills {
            println!(
                "  {} {:>5} {:>12} @ {:<12} ${:<12} fee {} {}",
                fill.time.format("%Y-%m-%d %H:%M:%S"),
                fill.side.to_string(),
                fill.size,
                fill.price,
                fill.value().round_dp(2),
                fill.fee,
                fill.fee_currency
            );
        }
    }

    Ok(())
}
