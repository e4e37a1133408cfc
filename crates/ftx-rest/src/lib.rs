//! REST API client for the FTX cryptocurrency exchange
//!
//! This crate provides a REST API client covering public market data and
//! private account, wallet, order, subaccount and staking endpoints.
//!
//! # Features
//!
//! - **Market Data**: Markets, orderbooks, trades, candles, futures, funding rates
//! - **Account**: Account summary, positions, fills, funding payments
//! - **Wallet**: Balances, deposit addresses, deposit and withdrawal history
//! - **Orders**: Place, modify and cancel plain and trigger orders
//! - **Subaccounts** and **SRM staking / margin lending**
//!
//! # Authentication
//!
//! Private endpoints are signed with HMAC-SHA256 over the nonce, method, path
//! and parameters, as specified by FTX. Whether an endpoint is private is
//! inferred from its path; see [`infer_scope`].
//!
//! # Example
//!
//! ```no_run
//! use ftx_rest::{Credentials, FtxRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = FtxRestClient::new()?;
//!     let book = client.get_orderbook("BTC/USD", 20).await?;
//!     println!("BTC/USD spread: {:?}", book.spread());
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = FtxRestClient::with_credentials(creds)?;
//!     let balances = auth_client.get_balances().await?;
//!     println!("Balances: {:?}", balances);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Rate Limiting
//!
//! The exchange allows about 30 requests per second
//! ([`RATE_LIMIT_PER_SECOND`](ftx_types::constants::RATE_LIMIT_PER_SECOND)).
//! The client does not throttle; callers are expected to pace themselves.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod request;
pub mod response;
pub mod scope;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, FtxRestClient};
pub use endpoints::catalog;
pub use endpoints::EndpointDef;
pub use error::{RestError, RestResult};
pub use ftx_auth::{Clock, Credentials, FixedClock, SystemClock};
pub use ftx_types::{
    ArgumentError, Chain, Depth, FillsOrder, Method, OrderType, Query, Resolution, Scope, Side,
    TriggerType,
};
pub use request::{RequestSpec, SignedHeaders};
pub use response::normalize_response;
pub use scope::infer_scope;
pub use transport::{HttpRequest, HttpTransport, ReqwestTransport, TransportError};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockTransport;

// Re-export endpoint-specific types
pub use types::{
    // Market data
    BookLevel, Candle, FundingRate, Future, FutureStats, Market, Orderbook, Trade,
    // Account
    AccountInfo, Fill, FundingPayment, Liquidity, Position,
    // Wallet and subaccounts
    Balance, DepositAddress, Subaccount, SubaccountTransfer, WalletCoin, WalletTransfer,
    // Orders
    Order, OrderRequest, OrderStatus, TriggerEvent, TriggerOrder, TriggerOrderRequest,
    // Requests
    HistoryFilter,
};
