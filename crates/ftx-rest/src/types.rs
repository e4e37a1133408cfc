//! Types for FTX REST API requests and responses

use chrono::{DateTime, Utc};
use ftx_types::{ArgumentError, OrderType, Query, Side, TriggerType};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Number, Value};

/// JSON number for a decimal amount
///
/// The exchange expects numbers, not strings, for prices and sizes.
/// `serde_json` is built with `arbitrary_precision`, so the number keeps the
/// decimal's exact digits all the way into the signed body.
pub(crate) fn decimal_value(amount: Decimal) -> Value {
    amount
        .to_string()
        .parse::<Number>()
        .map(Value::Number)
        .unwrap_or_else(|_| Value::String(amount.to_string()))
}

// ============================================================================
// Market Data Types
// ============================================================================

/// Spot or futures market
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    /// Market name (e.g. "BTC/USD", "BTC-PERP")
    pub name: String,
    /// "spot" or "future"
    #[serde(rename = "type")]
    pub market_type: String,
    pub base_currency: Option<String>,
    pub quote_currency: Option<String>,
    /// Underlying of a futures market
    pub underlying: Option<String>,
    pub enabled: bool,
    #[serde(default)]
    pub post_only: bool,
    pub price_increment: Decimal,
    pub size_increment: Decimal,
    pub ask: Option<Decimal>,
    pub bid: Option<Decimal>,
    pub last: Option<Decimal>,
    pub price: Option<Decimal>,
    pub quote_volume24h: Option<Decimal>,
    pub volume_usd24h: Option<Decimal>,
}

impl Market {
    pub fn is_spot(&self) -> bool {
        self.market_type == "spot"
    }

    pub fn is_future(&self) -> bool {
        self.market_type == "future"
    }
}

/// One orderbook level, `[price, size]` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BookLevel(pub Decimal, pub Decimal);

impl BookLevel {
    pub fn price(&self) -> Decimal {
        self.0
    }

    pub fn size(&self) -> Decimal {
        self.1
    }
}

/// Orderbook snapshot, best levels first
#[derive(Debug, Clone, Deserialize)]
pub struct Orderbook {
    pub asks: Vec<BookLevel>,
    pub bids: Vec<BookLevel>,
}

impl Orderbook {
    /// Get the best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(BookLevel::price)
    }

    /// Get the best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(BookLevel::price)
    }

    /// Get the spread
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }

    /// Get the mid price (average of best bid and ask)
    pub fn mid_price(&self) -> Option<Decimal> {
        Some((self.best_ask()? + self.best_bid()?) / Decimal::TWO)
    }
}

/// Public trade
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: u64,
    pub price: Decimal,
    pub size: Decimal,
    pub side: Side,
    #[serde(default)]
    pub liquidation: bool,
    pub time: DateTime<Utc>,
}

/// OHLCV candle
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    pub start_time: DateTime<Utc>,
    /// Window start in epoch milliseconds
    pub time: f64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    /// Absent on index candles
    pub volume: Option<Decimal>,
}

/// Futures contract
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Future {
    pub name: String,
    pub underlying: String,
    pub description: Option<String>,
    /// "future", "perpetual", "move" or "prediction"
    #[serde(rename = "type")]
    pub future_type: String,
    pub expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub perpetual: bool,
    #[serde(default)]
    pub expired: bool,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub post_only: bool,
    pub price_increment: Decimal,
    pub size_increment: Decimal,
    pub last: Option<Decimal>,
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
    pub index: Option<Decimal>,
    pub mark: Option<Decimal>,
    pub open_interest: Option<Decimal>,
    pub volume_usd24h: Option<Decimal>,
}

/// Futures statistics
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FutureStats {
    pub volume: Decimal,
    pub next_funding_rate: Option<Decimal>,
    pub next_funding_time: Option<DateTime<Utc>>,
    pub expiration_price: Option<Decimal>,
    pub predicted_expiration_price: Option<Decimal>,
    pub strike_price: Option<Decimal>,
    pub open_interest: Option<Decimal>,
}

/// Hourly funding rate of a perpetual
#[derive(Debug, Clone, Deserialize)]
pub struct FundingRate {
    pub future: String,
    pub rate: Decimal,
    pub time: DateTime<Utc>,
}

// ============================================================================
// Account Types
// ============================================================================

/// Account summary
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub username: Option<String>,
    pub collateral: Decimal,
    pub free_collateral: Decimal,
    pub total_account_value: Decimal,
    pub total_position_size: Decimal,
    pub leverage: Decimal,
    pub margin_fraction: Option<Decimal>,
    pub initial_margin_requirement: Option<Decimal>,
    pub maintenance_margin_requirement: Option<Decimal>,
    pub maker_fee: Decimal,
    pub taker_fee: Decimal,
    #[serde(default)]
    pub positions: Vec<Position>,
}

/// Futures position
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub future: String,
    pub side: Side,
    pub size: Decimal,
    pub net_size: Decimal,
    pub cost: Decimal,
    pub entry_price: Option<Decimal>,
    pub unrealized_pnl: Decimal,
    pub realized_pnl: Decimal,
    pub estimated_liquidation_price: Option<Decimal>,
    pub open_size: Option<Decimal>,
    pub collateral_used: Option<Decimal>,
    /// Only present when requested with `showAvgPrice`
    pub recent_average_open_price: Option<Decimal>,
}

impl Position {
    /// Returns true if the position holds any size
    pub fn is_open(&self) -> bool {
        !self.size.is_zero()
    }
}

/// Funding payment on a perpetual position
#[derive(Debug, Clone, Deserialize)]
pub struct FundingPayment {
    pub id: u64,
    pub future: String,
    pub payment: Decimal,
    pub rate: Option<Decimal>,
    pub time: DateTime<Utc>,
}

/// Maker or taker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Liquidity {
    Maker,
    Taker,
}

/// Own trade execution
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    pub id: u64,
    pub market: Option<String>,
    pub future: Option<String>,
    pub base_currency: Option<String>,
    pub quote_currency: Option<String>,
    /// "order" for regular fills
    #[serde(rename = "type")]
    pub fill_type: String,
    pub side: Side,
    pub price: Decimal,
    pub size: Decimal,
    pub order_id: Option<u64>,
    pub trade_id: Option<u64>,
    pub fee: Decimal,
    pub fee_rate: Decimal,
    pub fee_currency: String,
    pub liquidity: Liquidity,
    pub time: DateTime<Utc>,
}

impl Fill {
    /// Notional value of the fill
    pub fn value(&self) -> Decimal {
        self.price * self.size
    }
}

// ============================================================================
// Wallet Types
// ============================================================================

/// Coin balance
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub coin: String,
    pub free: Decimal,
    pub total: Decimal,
    pub usd_value: Option<Decimal>,
    pub spot_borrow: Option<Decimal>,
    pub available_without_borrow: Option<Decimal>,
}

/// Coin listed in the wallet
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletCoin {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub can_deposit: bool,
    #[serde(default)]
    pub can_withdraw: bool,
    #[serde(default)]
    pub has_tag: bool,
    /// Deposit chains for multi-chain coins
    #[serde(default)]
    pub methods: Vec<String>,
}

/// Deposit address
#[derive(Debug, Clone, Deserialize)]
pub struct DepositAddress {
    pub address: String,
    pub tag: Option<String>,
}

/// Deposit or withdrawal record
#[derive(Debug, Clone, Deserialize)]
pub struct WalletTransfer {
    pub id: u64,
    pub coin: String,
    pub size: Decimal,
    pub status: String,
    pub time: DateTime<Utc>,
    pub fee: Option<Decimal>,
    pub txid: Option<String>,
    pub notes: Option<String>,
}

// ============================================================================
// Subaccount Types
// ============================================================================

/// Subaccount listing entry
#[derive(Debug, Clone, Deserialize)]
pub struct Subaccount {
    pub nickname: String,
    #[serde(default)]
    pub deletable: bool,
    #[serde(default)]
    pub editable: bool,
    #[serde(default)]
    pub competition: bool,
}

/// Result of a transfer between subaccounts
#[derive(Debug, Clone, Deserialize)]
pub struct SubaccountTransfer {
    pub id: u64,
    pub coin: String,
    pub size: Decimal,
    pub status: String,
    pub time: DateTime<Utc>,
    pub notes: Option<String>,
}

// ============================================================================
// Order Types
// ============================================================================

/// Order lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    New,
    Open,
    Closed,
    Cancelled,
    Triggered,
    #[serde(other)]
    Unknown,
}

/// Plain order
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    pub client_id: Option<String>,
    pub market: String,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub side: Side,
    /// Absent for market orders
    pub price: Option<Decimal>,
    pub size: Decimal,
    #[serde(default)]
    pub filled_size: Decimal,
    pub remaining_size: Option<Decimal>,
    pub avg_fill_price: Option<Decimal>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub reduce_only: bool,
    #[serde(default)]
    pub ioc: bool,
    #[serde(default)]
    pub post_only: bool,
}

impl Order {
    pub fn is_open(&self) -> bool {
        matches!(self.status, OrderStatus::New | OrderStatus::Open)
    }
}

/// Conditional order
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerOrder {
    pub id: u64,
    pub market: String,
    #[serde(rename = "type")]
    pub trigger_type: TriggerType,
    pub side: Side,
    pub size: Decimal,
    /// Order type placed once triggered
    pub order_type: OrderType,
    pub trigger_price: Option<Decimal>,
    pub order_price: Option<Decimal>,
    pub trail_value: Option<Decimal>,
    pub trail_start: Option<Decimal>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub triggered_at: Option<DateTime<Utc>>,
    pub order_id: Option<u64>,
    pub filled_size: Option<Decimal>,
    pub avg_fill_price: Option<Decimal>,
    #[serde(default)]
    pub reduce_only: bool,
    #[serde(default)]
    pub retry_until_filled: bool,
    pub cancel_reason: Option<String>,
    pub error: Option<String>,
}

/// One firing of a trigger order
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEvent {
    pub time: DateTime<Utc>,
    pub order_size: Option<Decimal>,
    pub filled_size: Option<Decimal>,
    pub order_id: Option<u64>,
    pub error: Option<String>,
}

/// Order to place
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub market: String,
    pub side: Side,
    pub order_type: OrderType,
    pub size: Decimal,
    /// Required for limit orders, never sent for market orders
    pub price: Option<Decimal>,
    pub reduce_only: bool,
    pub ioc: bool,
    pub post_only: bool,
    pub client_id: Option<String>,
}

impl OrderRequest {
    /// Create a limit order
    pub fn limit(market: impl Into<String>, side: Side, size: Decimal, price: Decimal) -> Self {
        Self {
            market: market.into(),
            side,
            order_type: OrderType::Limit,
            size,
            price: Some(price),
            reduce_only: false,
            ioc: false,
            post_only: false,
            client_id: None,
        }
    }

    /// Create a market order
    pub fn market(market: impl Into<String>, side: Side, size: Decimal) -> Self {
        Self {
            market: market.into(),
            side,
            order_type: OrderType::Market,
            size,
            price: None,
            reduce_only: false,
            ioc: false,
            post_only: false,
            client_id: None,
        }
    }

    /// Only reduce an existing position
    pub fn reduce_only(mut self) -> Self {
        self.reduce_only = true;
        self
    }

    /// Immediate-or-cancel
    pub fn ioc(mut self) -> Self {
        self.ioc = true;
        self
    }

    /// Set as post-only (maker only)
    pub fn post_only(mut self) -> Self {
        self.post_only = true;
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Validate and convert into request parameters
    pub fn to_query(&self) -> Result<Query, ArgumentError> {
        if self.size <= Decimal::ZERO {
            return Err(ArgumentError::new("size", "must be positive"));
        }
        let price = match (self.order_type, self.price) {
            (OrderType::Limit, None) => {
                return Err(ArgumentError::new("price", "is required for limit orders"))
            }
            (OrderType::Limit, price) => price,
            (OrderType::Market, _) => None,
        };

        Ok(Query::new()
            .with("market", self.market.as_str())
            .with("side", self.side.as_str())
            .with_opt("price", price.map(decimal_value))
            .with("type", self.order_type.as_str())
            .with("size", decimal_value(self.size))
            .with("reduceOnly", self.reduce_only)
            .with("ioc", self.ioc)
            .with("postOnly", self.post_only)
            .with_opt("clientId", self.client_id.as_deref()))
    }
}

/// Conditional order to place
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerOrderRequest {
    pub market: String,
    pub side: Side,
    pub trigger_type: TriggerType,
    pub size: Decimal,
    pub trigger_price: Option<Decimal>,
    /// Limit price once triggered; market order if unset
    pub order_price: Option<Decimal>,
    /// Distance from the best price, for trailing stops
    pub trail_value: Option<Decimal>,
    pub reduce_only: bool,
    pub retry_until_filled: bool,
}

impl TriggerOrderRequest {
    fn new(
        market: impl Into<String>,
        side: Side,
        trigger_type: TriggerType,
        size: Decimal,
    ) -> Self {
        Self {
            market: market.into(),
            side,
            trigger_type,
            size,
            trigger_price: None,
            order_price: None,
            trail_value: None,
            reduce_only: false,
            retry_until_filled: true,
        }
    }

    /// Create a stop order
    pub fn stop(market: impl Into<String>, side: Side, size: Decimal, trigger_price: Decimal) -> Self {
        Self {
            trigger_price: Some(trigger_price),
            ..Self::new(market, side, TriggerType::Stop, size)
        }
    }

    /// Create a take profit order
    pub fn take_profit(
        market: impl Into<String>,
        side: Side,
        size: Decimal,
        trigger_price: Decimal,
    ) -> Self {
        Self {
            trigger_price: Some(trigger_price),
            ..Self::new(market, side, TriggerType::TakeProfit, size)
        }
    }

    /// Create a trailing stop; negative trail values follow sells down
    pub fn trailing_stop(
        market: impl Into<String>,
        side: Side,
        size: Decimal,
        trail_value: Decimal,
    ) -> Self {
        Self {
            trail_value: Some(trail_value),
            ..Self::new(market, side, TriggerType::TrailingStop, size)
        }
    }

    /// Place a limit order at `price` once triggered
    pub fn with_order_price(mut self, price: Decimal) -> Self {
        self.order_price = Some(price);
        self
    }

    pub fn reduce_only(mut self) -> Self {
        self.reduce_only = true;
        self
    }

    pub fn retry_until_filled(mut self, retry: bool) -> Self {
        self.retry_until_filled = retry;
        self
    }

    /// Validate and convert into request parameters
    pub fn to_query(&self) -> Result<Query, ArgumentError> {
        if self.size <= Decimal::ZERO {
            return Err(ArgumentError::new("size", "must be positive"));
        }
        let query = Query::new()
            .with("market", self.market.as_str())
            .with("side", self.side.as_str())
            .with("size", decimal_value(self.size))
            .with("type", self.trigger_type.as_str())
            .with("reduceOnly", self.reduce_only)
            .with("retryUntilFilled", self.retry_until_filled);

        if self.trigger_type.is_trailing() {
            let trail = self
                .trail_value
                .ok_or_else(|| ArgumentError::new("trailValue", "is required for trailing stops"))?;
            Ok(query.with("trailValue", decimal_value(trail)))
        } else {
            let trigger = self.trigger_price.ok_or_else(|| {
                ArgumentError::new("triggerPrice", "is required for stop and take profit orders")
            })?;
            Ok(query
                .with("triggerPrice", decimal_value(trigger))
                .with_opt("orderPrice", self.order_price.map(decimal_value)))
        }
    }
}

/// Time window and page size for history endpoints
///
/// Times travel as epoch seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub limit: Option<u32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl HistoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn since(mut self, start: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self
    }

    pub fn until(mut self, end: DateTime<Utc>) -> Self {
        self.end_time = Some(end);
        self
    }

    /// Add the set fields to `query`
    pub fn apply(&self, query: Query) -> Query {
        query
            .with_opt("limit", self.limit)
            .with_opt("start_time", self.start_time.map(|t| t.timestamp()))
            .with_opt("end_time", self.end_time.map(|t| t.timestamp()))
    }

    pub fn to_query(&self) -> Query {
        self.apply(Query::new())
    }
}
