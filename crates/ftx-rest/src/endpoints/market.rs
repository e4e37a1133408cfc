//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use std::collections::HashMap;

use ftx_types::Query;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use super::catalog;
use crate::client::FtxRestClient;
use crate::error::RestResult;
use crate::types::{Candle, FundingRate, Future, FutureStats, HistoryFilter, Market, Orderbook, Trade};

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a FtxRestClient,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a FtxRestClient) -> Self {
        Self { client }
    }

    /// List all spot and futures markets
    #[instrument(skip(self))]
    pub async fn get_markets(&self) -> RestResult<Vec<Market>> {
        self.client
            .invoke_as(&catalog::GET_MARKETS, &[], Query::new())
            .await
    }

    /// Get a single market
    ///
    /// # Arguments
    /// * `pair` - Market name, case-insensitive (e.g., "btc/usd", "BTC-PERP")
    #[instrument(skip(self))]
    pub async fn get_market(&self, pair: &str) -> RestResult<Market> {
        let pair = pair.to_uppercase();
        self.client
            .invoke_as(&catalog::GET_MARKET, &[pair.as_str()], Query::new())
            .await
    }

    /// Get the orderbook for a market
    ///
    /// # Arguments
    /// * `pair` - Market name (e.g., "BTC/USD")
    /// * `depth` - Price levels per side, 20 to 100
    #[instrument(skip(self))]
    pub async fn get_orderbook(&self, pair: &str, depth: u32) -> RestResult<Orderbook> {
        debug!(depth, "Fetching orderbook");

        let query = Query::new().with("depth", depth);
        self.client
            .invoke_as(&catalog::GET_ORDERBOOK, &[pair], query)
            .await
    }

    /// Get recent trades for a market
    #[instrument(skip(self))]
    pub async fn get_recent_trades(
        &self,
        pair: &str,
        filter: HistoryFilter,
    ) -> RestResult<Vec<Trade>> {
        self.client
            .invoke_as(&catalog::GET_TRADES, &[pair], filter.to_query())
            .await
    }

    /// Get historical candles for a market
    ///
    /// # Arguments
    /// * `pair` - Market name
    /// * `resolution` - Window length in seconds: 15, 60, 300, 900, 3600, 14400 or 86400
    /// * `filter` - Time window and limit
    #[instrument(skip(self))]
    pub async fn get_candles(
        &self,
        pair: &str,
        resolution: u32,
        filter: HistoryFilter,
    ) -> RestResult<Vec<Candle>> {
        let query = filter.apply(Query::new().with("resolution", resolution));
        self.client
            .invoke_as(&catalog::GET_CANDLES, &[pair], query)
            .await
    }

    /// List all futures
    #[instrument(skip(self))]
    pub async fn get_futures(&self) -> RestResult<Vec<Future>> {
        self.client
            .invoke_as(&catalog::GET_FUTURES, &[], Query::new())
            .await
    }

    /// List perpetual futures only
    #[instrument(skip(self))]
    pub async fn get_perpetual_futures(&self) -> RestResult<Vec<Future>> {
        let futures = self.get_futures().await?;
        Ok(futures.into_iter().filter(|f| f.perpetual).collect())
    }

    /// Get a single future, e.g. "BTC-PERP"
    #[instrument(skip(self))]
    pub async fn get_future(&self, name: &str) -> RestResult<Future> {
        let name = name.to_uppercase();
        self.client
            .invoke_as(&catalog::GET_FUTURE, &[name.as_str()], Query::new())
            .await
    }

    /// Get statistics of a future
    #[instrument(skip(self))]
    pub async fn get_future_stats(&self, name: &str) -> RestResult<FutureStats> {
        let name = name.to_uppercase();
        self.client
            .invoke_as(&catalog::GET_FUTURE_STATS, &[name.as_str()], Query::new())
            .await
    }

    /// Get funding rates, optionally for one future
    ///
    /// Only the time bounds of `filter` apply here.
    #[instrument(skip(self))]
    pub async fn get_funding_rates(
        &self,
        future: Option<&str>,
        filter: HistoryFilter,
    ) -> RestResult<Vec<FundingRate>> {
        let query = filter.apply(Query::new().with_opt("future", future));
        self.client
            .invoke_as(&catalog::GET_FUNDING_RATES, &[], query)
            .await
    }

    /// Get the component weights of an index, e.g. "ALT"
    #[instrument(skip(self))]
    pub async fn get_index_weights(&self, index: &str) -> RestResult<HashMap<String, Decimal>> {
        self.client
            .invoke_as(&catalog::GET_INDEX_WEIGHTS, &[index], Query::new())
            .await
    }

    /// List expired futures
    #[instrument(skip(self))]
    pub async fn get_expired_futures(&self) -> RestResult<Vec<Future>> {
        self.client
            .invoke_as(&catalog::GET_EXPIRED_FUTURES, &[], Query::new())
            .await
    }

    /// Get historical candles for an index
    #[instrument(skip(self))]
    pub async fn get_index_candles(
        &self,
        index: &str,
        resolution: u32,
        filter: HistoryFilter,
    ) -> RestResult<Vec<Candle>> {
        let query = filter.apply(Query::new().with("resolution", resolution));
        self.client
            .invoke_as(&catalog::GET_INDEX_CANDLES, &[index], query)
            .await
    }
}
