//! Private account endpoints
//!
//! These endpoints require authentication.

use ftx_types::Query;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::instrument;

use super::catalog;
use crate::client::FtxRestClient;
use crate::error::RestResult;
use crate::types::{decimal_value, AccountInfo, Fill, FundingPayment, HistoryFilter, Position};

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a FtxRestClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a FtxRestClient) -> Self {
        Self { client }
    }

    /// Get account summary, including open positions
    #[instrument(skip(self))]
    pub async fn get_account_info(&self) -> RestResult<AccountInfo> {
        self.client
            .invoke_as(&catalog::GET_ACCOUNT, &[], Query::new())
            .await
    }

    /// Get futures positions
    ///
    /// # Arguments
    /// * `show_avg_price` - Include the recent average open price
    #[instrument(skip(self))]
    pub async fn get_positions(&self, show_avg_price: bool) -> RestResult<Vec<Position>> {
        let query = Query::new().with("showAvgPrice", show_avg_price);
        self.client
            .invoke_as(&catalog::GET_POSITIONS, &[], query)
            .await
    }

    /// Change the account-wide maximum leverage
    #[instrument(skip(self))]
    pub async fn change_account_leverage(&self, leverage: Decimal) -> RestResult<Value> {
        let query = Query::new().with("leverage", decimal_value(leverage));
        self.client
            .invoke(&catalog::CHANGE_LEVERAGE, &[], query)
            .await
    }

    /// Get funding payments, optionally for one coin's perpetual
    ///
    /// # Arguments
    /// * `coin` - Base coin, e.g. "btc" selects "BTC-PERP"
    /// * `filter` - Time window; the limit is not used here
    #[instrument(skip(self))]
    pub async fn get_funding_payments(
        &self,
        coin: Option<&str>,
        filter: HistoryFilter,
    ) -> RestResult<Vec<FundingPayment>> {
        let future = coin.map(|c| format!("{}-PERP", c.to_uppercase()));
        let query = filter.apply(Query::new().with_opt("future", future));
        self.client
            .invoke_as(&catalog::GET_FUNDING_PAYMENTS, &[], query)
            .await
    }

    /// Get own fills for a market
    ///
    /// # Arguments
    /// * `pair` - Market name
    /// * `filter` - Time window and limit
    /// * `order` - `Some("asc")` for oldest first; newest first otherwise
    /// * `order_id` - Restrict to one order
    #[instrument(skip(self))]
    pub async fn get_fills(
        &self,
        pair: &str,
        filter: HistoryFilter,
        order: Option<&str>,
        order_id: Option<u64>,
    ) -> RestResult<Vec<Fill>> {
        let query = filter
            .to_query()
            .with_opt("order", order)
            .with_opt("orderId", order_id)
            .with("market", pair);
        self.client
            .invoke_as(&catalog::GET_FILLS, &[], query)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::test_support::mock_client;
    use crate::error::RestError;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[tokio::test]
    async fn test_fills_order_must_be_asc() {
        let (client, transport) = mock_client();
        let err = client
            .account()
            .unwrap()
            .get_fills("BTC-PERP", HistoryFilter::new(), Some("desc"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, RestError::InvalidArgument(ref e) if e.name == "order"));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_fills_query_omits_unset_parameters() {
        let (client, transport) = mock_client();
        transport.push_result(json!([]));

        client
            .account()
            .unwrap()
            .get_fills("BTC-PERP", HistoryFilter::new(), Some("asc"), None)
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(
            request.url,
            "https://ftx.com/api/fills?order=asc&market=BTC-PERP"
        );
        assert!(!request.url.contains("orderId"));
        assert!(!request.url.contains("limit"));
    }

    #[tokio::test]
    async fn test_funding_payments_maps_coin_to_perpetual() {
        let (client, transport) = mock_client();
        transport.push_result(json!([]));

        client
            .account()
            .unwrap()
            .get_funding_payments(Some("eth"), HistoryFilter::new())
            .await
            .unwrap();

        assert_eq!(
            transport.last_request().unwrap().url,
            "https://ftx.com/api/funding_payments?future=ETH-PERP"
        );
    }

    #[tokio::test]
    async fn test_positions_always_send_show_avg_price() {
        let (client, transport) = mock_client();
        transport.push_result(json!([]));

        client.account().unwrap().get_positions(false).await.unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "https://ftx.com/api/positions?showAvgPrice=false");
        assert!(request.header("FTX-SIGN").is_some());
    }

    #[tokio::test]
    async fn test_change_leverage_posts_json_number() {
        let (client, transport) = mock_client();
        transport.push_result(Value::Null);

        client
            .account()
            .unwrap()
            .change_account_leverage(dec!(10))
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "https://ftx.com/api/account/leverage");
        assert_eq!(request.body.as_deref(), Some(r#"{"leverage":10}"#));
    }
}
