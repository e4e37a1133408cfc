//! SRM staking and spot margin lending endpoints
//!
//! Responses here have no stable documented shape and are returned as JSON.

use ftx_types::Query;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::instrument;

use super::catalog;
use crate::client::FtxRestClient;
use crate::error::RestResult;
use crate::types::decimal_value;

/// Staking and lending endpoints
pub struct StakingEndpoints<'a> {
    client: &'a FtxRestClient,
}

impl<'a> StakingEndpoints<'a> {
    pub fn new(client: &'a FtxRestClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn get_srm_stake_history(&self) -> RestResult<Value> {
        self.client
            .invoke(&catalog::GET_SRM_STAKES, &[], Query::new())
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_srm_unstake_history(&self) -> RestResult<Value> {
        self.client
            .invoke(&catalog::GET_SRM_UNSTAKE_REQUESTS, &[], Query::new())
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_srm_stake_balances(&self) -> RestResult<Value> {
        self.client
            .invoke(&catalog::GET_SRM_STAKE_BALANCES, &[], Query::new())
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_srm_stake_rewards_history(&self) -> RestResult<Value> {
        self.client
            .invoke(&catalog::GET_SRM_STAKING_REWARDS, &[], Query::new())
            .await
    }

    /// Request to unstake `size` of `coin` (SRM, SRM_LOCKED or MSRM)
    #[instrument(skip(self))]
    pub async fn srm_unstake(&self, coin: &str, size: Decimal) -> RestResult<Value> {
        let query = Query::new()
            .with("coin", coin)
            .with("size", decimal_value(size));
        self.client
            .invoke(&catalog::SRM_UNSTAKE, &[], query)
            .await
    }

    /// Cancel a pending unstake request
    #[instrument(skip(self))]
    pub async fn cancel_srm_unstake(&self, stake_id: u64) -> RestResult<Value> {
        let stake_id = stake_id.to_string();
        self.client
            .invoke(&catalog::CANCEL_SRM_UNSTAKE, &[stake_id.as_str()], Query::new())
            .await
    }

    /// Stake `size` of `coin`
    #[instrument(skip(self))]
    pub async fn srm_stake(&self, coin: &str, size: Decimal) -> RestResult<Value> {
        let query = Query::new()
            .with("coin", coin)
            .with("size", decimal_value(size));
        self.client
            .invoke(&catalog::SRM_STAKE, &[], query)
            .await
    }

    /// Get current and estimated lending rates per coin
    #[instrument(skip(self))]
    pub async fn get_margin_lending_rates(&self) -> RestResult<Value> {
        self.client
            .invoke(&catalog::GET_LENDING_RATES, &[], Query::new())
            .await
    }

    /// Offer `size` of `coin` for lending at hourly `rate`
    #[instrument(skip(self))]
    pub async fn set_margin_lending_offer(
        &self,
        coin: &str,
        size: Decimal,
        rate: Decimal,
    ) -> RestResult<Value> {
        let query = Query::new()
            .with("coin", coin)
            .with("size", decimal_value(size))
            .with("rate", decimal_value(rate));
        self.client
            .invoke(&catalog::SET_LENDING_OFFER, &[], query)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::test_support::mock_client;
    use ftx_auth::sign_payload;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[tokio::test]
    async fn test_stake_signature_covers_body() {
        let (client, transport) = mock_client();
        transport.push_result(json!({"id": 1}));

        client
            .staking()
            .unwrap()
            .srm_stake("SRM", dec!(1.5))
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        let body = request.body.clone().unwrap();
        assert_eq!(body, r#"{"coin":"SRM","size":1.5}"#);

        let ts = request.header("FTX-TS").unwrap();
        let payload = format!("{}POST/api/srm_stakes/stakes{}", ts, body);
        assert_eq!(request.header("FTX-SIGN"), Some(sign_payload("secret", &payload).as_str()));
    }

    #[tokio::test]
    async fn test_cancel_unstake_path() {
        let (client, transport) = mock_client();
        transport.push_result(json!("Cancelled"));

        client
            .staking()
            .unwrap()
            .cancel_srm_unstake(31)
            .await
            .unwrap();

        assert_eq!(
            transport.last_request().unwrap().url,
            "https://ftx.com/api/srm_stakes/unstake_requests/31"
        );
    }

    #[tokio::test]
    async fn test_lending_offer_body() {
        let (client, transport) = mock_client();
        transport.push_result(Value::Null);

        client
            .staking()
            .unwrap()
            .set_margin_lending_offer("USD", dec!(1000), dec!(0.25))
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "https://ftx.com/api/spot_margin/offers");
        assert_eq!(
            request.body.as_deref(),
            Some(r#"{"coin":"USD","size":1000,"rate":0.25}"#)
        );
    }
}
