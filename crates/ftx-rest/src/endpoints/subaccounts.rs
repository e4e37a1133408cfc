//! Subaccount management endpoints

use ftx_types::Query;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::instrument;

use super::catalog;
use crate::client::FtxRestClient;
use crate::error::RestResult;
use crate::types::{decimal_value, Balance, Subaccount, SubaccountTransfer};

/// Nickname the exchange uses for the main account in transfers
pub const MAIN_ACCOUNT: &str = "main";

/// Subaccount endpoints
pub struct SubaccountEndpoints<'a> {
    client: &'a FtxRestClient,
}

impl<'a> SubaccountEndpoints<'a> {
    pub fn new(client: &'a FtxRestClient) -> Self {
        Self { client }
    }

    /// List all subaccounts
    #[instrument(skip(self))]
    pub async fn get_subaccounts(&self) -> RestResult<Vec<Subaccount>> {
        self.client
            .invoke_as(&catalog::GET_SUBACCOUNTS, &[], Query::new())
            .await
    }

    /// Get balances of one subaccount
    #[instrument(skip(self))]
    pub async fn get_subaccount_balances(&self, nickname: &str) -> RestResult<Vec<Balance>> {
        self.client
            .invoke_as(&catalog::GET_SUBACCOUNT_BALANCES, &[nickname], Query::new())
            .await
    }

    #[instrument(skip(self))]
    pub async fn create_subaccount(&self, nickname: &str) -> RestResult<Subaccount> {
        let query = Query::new().with("nickname", nickname);
        self.client
            .invoke_as(&catalog::CREATE_SUBACCOUNT, &[], query)
            .await
    }

    #[instrument(skip(self))]
    pub async fn change_subaccount_name(
        &self,
        nickname: &str,
        new_nickname: &str,
    ) -> RestResult<Value> {
        let query = Query::new()
            .with("nickname", nickname)
            .with("newNickname", new_nickname);
        self.client
            .invoke(&catalog::CHANGE_SUBACCOUNT_NAME, &[], query)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_subaccount(&self, nickname: &str) -> RestResult<Value> {
        let query = Query::new().with("nickname", nickname);
        self.client
            .invoke(&catalog::DELETE_SUBACCOUNT, &[], query)
            .await
    }

    /// Move funds between subaccounts
    ///
    /// Use [`MAIN_ACCOUNT`] as `source` or `destination` for the main account.
    #[instrument(skip(self))]
    pub async fn transfer_balances(
        &self,
        coin: &str,
        size: Decimal,
        source: &str,
        destination: &str,
    ) -> RestResult<SubaccountTransfer> {
        let query = Query::new()
            .with("coin", coin)
            .with("size", decimal_value(size))
            .with("source", source)
            .with("destination", destination);
        self.client
            .invoke_as(&catalog::TRANSFER_BALANCES, &[], query)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::test_support::mock_client;
    use ftx_types::Method;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[tokio::test]
    async fn test_delete_sends_nickname_as_body() {
        let (client, transport) = mock_client();
        transport.push_result(Value::Null);

        client
            .subaccounts()
            .unwrap()
            .delete_subaccount("bot")
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.url, "https://ftx.com/api/subaccounts");
        assert_eq!(request.body.as_deref(), Some(r#"{"nickname":"bot"}"#));
    }

    #[tokio::test]
    async fn test_balances_path_encodes_nickname() {
        let (client, transport) = mock_client();
        transport.push_result(json!([]));

        client
            .subaccounts()
            .unwrap()
            .get_subaccount_balances("my bot")
            .await
            .unwrap();

        assert_eq!(
            transport.last_request().unwrap().url,
            "https://ftx.com/api/subaccounts/my%20bot/balances"
        );
    }

    #[tokio::test]
    async fn test_transfer_body_order() {
        let (client, transport) = mock_client();
        transport.push_result(json!({
            "id": 316450, "coin": "XRP", "size": 10000, "status": "complete",
            "time": "2019-03-05T09:56:55.728933+00:00", "notes": null
        }));

        let transfer = client
            .subaccounts()
            .unwrap()
            .transfer_balances("XRP", dec!(10000), MAIN_ACCOUNT, "bot")
            .await
            .unwrap();
        assert_eq!(transfer.id, 316450);

        assert_eq!(
            transport.last_request().unwrap().body.as_deref(),
            Some(r#"{"coin":"XRP","size":10000,"source":"main","destination":"bot"}"#)
        );
    }
}
