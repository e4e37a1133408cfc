//! Wallet endpoints: balances, deposit addresses and transfer history

use std::collections::HashMap;

use ftx_types::Query;
use serde_json::Value;
use tracing::{debug, instrument};

use super::catalog;
use crate::client::FtxRestClient;
use crate::error::RestResult;
use crate::types::{Balance, DepositAddress, HistoryFilter, WalletCoin, WalletTransfer};

/// Wallet endpoints
pub struct WalletEndpoints<'a> {
    client: &'a FtxRestClient,
}

impl<'a> WalletEndpoints<'a> {
    pub fn new(client: &'a FtxRestClient) -> Self {
        Self { client }
    }

    /// List coins with their deposit and withdrawal capabilities
    #[instrument(skip(self))]
    pub async fn get_wallet_coins(&self) -> RestResult<Vec<WalletCoin>> {
        self.client
            .invoke_as(&catalog::GET_WALLET_COINS, &[], Query::new())
            .await
    }

    /// Get balances of the current account
    #[instrument(skip(self))]
    pub async fn get_balances(&self) -> RestResult<Vec<Balance>> {
        self.client
            .invoke_as(&catalog::GET_BALANCES, &[], Query::new())
            .await
    }

    /// Get the balance of one coin, if the account holds it
    ///
    /// Filters [`get_balances`](Self::get_balances) locally; the match on
    /// `coin` is exact.
    #[instrument(skip(self))]
    pub async fn get_balance(&self, coin: &str) -> RestResult<Option<Balance>> {
        let balances = self.get_balances().await?;
        Ok(balances.into_iter().find(|b| b.coin == coin))
    }

    /// Get balances of every subaccount, keyed by nickname
    #[instrument(skip(self))]
    pub async fn get_all_balances(&self) -> RestResult<HashMap<String, Vec<Balance>>> {
        self.client
            .invoke_as(&catalog::GET_ALL_BALANCES, &[], Query::new())
            .await
    }

    /// Get a deposit address
    ///
    /// # Arguments
    /// * `coin` - Coin, case-insensitive
    /// * `chain` - One of omni, erc20, trx, sol, bep2 for multi-chain coins
    #[instrument(skip(self))]
    pub async fn get_deposit_address(
        &self,
        coin: &str,
        chain: Option<&str>,
    ) -> RestResult<DepositAddress> {
        let coin = coin.to_uppercase();
        debug!(coin = %coin, "Fetching deposit address");

        let query = Query::new().with_opt("method", chain);
        self.client
            .invoke_as(&catalog::GET_DEPOSIT_ADDRESS, &[coin.as_str()], query)
            .await
    }

    /// Get deposit history
    #[instrument(skip(self))]
    pub async fn get_deposit_history(
        &self,
        filter: HistoryFilter,
    ) -> RestResult<Vec<WalletTransfer>> {
        self.client
            .invoke_as(&catalog::GET_DEPOSITS, &[], filter.to_query())
            .await
    }

    /// Get withdrawal history
    #[instrument(skip(self))]
    pub async fn get_withdrawal_history(
        &self,
        filter: HistoryFilter,
    ) -> RestResult<Vec<WalletTransfer>> {
        self.client
            .invoke_as(&catalog::GET_WITHDRAWALS, &[], filter.to_query())
            .await
    }

    /// Get airdrop history
    #[instrument(skip(self))]
    pub async fn get_wallet_airdrops(&self, filter: HistoryFilter) -> RestResult<Value> {
        self.client
            .invoke(&catalog::GET_AIRDROPS, &[], filter.to_query())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::test_support::mock_client;
    use crate::error::RestError;
    use serde_json::json;

    fn balances() -> Value {
        json!([
            {"coin": "USD", "free": 100.5, "total": 120.0, "usdValue": 120.0},
            {"coin": "BTC", "free": 0.5, "total": 0.5}
        ])
    }

    #[tokio::test]
    async fn test_get_balance_filters_locally() {
        let (client, transport) = mock_client();
        transport.push_result(balances());
        transport.push_result(balances());

        let wallet = client.wallet().unwrap();
        let btc = wallet.get_balance("BTC").await.unwrap().unwrap();
        assert_eq!(btc.total.to_string(), "0.5");
        assert!(wallet.get_balance("ETH").await.unwrap().is_none());

        for request in transport.requests() {
            assert_eq!(request.url, "https://ftx.com/api/wallet/balances");
        }
    }

    #[tokio::test]
    async fn test_unknown_chain_never_dispatches() {
        let (client, transport) = mock_client();
        let err = client
            .wallet()
            .unwrap()
            .get_deposit_address("usdt", Some("polygon"))
            .await
            .unwrap_err();

        assert!(matches!(err, RestError::InvalidArgument(ref e) if e.name == "method"));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_deposit_address_sends_chain_as_method() {
        let (client, transport) = mock_client();
        transport.push_result(json!({"address": "0x83a1", "tag": null}));

        let address = client
            .wallet()
            .unwrap()
            .get_deposit_address("usdt", Some("erc20"))
            .await
            .unwrap();
        assert_eq!(address.address, "0x83a1");
        assert_eq!(address.tag, None);

        assert_eq!(
            transport.last_request().unwrap().url,
            "https://ftx.com/api/wallet/deposit_address/USDT?method=erc20"
        );
    }

    #[tokio::test]
    async fn test_history_without_filter_has_no_query_string() {
        let (client, transport) = mock_client();
        transport.push_result(json!([]));

        client
            .wallet()
            .unwrap()
            .get_withdrawal_history(HistoryFilter::new())
            .await
            .unwrap();

        assert_eq!(
            transport.last_request().unwrap().url,
            "https://ftx.com/api/wallet/withdrawals"
        );
    }
}
