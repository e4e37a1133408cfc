//! Common test utilities and fixtures for integration tests
//!
//! Contains sample envelopes shaped like live FTX REST responses

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use ftx_rest::{
    ClientConfig, Credentials, FixedClock, FtxRestClient, HttpRequest, HttpTransport,
    TransportError,
};
use parking_lot::Mutex;
use serde_json::Value;

pub const API_KEY: &str = "LR0RQT6bKjrUNh38eCw9jYC89VDAbRkCogAc_XAm";
pub const API_SECRET: &str = "T4lPid48QtjNxjLUFOcUZghD7CUJ7sTVsfuvQZF2";
pub const NOW_MILLIS: u64 = 1_588_591_511_721;

/// Orderbook envelope
pub const ORDERBOOK_RESPONSE: &str = r#"{
    "success": true,
    "result": {
        "asks": [[4114.25, 6.263], [4114.5, 12.0]],
        "bids": [[4112.25, 49.29], [4112.0, 3.1]]
    }
}"#;

/// Open orders envelope
pub const OPEN_ORDERS_RESPONSE: &str = r#"{
    "success": true,
    "result": [{
        "createdAt": "2019-03-05T09:56:55.728933+00:00",
        "filledSize": 10,
        "future": "XRP-PERP",
        "id": 9596912,
        "market": "XRP-PERP",
        "price": 0.306525,
        "avgFillPrice": 0.306526,
        "remainingSize": 31421,
        "side": "sell",
        "size": 31431,
        "status": "open",
        "type": "limit",
        "reduceOnly": false,
        "ioc": false,
        "postOnly": false,
        "clientId": null
    }]
}"#;

/// Balances envelope
pub const BALANCES_RESPONSE: &str = r#"{
    "success": true,
    "result": [
        {"coin": "USDTBEAR", "free": 2320.2, "spotBorrow": 0.0, "total": 2340.2, "usdValue": 2340.2, "availableWithoutBorrow": 2320.2},
        {"coin": "BTC", "free": 0.25, "spotBorrow": 0.0, "total": 0.25, "usdValue": 12000.0, "availableWithoutBorrow": 0.25}
    ]
}"#;

/// Markets envelope
pub const MARKETS_RESPONSE: &str = r#"{
    "success": true,
    "result": [{
        "name": "BTC-0628",
        "baseCurrency": null,
        "quoteCurrency": null,
        "quoteVolume24h": 28914.76,
        "change1h": 0.012,
        "change24h": 0.0299,
        "changeBod": 0.0156,
        "highLeverageFeeExempt": false,
        "minProvideSize": 0.001,
        "type": "future",
        "underlying": "BTC",
        "enabled": true,
        "ask": 3949.25,
        "bid": 3949,
        "last": 10579.52,
        "postOnly": false,
        "price": 10579.52,
        "priceIncrement": 0.25,
        "sizeIncrement": 0.0001,
        "restricted": false,
        "volumeUsd24h": 28914.76
    }]
}"#;

/// Rejection envelope
pub const REJECTION_RESPONSE: &str = r#"{"success": false, "error": "Invalid parameter"}"#;

pub fn parse(raw: &str) -> Value {
    serde_json::from_str(raw).expect("fixture is valid JSON")
}

/// Transport that records requests and replays queued responses
#[derive(Debug, Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, raw: &str) {
        self.responses.lock().push_back(Ok(parse(raw)));
    }

    pub fn fail(&self, error: TransportError) {
        self.responses.lock().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub fn last(&self) -> HttpRequest {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("a request was dispatched")
    }

    pub fn count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn execute(&self, request: HttpRequest) -> Result<Value, TransportError> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Connection("nothing queued".into())))
    }
}

/// Client with credentials over a recording transport and a fixed clock
pub fn authenticated_client() -> (FtxRestClient, Arc<RecordingTransport>, Arc<FixedClock>) {
    client_with(ClientConfig::new().with_credentials(Credentials::new(API_KEY, API_SECRET)))
}

/// Client without credentials
pub fn public_client() -> (FtxRestClient, Arc<RecordingTransport>, Arc<FixedClock>) {
    client_with(ClientConfig::new())
}

pub fn client_with(
    config: ClientConfig,
) -> (FtxRestClient, Arc<RecordingTransport>, Arc<FixedClock>) {
    let transport = RecordingTransport::new();
    let clock = Arc::new(FixedClock::new(NOW_MILLIS));
    let client = FtxRestClient::with_transport(config, transport.clone()).with_clock(clock.clone());
    (client, transport, clock)
}
