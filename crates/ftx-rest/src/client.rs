//! Main REST client implementation

use crate::endpoints::{
    AccountEndpoints, EndpointDef, MarketEndpoints, OrderEndpoints, StakingEndpoints,
    SubaccountEndpoints, WalletEndpoints,
};
use crate::error::{RestError, RestResult};
use crate::request::{RequestSpec, SignedHeaders};
use crate::response::{decode, normalize_response};
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use crate::types::{Balance, Market, Order, OrderRequest, Orderbook};
use ftx_auth::{Clock, Credentials, RequestSigner, SystemClock};
use ftx_types::constants::{
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, PRIVATE_API_URL, PUBLIC_API_URL,
};
use ftx_types::{Query, Scope};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// FTX REST API client
///
/// Provides access to both public and private endpoints. Cloning is cheap
/// and clones share the transport; every call is independent, so one client
/// can serve concurrent tasks without coordination.
///
/// # Example
///
/// ```no_run
/// use ftx_rest::{Credentials, FtxRestClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = FtxRestClient::new()?;
///     let book = client.get_orderbook("BTC/USD", 20).await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = FtxRestClient::with_credentials(creds)?;
///     let balances = auth_client.get_balances().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct FtxRestClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
}

impl FtxRestClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available.
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a client from `FTX_API_KEY`, `FTX_API_SECRET` and `FTX_SUBACCOUNT`
    pub fn from_env() -> RestResult<Self> {
        Self::with_credentials(Credentials::from_env()?)
    }

    /// Create a new client with custom configuration, dispatching over reqwest
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let transport = reqwest_transport(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over an injected transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        info!(
            public_url = %config.public_url,
            private_url = %config.private_url,
            authenticated = config.credentials.is_some(),
            "Created FTX REST client"
        );

        Self {
            config: Arc::new(config),
            transport,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the nonce clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.config.credentials.is_some()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn credentials(&self) -> RestResult<&Credentials> {
        self.config
            .credentials
            .as_ref()
            .ok_or(RestError::AuthRequired)
    }

    // ========================================================================
    // Request pipeline
    // ========================================================================

    /// Build the HTTP request for `spec` without sending it
    ///
    /// Private requests are signed here, so each call draws a fresh nonce.
    pub fn prepare(&self, spec: &RequestSpec) -> RestResult<HttpRequest> {
        let scope = spec.resolved_scope();

        let signer = self
            .config
            .credentials
            .as_ref()
            .map(|creds| RequestSigner::new(creds, self.clock.as_ref()));
        let headers = SignedHeaders::build(spec, &self.config.user_agent, signer.as_ref())?;

        let base = match scope {
            Scope::Public => &self.config.public_url,
            Scope::Private => &self.config.private_url,
        };

        Ok(HttpRequest {
            method: spec.method,
            url: spec.url(base)?,
            headers: headers.to_pairs(),
            body: spec.body()?,
        })
    }

    /// Sign, dispatch and unwrap one request
    #[instrument(skip(self, spec), fields(method = %spec.method, endpoint = %spec.endpoint))]
    pub async fn send(&self, spec: RequestSpec) -> RestResult<Value> {
        let request = self.prepare(&spec)?;
        debug!(scope = %spec.resolved_scope(), url = %request.url, "dispatching request");

        let response = self.transport.execute(request).await?;
        normalize_response(response)
    }

    /// [`send`](Self::send) and deserialize the result
    pub async fn send_as<T: DeserializeOwned>(&self, spec: RequestSpec) -> RestResult<T> {
        decode(self.send(spec).await?)
    }

    /// Invoke a catalog endpoint
    ///
    /// `path_args` fill the template placeholders in order. Fails before
    /// dispatch if a required parameter is missing; parameters the endpoint
    /// does not declare are dropped.
    pub async fn invoke(
        &self,
        endpoint: &EndpointDef,
        path_args: &[&str],
        query: Query,
    ) -> RestResult<Value> {
        let spec = endpoint.request(path_args, query)?;
        self.send(spec).await
    }

    /// [`invoke`](Self::invoke) and deserialize the result
    pub async fn invoke_as<T: DeserializeOwned>(
        &self,
        endpoint: &EndpointDef,
        path_args: &[&str],
        query: Query,
    ) -> RestResult<T> {
        decode(self.invoke(endpoint, path_args, query).await?)
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// List all markets
    pub async fn get_markets(&self) -> RestResult<Vec<Market>> {
        self.market().get_markets().await
    }

    /// Get the orderbook for a market
    ///
    /// # Arguments
    /// * `pair` - Market name (e.g., "BTC/USD", "BTC-PERP")
    /// * `depth` - Price levels per side (20-100)
    pub async fn get_orderbook(&self, pair: &str, depth: u32) -> RestResult<Orderbook> {
        self.market().get_orderbook(pair, depth).await
    }

    // ========================================================================
    // Private Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        self.credentials()?;
        Ok(AccountEndpoints::new(self))
    }

    /// Get wallet endpoints (requires credentials)
    pub fn wallet(&self) -> RestResult<WalletEndpoints<'_>> {
        self.credentials()?;
        Ok(WalletEndpoints::new(self))
    }

    /// Get subaccount endpoints (requires credentials)
    pub fn subaccounts(&self) -> RestResult<SubaccountEndpoints<'_>> {
        self.credentials()?;
        Ok(SubaccountEndpoints::new(self))
    }

    /// Get order endpoints (requires credentials)
    pub fn orders(&self) -> RestResult<OrderEndpoints<'_>> {
        self.credentials()?;
        Ok(OrderEndpoints::new(self))
    }

    /// Get staking and lending endpoints (requires credentials)
    pub fn staking(&self) -> RestResult<StakingEndpoints<'_>> {
        self.credentials()?;
        Ok(StakingEndpoints::new(self))
    }

    /// Get wallet balances
    pub async fn get_balances(&self) -> RestResult<Vec<Balance>> {
        self.wallet()?.get_balances().await
    }

    /// Get open orders, optionally for one market
    pub async fn get_open_orders(&self, pair: Option<&str>) -> RestResult<Vec<Order>> {
        self.orders()?.get_open_orders(pair).await
    }

    /// Place a new order
    pub async fn create_order(&self, order: &OrderRequest) -> RestResult<Order> {
        self.orders()?.create_order(order).await
    }

    /// Cancel an order by exchange ID
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<Value> {
        self.orders()?.cancel_order(order_id).await
    }
}

fn reqwest_transport(config: &ClientConfig) -> RestResult<ReqwestTransport> {
    Ok(ReqwestTransport::new(config.timeout())?)
}

impl std::fmt::Debug for FtxRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FtxRestClient")
            .field("public_url", &self.config.public_url)
            .field("private_url", &self.config.private_url)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Origin for public endpoints
    pub public_url: String,
    /// Origin for private endpoints
    pub private_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            public_url: PUBLIC_API_URL.to_string(),
            private_url: PRIVATE_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Point both scopes at one origin
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.public_url = url.clone();
        self.private_url = url;
        self
    }

    pub fn with_public_url(mut self, url: impl Into<String>) -> Self {
        self.public_url = url.into();
        self
    }

    pub fn with_private_url(mut self, url: impl Into<String>) -> Self {
        self.private_url = url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
