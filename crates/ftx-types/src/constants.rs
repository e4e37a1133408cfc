//! Exchange-wide constants
//!
//! These are defaults only. The REST client takes its URLs, timeout and user
//! agent from an injected configuration value.

/// Default origin for public endpoints
pub const PUBLIC_API_URL: &str = "https://ftx.com/api";

/// Default origin for private endpoints
pub const PRIVATE_API_URL: &str = "https://ftx.com/api";

/// Prefix prepended to the endpoint inside the signed payload
pub const SIGNED_PATH_PREFIX: &str = "/api";

/// Default User-Agent header
pub const DEFAULT_USER_AGENT: &str = "FTX-Trader/1.0";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Published request limit. Informational: nothing in these crates enforces it.
pub const RATE_LIMIT_PER_SECOND: u32 = 30;

/// First path segments that always require authentication
pub const PRIVATE_ENDPOINTS: [&str; 11] = [
    "positions",
    "wallet",
    "account",
    "spot_margin",
    "srm_stakes",
    "orders",
    "conditional_orders",
    "leverage",
    "subaccounts",
    "fills",
    "funding_payments",
];

/// Header names used by private requests
pub mod headers {
    pub const KEY: &str = "FTX-KEY";
    pub const SIGN: &str = "FTX-SIGN";
    pub const TS: &str = "FTX-TS";
    pub const SUBACCOUNT: &str = "FTX-SUBACCOUNT";
}
