//! HMAC-SHA256 request signing
//!
//! FTX signature algorithm:
//! 1. nonce = current epoch milliseconds, as a decimal string
//! 2. payload = nonce + METHOD + path
//! 3. GET with parameters: payload += "?" + form-encoded query string
//!    otherwise, with parameters: payload += compact JSON body
//! 4. signature = hex(HMAC-SHA256(secret, payload))
//!
//! The exchange rebuilds the payload from the request line and body, so the
//! query string here must be byte-identical to the one in the URL. Both come
//! from [`Query::to_query_string`].

use ftx_types::{Method, Query};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::trace;

use crate::clock::Clock;
use crate::credentials::Credentials;
use crate::error::AuthResult;

type HmacSha256 = Hmac<Sha256>;

/// A signature together with the nonce it was computed over
///
/// The nonce must be sent unchanged in the `FTX-TS` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Lowercase hex HMAC-SHA256 digest
    pub signature: String,
    /// Millisecond epoch timestamp, decimal
    pub nonce: String,
}

/// Build the exact string that gets signed
///
/// `path` is the wire path including the `/api` prefix. `query` is only
/// consulted for GET; `body` for everything else.
pub fn signing_payload(
    nonce: &str,
    method: Method,
    path: &str,
    query: &Query,
    body: &Query,
) -> AuthResult<String> {
    let mut payload = format!("{}{}{}", nonce, method.as_str(), path);

    if method.uses_query_string() && !query.is_empty() {
        payload.push('?');
        payload.push_str(&query.to_query_string()?);
    } else if !body.is_empty() {
        payload.push_str(&body.to_json_body()?);
    }

    Ok(payload)
}

/// Hex-encoded HMAC-SHA256 of `payload` keyed with `secret`
pub fn sign_payload(secret: &str, payload: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Sign one request, drawing a fresh nonce from `clock`
pub fn sign(
    secret: &str,
    method: Method,
    path: &str,
    query: &Query,
    body: &Query,
    clock: &dyn Clock,
) -> AuthResult<Signature> {
    let nonce = clock.now_millis().to_string();
    let payload = signing_payload(&nonce, method, path, query, body)?;
    trace!(%method, path, nonce = %nonce, "signing request");

    Ok(Signature {
        signature: sign_payload(secret, &payload),
        nonce,
    })
}

/// Signs requests with one set of credentials and one clock
#[derive(Debug, Clone, Copy)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    clock: &'a dyn Clock,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer
    pub fn new(credentials: &'a Credentials, clock: &'a dyn Clock) -> Self {
        Self { credentials, clock }
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Get the configured subaccount
    pub fn subaccount(&self) -> Option<&str> {
        self.credentials.subaccount()
    }

    /// Sign a request. The nonce is taken here, immediately before hashing.
    pub fn sign(
        &self,
        method: Method,
        path: &str,
        query: &Query,
        body: &Query,
    ) -> AuthResult<Signature> {
        sign(
            self.credentials.secret(),
            method,
            path,
            query,
            body,
            self.clock,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use serde_json::json;

    const NONCE: u64 = 1_588_591_511_721;

    fn orders_query() -> Query {
        Query::new().with("market", "BTC/USD")
    }

    #[test]
    fn test_get_payload_appends_query_string() {
        let payload = signing_payload(
            "1588591511721",
            Method::Get,
            "/api/orders",
            &orders_query(),
            &Query::new(),
        )
        .unwrap();

        assert_eq!(payload, "1588591511721GET/api/orders?market=BTC%2FUSD");
    }

    #[test]
    fn test_get_payload_without_query() {
        let payload = signing_payload(
            "1588591511721",
            Method::Get,
            "/api/markets",
            &Query::new(),
            &Query::new(),
        )
        .unwrap();

        assert_eq!(payload, "1588591511721GET/api/markets");
    }

    #[test]
    fn test_post_payload_appends_compact_json() {
        let body = Query::new()
            .with("market", "BTC-PERP")
            .with("side", "buy")
            .with("price", 8500)
            .with("size", 1);

        let payload =
            signing_payload("1588591856950", Method::Post, "/api/orders", &Query::new(), &body)
                .unwrap();

        assert_eq!(
            payload,
            r#"1588591856950POST/api/orders{"market":"BTC-PERP","side":"buy","price":8500,"size":1}"#
        );
    }

    #[test]
    fn test_known_signature_vector() {
        // Example from the FTX REST authentication docs
        let signature = sign_payload(
            "T4lPid48QtjNxjLUFOcUZghD7CUJ7sTVsfuvQZF2",
            "1588591511721GET/api/markets",
        );
        assert_eq!(
            signature,
            "dbc62ec300b2624c580611858d94f2332ac636bb86eccfa1167a7777c496ee6f"
        );
    }

    #[test]
    fn test_signing_is_deterministic_for_fixed_clock() {
        let clock = FixedClock::new(NONCE);
        let a = sign("secret", Method::Get, "/api/orders", &orders_query(), &Query::new(), &clock)
            .unwrap();
        let b = sign("secret", Method::Get, "/api/orders", &orders_query(), &Query::new(), &clock)
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(a.nonce, NONCE.to_string());
        assert_eq!(a.signature.len(), 64);
        assert!(a.signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_each_input_changes_signature() {
        let clock = FixedClock::new(NONCE);
        let empty = Query::new();
        let base = sign("secret", Method::Get, "/api/orders", &orders_query(), &empty, &clock)
            .unwrap()
            .signature;

        let other_secret =
            sign("secret2", Method::Get, "/api/orders", &orders_query(), &empty, &clock).unwrap();
        let other_path =
            sign("secret", Method::Get, "/api/fills", &orders_query(), &empty, &clock).unwrap();
        let other_query = sign(
            "secret",
            Method::Get,
            "/api/orders",
            &Query::new().with("market", "ETH/USD"),
            &empty,
            &clock,
        )
        .unwrap();

        for changed in [other_secret, other_path, other_query] {
            assert_ne!(changed.signature, base);
        }

        clock.advance(1);
        let later = sign("secret", Method::Get, "/api/orders", &orders_query(), &empty, &clock)
            .unwrap();
        assert_ne!(later.signature, base);
    }

    #[test]
    fn test_method_alone_changes_signature() {
        let clock = FixedClock::new(NONCE);
        let empty = Query::new();
        let get = sign("secret", Method::Get, "/api/orders", &empty, &empty, &clock).unwrap();
        let delete = sign("secret", Method::Delete, "/api/orders", &empty, &empty, &clock).unwrap();

        assert_ne!(get.signature, delete.signature);
    }

    #[test]
    fn test_body_alone_changes_signature() {
        let clock = FixedClock::new(NONCE);
        let empty = Query::new();
        let stake = |size: &str| {
            let body = Query::new().with("coin", "SRM").with("size", size);
            sign("secret", Method::Post, "/api/srm_stakes/stakes", &empty, &body, &clock).unwrap()
        };

        let small = stake("1");
        let large = stake("2");
        assert_eq!(small.nonce, large.nonce);
        assert_ne!(small.signature, large.signature);
    }

    #[test]
    fn test_list_query_signed_with_bracket_keys() {
        let query = Query::new().with("markets", json!(["A", "B"]));
        let payload =
            signing_payload("1", Method::Get, "/api/x", &query, &Query::new()).unwrap();
        assert_eq!(payload, "1GET/api/x?markets%5B%5D=A&markets%5B%5D=B");
    }

    #[test]
    fn test_request_signer_uses_credentials() {
        let creds = Credentials::new("key", "secret").with_subaccount("sub");
        let clock = FixedClock::new(NONCE);
        let signer = RequestSigner::new(&creds, &clock);

        let via_signer = signer
            .sign(Method::Get, "/api/orders", &orders_query(), &Query::new())
            .unwrap();
        let direct =
            sign("secret", Method::Get, "/api/orders", &orders_query(), &Query::new(), &clock)
                .unwrap();

        assert_eq!(via_signer, direct);
        assert_eq!(signer.api_key(), "key");
        assert_eq!(signer.subaccount(), Some("sub"));
    }
}
