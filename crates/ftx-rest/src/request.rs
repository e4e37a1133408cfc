//! Request construction: URL, headers and body
//!
//! Everything here is deterministic given a clock, so a request can be
//! built and inspected without touching the network.

use ftx_auth::RequestSigner;
use ftx_types::constants::{headers, SIGNED_PATH_PREFIX};
use ftx_types::{Method, Query, Scope};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{RestError, RestResult};
use crate::scope::infer_scope;

/// Everything but RFC 3986 unreserved characters, so `/` inside a value
/// stays within its path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Header-safe escaping for subaccount names; `/` is left as is
const SUBACCOUNT: &AsciiSet = &PATH_SEGMENT.remove(b'/');

/// Percent-encode a value for use as one path segment
pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Percent-encode a subaccount name for the `FTX-SUBACCOUNT` header
pub fn encode_subaccount(name: &str) -> String {
    utf8_percent_encode(name, SUBACCOUNT).to_string()
}

/// One logical API call
///
/// `endpoint` is the already-encoded path below the API root, without a
/// leading slash or the `/api` prefix (e.g. `markets/BTC%2FUSD/orderbook`).
/// For GET, `query` becomes the query string; otherwise it is the JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub scope: Option<Scope>,
    pub method: Method,
    pub endpoint: String,
    pub query: Query,
}

impl RequestSpec {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            scope: None,
            method,
            endpoint: endpoint.trim_start_matches('/').to_string(),
            query: Query::new(),
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Post, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Delete, endpoint)
    }

    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Override the inferred scope
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Explicit scope if set, otherwise inferred from the endpoint
    pub fn resolved_scope(&self) -> Scope {
        self.scope.unwrap_or_else(|| infer_scope(&self.endpoint))
    }

    /// Path as it appears in the signed payload: `/api/<endpoint>`
    pub fn signed_path(&self) -> String {
        format!("{}/{}", SIGNED_PATH_PREFIX, self.endpoint)
    }

    /// Query string parameters (GET only)
    fn url_query(&self) -> Option<&Query> {
        (self.method.uses_query_string() && !self.query.is_empty()).then_some(&self.query)
    }

    /// JSON body parameters (POST/DELETE only)
    fn body_query(&self) -> Option<&Query> {
        (!self.method.uses_query_string() && !self.query.is_empty()).then_some(&self.query)
    }

    /// Full URL below `base`, with the query string for GET
    pub fn url(&self, base: &str) -> RestResult<String> {
        let mut url = format!("{}/{}", base.trim_end_matches('/'), self.endpoint);
        if let Some(query) = self.url_query() {
            url.push('?');
            url.push_str(&query.to_query_string()?);
        }
        Ok(url)
    }

    /// JSON body for POST/DELETE with parameters
    ///
    /// Empty parameter maps produce no body, matching a signature that has
    /// nothing appended.
    pub fn body(&self) -> RestResult<Option<String>> {
        Ok(match self.body_query() {
            Some(query) => Some(query.to_json_body()?),
            None => None,
        })
    }
}

/// Headers derived from a request and the client credentials
///
/// The authentication fields are present only for private requests;
/// `subaccount` only when one is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub accept: String,
    pub user_agent: String,
    pub content_type: Option<String>,
    pub api_key: Option<String>,
    pub signature: Option<String>,
    pub timestamp: Option<String>,
    pub subaccount: Option<String>,
}

impl SignedHeaders {
    /// Unauthenticated headers
    pub fn public(user_agent: impl Into<String>) -> Self {
        Self {
            accept: "application/json".to_string(),
            user_agent: user_agent.into(),
            content_type: None,
            api_key: None,
            signature: None,
            timestamp: None,
            subaccount: None,
        }
    }

    /// Build the headers for `spec`, signing when its scope is private
    ///
    /// Private requests without a signer fail with
    /// [`RestError::AuthRequired`].
    pub fn build(
        spec: &RequestSpec,
        user_agent: &str,
        signer: Option<&RequestSigner<'_>>,
    ) -> RestResult<Self> {
        let mut headers = Self::public(user_agent);
        if !spec.resolved_scope().is_private() {
            return Ok(headers);
        }

        let signer = signer.ok_or(RestError::AuthRequired)?;
        let empty = Query::new();
        let (query, body) = if spec.method.uses_query_string() {
            (&spec.query, &empty)
        } else {
            (&empty, &spec.query)
        };

        let signed = signer.sign(spec.method, &spec.signed_path(), query, body)?;

        headers.content_type = Some("application/json".to_string());
        headers.api_key = Some(signer.api_key().to_string());
        headers.signature = Some(signed.signature);
        headers.timestamp = Some(signed.nonce);
        headers.subaccount = signer.subaccount().map(encode_subaccount);

        Ok(headers)
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Flatten into (name, value) pairs in a stable order
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("Accept", self.accept.clone()),
            ("User-Agent", self.user_agent.clone()),
        ];

        let optional = [
            ("Content-Type", &self.content_type),
            (headers::KEY, &self.api_key),
            (headers::SIGN, &self.signature),
            (headers::TS, &self.timestamp),
            (headers::SUBACCOUNT, &self.subaccount),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                pairs.push((name, value.clone()));
            }
        }

        pairs
    }
}
