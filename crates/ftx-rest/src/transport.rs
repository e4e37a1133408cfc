//! HTTP transport abstraction
//!
//! The request pipeline builds a complete [`HttpRequest`] (method, URL,
//! headers, pre-serialized JSON body) and hands it to an [`HttpTransport`],
//! which performs the call and returns the decoded JSON body. This keeps
//! sockets, TLS and connection reuse out of the pipeline and lets tests
//! inject a mock.
//!
//! # Example
//!
//! ```no_run
//! use ftx_rest::transport::{HttpRequest, HttpTransport, ReqwestTransport};
//! use ftx_types::Method;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = ReqwestTransport::new(Duration::from_secs(30))?;
//! let request = HttpRequest::new(Method::Get, "https://ftx.com/api/markets");
//! let json = transport.execute(request).await?;
//! println!("{}", json["success"]);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use ftx_types::Method;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Transport layer errors
#[derive(Error, Debug)]
pub enum TransportError {
    /// The HTTP client reported a failure (connect, TLS, protocol)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection failed (used by non-reqwest transports)
    #[error("connection failed: {0}")]
    Connection(String),

    /// The call exceeded the configured timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The response body was not valid JSON
    #[error("response with status {status} is not JSON: {message}")]
    Decode { status: u16, message: String },
}

/// A fully assembled HTTP request
///
/// `body` is the exact JSON text that was signed, so transports must send it
/// byte for byte rather than re-serializing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Trait for HTTP transport abstraction
///
/// Implementations perform one request/response exchange and decode the
/// body as JSON. Non-2xx responses that still carry a JSON body must be
/// returned as `Ok`, since the exchange reports rejections inside the
/// envelope.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<Value, TransportError>;
}

/// Real transport using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a transport whose every call is bounded by `timeout`
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }

    /// Wrap an existing reqwest client
    ///
    /// `timeout` is only used for error reporting; the client's own
    /// settings govern the actual deadline.
    pub fn from_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Deadline applied to each call
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Http(err)
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: HttpRequest) -> Result<Value, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        debug!(status = status.as_u16(), len = bytes.len(), "response received");

        serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode {
            status: status.as_u16(),
            message: e.to_string(),
        })
    }
}

/// Mock transport for testing
///
/// Replays queued responses in order and records every request it sees.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: parking_lot::Mutex<std::collections::VecDeque<Result<Value, TransportError>>>,
    requests: parking_lot::Mutex<Vec<HttpRequest>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a decoded JSON response to be returned on the next call
    pub fn push_response(&self, response: Value) {
        self.responses.lock().push_back(Ok(response));
    }

    /// Queue a successful envelope around `result`
    pub fn push_result(&self, result: Value) {
        self.push_response(serde_json::json!({ "success": true, "result": result }));
    }

    /// Queue a rejection envelope
    pub fn push_rejection(&self, message: &str) {
        self.push_response(serde_json::json!({ "success": false, "error": message }));
    }

    /// Simulate a transport error
    pub fn push_error(&self, error: TransportError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Requests captured so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Most recent captured request
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<Value, TransportError> {
        self.requests.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Connection("no mock response queued".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_transport_replays_and_records() {
        let transport = MockTransport::new();
        transport.push_result(json!([1, 2, 3]));

        let mut request = HttpRequest::new(Method::Get, "https://mock.test/api/markets");
        request.headers.push(("Accept", "application/json".into()));

        let response = transport.execute(request).await.unwrap();
        assert_eq!(response["result"], json!([1, 2, 3]));
        assert_eq!(transport.request_count(), 1);
        assert_eq!(
            transport.last_request().unwrap().header("accept"),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_mock_transport_empty_queue_fails() {
        let transport = MockTransport::new();
        let result = transport
            .execute(HttpRequest::new(Method::Get, "https://mock.test"))
            .await;
        assert!(matches!(result, Err(TransportError::Connection(_))));
    }

    #[test]
    fn test_reqwest_transport_builds() {
        assert!(ReqwestTransport::new(Duration::from_secs(5)).is_ok());
    }
}
