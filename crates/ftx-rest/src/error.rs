//! Error types for REST API operations

use ftx_auth::AuthError;
use ftx_types::{ArgumentError, EncodeError};

use crate::transport::TransportError;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// A parameter violated a documented constraint; nothing was sent
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),

    /// The exchange answered with `{"success": false, "error": ...}`
    #[error("Request rejected by exchange: {0}")]
    RemoteRejected(String),

    /// The HTTP call failed or its body was not JSON
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    /// Missing API credentials for private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Signing the request failed
    #[error("Signing failed: {0}")]
    Auth(#[from] AuthError),

    /// The query or body could not be encoded
    #[error("Encoding failed: {0}")]
    Encode(#[from] EncodeError),

    /// The `result` payload did not match the expected model
    #[error("Unexpected response shape: {0}")]
    Decode(#[source] serde_json::Error),
}

impl RestError {
    /// The exchange's own error message, for remote rejections
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::RemoteRejected(message) => Some(message),
            _ => None,
        }
    }

    /// True if the request never left the client
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_) | Self::AuthRequired | Self::Auth(_) | Self::Encode(_)
        )
    }

    /// True if the HTTP exchange itself failed
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_remote_message() {
        let err = RestError::RemoteRejected("Invalid parameter".to_string());
        assert_eq!(err.remote_message(), Some("Invalid parameter"));
        assert!(!err.is_local());
        assert_eq!(err.to_string(), "Request rejected by exchange: Invalid parameter");
    }

    #[test]
    fn test_error_classification() {
        let invalid: RestError = ArgumentError::new("depth", "too deep").into();
        assert!(invalid.is_local());
        assert!(invalid.remote_message().is_none());

        let timeout: RestError = TransportError::Timeout(Duration::from_secs(30)).into();
        assert!(timeout.is_transport_failure());
        assert!(!timeout.is_local());

        assert!(RestError::AuthRequired.is_local());
    }
}
