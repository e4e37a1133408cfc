//! Error types for authentication operations

use ftx_types::EncodeError;

/// Errors that can occur while loading credentials or signing
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// The query or body could not be encoded into the signing payload
    #[error("Failed to encode signing payload: {0}")]
    Encode(#[from] EncodeError),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthError::EnvVarNotSet("FTX_API_KEY".to_string());
        assert!(err.to_string().contains("FTX_API_KEY"));
    }
}
