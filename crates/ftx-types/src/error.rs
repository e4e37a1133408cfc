//! Error types for parameter validation

use thiserror::Error;

/// A caller-supplied parameter violates a documented constraint
///
/// Raised while building a request, before anything reaches the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid argument `{name}`: {reason}")]
pub struct ArgumentError {
    /// Parameter name as used on the wire
    pub name: &'static str,
    /// What was wrong with it
    pub reason: String,
}

impl ArgumentError {
    /// Create a new argument error
    pub fn new(name: &'static str, reason: impl Into<String>) -> Self {
        Self {
            name,
            reason: reason.into(),
        }
    }
}

/// Errors produced while encoding a [`Query`](crate::Query)
#[derive(Error, Debug)]
pub enum EncodeError {
    /// Form encoding of the query string failed
    #[error("query string encoding failed: {0}")]
    Form(#[from] serde_urlencoded::ser::Error),

    /// JSON encoding of the request body failed
    #[error("JSON body encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_error_display() {
        let err = ArgumentError::new("depth", "must be between 20 and 100");
        assert_eq!(
            err.to_string(),
            "invalid argument `depth`: must be between 20 and 100"
        );
    }
}
