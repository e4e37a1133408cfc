//! Authentication credentials for the FTX API
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use secrecy::{ExposeSecret, SecretString};

use crate::error::{AuthError, AuthResult};

/// API credentials for authenticated requests
///
/// Immutable once built; a client shares one instance across all its calls.
pub struct Credentials {
    /// API key (public)
    api_key: String,
    /// API secret, used as the HMAC key
    api_secret: SecretString,
    /// Subaccount to act on, `None` for the main account
    subaccount: Option<String>,
}

impl Credentials {
    /// Create new credentials for the main account
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
            subaccount: None,
        }
    }

    /// Act on a subaccount instead of the main account
    pub fn with_subaccount(mut self, subaccount: impl Into<String>) -> Self {
        self.subaccount = Some(subaccount.into());
        self
    }

    /// Create credentials from environment variables
    ///
    /// Reads `FTX_API_KEY` and `FTX_API_SECRET`, plus `FTX_SUBACCOUNT` when
    /// it is set and non-empty.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var("FTX_API_KEY")
            .map_err(|_| AuthError::EnvVarNotSet("FTX_API_KEY".to_string()))?;
        let api_secret = std::env::var("FTX_API_SECRET")
            .map_err(|_| AuthError::EnvVarNotSet("FTX_API_SECRET".to_string()))?;

        let creds = Self::new(api_key, api_secret);
        match std::env::var("FTX_SUBACCOUNT") {
            Ok(name) if !name.is_empty() => Ok(creds.with_subaccount(name)),
            _ => Ok(creds),
        }
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Get the configured subaccount, if any
    pub fn subaccount(&self) -> Option<&str> {
        self.subaccount.as_deref()
    }

    pub(crate) fn secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates new SecretString with same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretString::from(self.api_secret.expose_secret().to_owned()),
            subaccount: self.subaccount.clone(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = self
            .api_key
            .char_indices()
            .nth(8)
            .map_or(self.api_key.as_str(), |(i, _)| &self.api_key[..i]);

        f.debug_struct("Credentials")
            .field("api_key", &format!("{shown}..."))
            .field("api_secret", &"[REDACTED]")
            .field("subaccount", &self.subaccount)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("test_api_key_long", "very_secret_value");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("very_secret_value"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("test_api..."));
    }

    #[test]
    fn test_subaccount_is_optional() {
        let creds = Credentials::new("k", "s");
        assert_eq!(creds.subaccount(), None);

        let sub = creds.with_subaccount("my sub");
        assert_eq!(sub.subaccount(), Some("my sub"));
    }

    #[test]
    fn test_clone_keeps_secret() {
        let creds = Credentials::new("k", "s").with_subaccount("a");
        let cloned = creds.clone();
        assert_eq!(cloned.secret(), "s");
        assert_eq!(cloned.api_key(), "k");
        assert_eq!(cloned.subaccount(), Some("a"));
    }
}
