//! Credentials and request signing for the FTX REST API
//!
//! Private endpoints are authenticated with an HMAC-SHA256 signature over
//! `nonce + METHOD + path + (query string | JSON body)`, sent hex-encoded in
//! the `FTX-SIGN` header next to the nonce in `FTX-TS`.
//!
//! # Example
//!
//! ```
//! use ftx_auth::{Credentials, FixedClock, RequestSigner};
//! use ftx_types::{Method, Query};
//!
//! let creds = Credentials::new("key", "secret");
//! let clock = FixedClock::new(1_600_000_000_000);
//! let signer = RequestSigner::new(&creds, &clock);
//!
//! let query = Query::new().with("market", "BTC/USD");
//! let signed = signer.sign(Method::Get, "/api/orders", &query, &Query::new())?;
//! assert_eq!(signed.nonce, "1600000000000");
//! assert_eq!(signed.signature.len(), 64);
//! # Ok::<(), ftx_auth::AuthError>(())
//! ```

mod clock;
mod credentials;
mod error;
mod signer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::Credentials;
pub use error::{AuthError, AuthResult};
pub use signer::{sign, sign_payload, signing_payload, RequestSigner, Signature};
