//! Scope inference from endpoint paths
//!
//! Call sites rarely need to name a scope: an endpoint is private when its
//! first path segment is one of [`PRIVATE_ENDPOINTS`], public otherwise.
//! [`RequestSpec::with_scope`](crate::RequestSpec::with_scope) overrides this.

use ftx_types::constants::PRIVATE_ENDPOINTS;
use ftx_types::Scope;

/// Infer the scope of an endpoint such as `orders/history` or `/markets`
pub fn infer_scope(endpoint: &str) -> Scope {
    let first = endpoint
        .trim_start_matches('/')
        .split(['/', '?'])
        .next()
        .unwrap_or_default();

    if PRIVATE_ENDPOINTS.contains(&first) {
        Scope::Private
    } else {
        Scope::Public
    }
}
