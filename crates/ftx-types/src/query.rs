//! Ordered request parameters
//!
//! A [`Query`] is the single representation of request parameters. GET
//! requests encode it into the query string, POST and DELETE send it as the
//! JSON body, and the signer reuses the exact same encoders so the signed
//! payload always matches what goes on the wire.
//!
//! Keys keep insertion order (`serde_json` is built with `preserve_order`).
//! Null values are never stored: absence is the wire form of "unset".

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::EncodeError;

/// Ordered mapping of parameter name to scalar or list value
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Query(Map<String, Value>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a query from optional values, dropping every unset entry
    ///
    /// ```
    /// use ftx_types::Query;
    ///
    /// let query = Query::from_options([
    ///     ("limit", Some(100.into())),
    ///     ("start_time", None),
    /// ]);
    /// assert!(query.contains_key("limit"));
    /// assert!(!query.contains_key("start_time"));
    /// ```
    pub fn from_options<K, I>(options: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Option<Value>)>,
    {
        let mut query = Self::new();
        for (key, value) in options {
            if let Some(value) = value {
                query.insert(key, value);
            }
        }
        query
    }

    /// Insert a value. Nulls are ignored.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let value = value.into();
        if !value.is_null() {
            self.0.insert(key.into(), value);
        }
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert only when the value is set
    pub fn with_opt<V: Into<Value>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Drop every key not in `allowed`, preserving the order of the rest
    pub fn retain_keys(&mut self, allowed: &[&str]) {
        self.0.retain(|key, _| allowed.contains(&key.as_str()));
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Form-encode as `key=value&key=value`
    ///
    /// List values expand into one `key[]=value` pair per element, with the
    /// brackets percent-encoded on the wire (`key%5B%5D=value`). The signed
    /// payload uses this same string. Booleans render as `true`/`false`.
    pub fn to_query_string(&self) -> Result<String, EncodeError> {
        let mut pairs: Vec<(String, String)> = Vec::with_capacity(self.0.len());

        for (key, value) in &self.0 {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    let list_key = format!("{key}[]");
                    for item in items.iter().filter(|v| !v.is_null()) {
                        pairs.push((list_key.clone(), scalar_to_string(item)));
                    }
                }
                other => pairs.push((key.clone(), scalar_to_string(other))),
            }
        }

        Ok(serde_urlencoded::to_string(&pairs)?)
    }

    /// Compact JSON in insertion order
    pub fn to_json_body(&self) -> Result<String, EncodeError> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Query {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        let mut query = Self::new();
        for (key, value) in iter {
            query.insert(key, value);
        }
        query
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Nested structures have no form encoding; send them as JSON text
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unset_options_are_dropped() {
        let query = Query::from_options([
            ("limit", None),
            ("start_time", Some(json!(1_600_000_000))),
            ("end_time", None),
        ]);

        assert_eq!(query.len(), 1);
        assert!(!query.contains_key("limit"));
        assert!(!query.contains_key("end_time"));
    }

    #[test]
    fn test_null_values_never_stored() {
        let query = Query::new().with("a", Value::Null).with_opt::<u32>("b", None);
        assert!(query.is_empty());
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let query = Query::new()
            .with("market", "BTC-PERP")
            .with("side", "buy")
            .with("price", 10000.5)
            .with("reduceOnly", false);

        assert_eq!(
            query.to_json_body().unwrap(),
            r#"{"market":"BTC-PERP","side":"buy","price":10000.5,"reduceOnly":false}"#
        );
        assert_eq!(
            query.keys().collect::<Vec<_>>(),
            vec!["market", "side", "price", "reduceOnly"]
        );
    }

    #[test]
    fn test_query_string_escapes_values() {
        let query = Query::new().with("market", "BTC/USD").with("depth", 20);
        assert_eq!(query.to_query_string().unwrap(), "market=BTC%2FUSD&depth=20");
    }

    #[test]
    fn test_list_values_use_bracket_keys() {
        let query = Query::new().with("markets", json!(["BTC-PERP", "ETH-PERP"]));
        assert_eq!(
            query.to_query_string().unwrap(),
            "markets%5B%5D=BTC-PERP&markets%5B%5D=ETH-PERP"
        );
    }

    #[test]
    fn test_booleans_render_lowercase() {
        let query = Query::new().with("showAvgPrice", false);
        assert_eq!(query.to_query_string().unwrap(), "showAvgPrice=false");
    }

    #[test]
    fn test_retain_keys() {
        let mut query = Query::new().with("a", 1).with("b", 2).with("c", 3);
        query.retain_keys(&["c", "a"]);
        assert_eq!(query.keys().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn test_empty_query_encodes_empty() {
        let query = Query::new();
        assert_eq!(query.to_query_string().unwrap(), "");
        assert_eq!(query.to_json_body().unwrap(), "{}");
    }
}
