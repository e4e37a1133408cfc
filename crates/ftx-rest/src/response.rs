//! Response envelope unwrapping
//!
//! Every endpoint answers with `{"success": true, "result": ...}` or
//! `{"success": false, "error": "..."}`.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::{RestError, RestResult};

/// Unwrap an envelope into its `result`, or its `error` as a rejection
///
/// Bodies with neither field are returned unchanged.
pub fn normalize_response(response: Value) -> RestResult<Value> {
    let mut map = match response {
        Value::Object(map) => map,
        other => return Ok(other),
    };

    if let Some(result) = map.remove("result") {
        return Ok(result);
    }

    if let Some(error) = map.get("error") {
        let message = match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        warn!(error = %message, "request rejected by exchange");
        return Err(RestError::RemoteRejected(message));
    }

    Ok(Value::Object(map))
}

/// Deserialize a normalized result into a typed model
pub fn decode<T: DeserializeOwned>(value: Value) -> RestResult<T> {
    serde_json::from_value(value).map_err(RestError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_is_unwrapped() {
        let value = normalize_response(json!({"success": true, "result": {"foo": 1}})).unwrap();
        assert_eq!(value, json!({"foo": 1}));
    }

    #[test]
    fn test_error_becomes_remote_rejection() {
        let err = normalize_response(json!({"success": false, "error": "Invalid parameter"}))
            .unwrap_err();
        assert!(matches!(err, RestError::RemoteRejected(ref m) if m == "Invalid parameter"));
    }

    #[test]
    fn test_result_wins_over_error() {
        let value = normalize_response(json!({"result": [], "error": "ignored"})).unwrap();
        assert_eq!(value, json!([]));
    }

    #[test]
    fn test_null_result_is_still_a_result() {
        let value = normalize_response(json!({"success": true, "result": null})).unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn test_non_envelope_passes_through() {
        let raw = json!({"success": true, "data": [1]});
        assert_eq!(normalize_response(raw.clone()).unwrap(), raw);
        assert_eq!(normalize_response(json!([1, 2])).unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_non_string_error_is_stringified() {
        let err = normalize_response(json!({"error": {"code": 7}})).unwrap_err();
        assert_eq!(err.remote_message(), Some(r#"{"code":7}"#));
    }

    #[test]
    fn test_decode_mismatch() {
        let result: RestResult<Vec<u32>> = decode(json!({"not": "a list"}));
        assert!(matches!(result, Err(RestError::Decode(_))));
    }
}
