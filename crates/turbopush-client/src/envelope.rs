//! Business-response envelope decoding.
//!
//! Every JSON response from the service has the shape
//! `{"code": <int>, "data": ..., "msg": <string>}`. A zero code is success;
//! anything else is an application-level failure described by `msg`.

use crate::error::{ClientError, ClientResult};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The `{code, data, msg}` wrapper around every business response.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    /// Application-level status; 0 means success
    pub code: i64,
    /// Human-readable failure description (usually absent on success)
    #[serde(default)]
    pub msg: Option<String>,
    /// The actual payload
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    /// Decode an envelope out of a raw response body.
    ///
    /// Non-object bodies (the service occasionally answers with plain text)
    /// are rejected here; callers that tolerate raw text read the body
    /// before envelope decoding.
    pub fn decode(body: Value) -> ClientResult<Self> {
        if !body.is_object() {
            return Err(ClientError::InvalidResponse {
                message: format!("expected a response envelope, got: {body}"),
            });
        }
        Ok(serde_json::from_value(body)?)
    }

    /// Unwrap the payload, turning a nonzero code into an `Api` error.
    pub fn into_data<T: DeserializeOwned>(self) -> ClientResult<T> {
        if self.code != 0 {
            return Err(ClientError::Api {
                code: self.code,
                msg: self.msg.unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        Ok(serde_json::from_value(self.data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let envelope = Envelope::decode(json!({"code": 0, "data": {"port": 8910}})).unwrap();
        let data: Value = envelope.into_data().unwrap();
        assert_eq!(data["port"], 8910);
    }

    #[test]
    fn test_failure_envelope() {
        let envelope =
            Envelope::decode(json!({"code": 401, "msg": "not logged in", "data": null})).unwrap();
        let result: ClientResult<Value> = envelope.into_data();
        assert!(matches!(
            result,
            Err(ClientError::Api { code: 401, ref msg }) if msg == "not logged in"
        ));
    }

    #[test]
    fn test_failure_without_msg() {
        let envelope = Envelope::decode(json!({"code": 7})).unwrap();
        let result: ClientResult<Value> = envelope.into_data();
        assert!(matches!(result, Err(ClientError::Api { code: 7, .. })));
    }

    #[test]
    fn test_non_object_body_rejected() {
        let result = Envelope::decode(json!("service rebooting"));
        assert!(matches!(result, Err(ClientError::InvalidResponse { .. })));
    }

    #[test]
    fn test_missing_data_defaults_to_null() {
        let envelope = Envelope::decode(json!({"code": 0})).unwrap();
        let data: Value = envelope.into_data().unwrap();
        assert!(data.is_null());
    }
}
