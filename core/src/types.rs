//! Per-call options and the value a call resolves with.
//!
//! # Design
//! `Options` is the configuration bag every filter sees. The only option the
//! client itself understands is the request kind; everything else lives in
//! an open key/value map so custom filters can carry their own settings
//! without the client knowing about them.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;
use crate::http::HttpResponse;

/// Kind of payload a request carries. Controls content-type defaulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Json,
}

/// Configuration bag passed by reference through the whole pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub kind: Option<RequestKind>,
    values: BTreeMap<String, Value>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json() -> Self {
        Self {
            kind: Some(RequestKind::Json),
            values: BTreeMap::new(),
        }
    }

    pub fn is_json(&self) -> bool {
        self.kind == Some(RequestKind::Json)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }
}

/// Value a call resolves with.
///
/// The default JSON response filter turns JSON responses into `Json`; any
/// other successful response stays `Raw`. Exception filters recovering a
/// failure may produce either.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Json(Value),
    Raw(HttpResponse),
}

impl Reply {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Reply::Json(value) => Some(value),
            Reply::Raw(_) => None,
        }
    }

    pub fn as_response(&self) -> Option<&HttpResponse> {
        match self {
            Reply::Raw(response) => Some(response),
            Reply::Json(_) => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            Reply::Json(value) => Some(value),
            Reply::Raw(_) => None,
        }
    }

    /// Deserialize the reply into `T`.
    ///
    /// A raw reply is parsed from its body, so this also works for JSON
    /// payloads served without a JSON content type.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, ClientError> {
        match self {
            Reply::Json(value) => serde_json::from_value(value).map_err(ClientError::Deserialization),
            Reply::Raw(response) => {
                serde_json::from_slice(&response.body).map_err(ClientError::Deserialization)
            }
        }
    }
}

impl From<Value> for Reply {
    fn from(value: Value) -> Self {
        Reply::Json(value)
    }
}

impl From<HttpResponse> for Reply {
    fn from(response: HttpResponse) -> Self {
        Reply::Raw(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Headers;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        value: u32,
    }

    #[test]
    fn default_options_are_not_json() {
        let options = Options::default();
        assert!(!options.is_json());
        assert!(Options::json().is_json());
    }

    #[test]
    fn options_bag_holds_custom_values() {
        let options = Options::new().with("token", "abc").with("retries", 0);
        assert_eq!(options.get("token"), Some(&json!("abc")));
        assert_eq!(options.get("retries"), Some(&json!(0)));
        assert!(options.get("missing").is_none());
    }

    #[test]
    fn reply_deserializes_json_value() {
        let reply = Reply::from(json!({"value": 100}));
        assert_eq!(reply.deserialize::<Item>().unwrap(), Item { value: 100 });
    }

    #[test]
    fn reply_deserializes_raw_body() {
        let reply = Reply::from(HttpResponse {
            status: 200,
            headers: Headers::new(),
            body: br#"{"value":7}"#.to_vec(),
        });
        assert_eq!(reply.deserialize::<Item>().unwrap(), Item { value: 7 });
    }

    #[test]
    fn reply_deserialize_reports_bad_shape() {
        let err = Reply::from(json!({"other": true})).deserialize::<Item>().unwrap_err();
        assert!(matches!(err, ClientError::Deserialization(_)));
    }
}
