//! Client configuration as it appears in an application's config file.

use serde::Deserialize;

/// Settings needed to build an [`crate::ApiClient`].
///
/// ```
/// let config: apiclient_core::ClientConfig =
///     serde_json::from_str(r#"{"base_url": "http://localhost:3000/api"}"#).unwrap();
/// assert_eq!(config.base_url, "http://localhost:3000/api");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub base_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_fields() {
        let result: Result<ClientConfig, _> =
            serde_json::from_str(r#"{"base_url":"http://te.st","timeout":5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn requires_base_url() {
        let result: Result<ClientConfig, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }
}
