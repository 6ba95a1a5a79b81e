//! Verify verb calls against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector describes the call, the request the transport must receive,
//! a simulated response and the expected outcome. Bodies are compared as
//! parsed JSON (not raw strings) to avoid false negatives from field order.

mod common;

use std::sync::Arc;

use apiclient_core::{ApiClient, ClientError, HttpMethod, Options, Reply};
use common::{response, ScriptedTransport};
use serde_json::Value;

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

#[tokio::test]
async fn verb_test_vectors() {
    let raw = include_str!("../../test-vectors/verbs.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let sim = &case["simulated_response"];
        let simulated = response(
            sim["status"].as_u64().unwrap() as u16,
            sim["content_type"].as_str().unwrap(),
            sim["body"].as_str().unwrap(),
        );
        let transport = Arc::new(ScriptedTransport::responding(simulated.clone()));
        let client = ApiClient::with_transport(case["base_url"].as_str().unwrap(), transport.clone()).unwrap();

        // Run the call
        let path = case["path"].as_str().unwrap();
        let data = case.get("data").filter(|data| !data.is_null());
        let result = client
            .request(parse_method(case["method"].as_str().unwrap()), path, data, Options::new())
            .await;

        // Verify the request the transport saw
        let expected_req = &case["expected_request"];
        let sent = transport.last_request();
        assert_eq!(sent.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(sent.url, expected_req["url"].as_str().unwrap(), "{name}: url");
        for header in expected_req["headers"].as_array().unwrap() {
            let pair = header.as_array().unwrap();
            let (key, value) = (pair[0].as_str().unwrap(), pair[1].as_str().unwrap());
            assert_eq!(sent.headers.get(key), Some(value), "{name}: header {key}");
        }
        match sent.body.as_deref() {
            Some(body) => {
                let body: Value = serde_json::from_str(body).unwrap();
                assert_eq!(body, expected_req["body"], "{name}: body");
            }
            None => assert!(expected_req["body"].is_null(), "{name}: body should be None"),
        }

        // Verify the outcome
        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            if let Some(status) = expected_error.get("status") {
                match err {
                    ClientError::Status(original) => {
                        assert_eq!(u64::from(original.status), status.as_u64().unwrap(), "{name}: status");
                        assert_eq!(original, simulated, "{name}: original response");
                    }
                    other => panic!("{name}: expected Status, got {other:?}"),
                }
            } else if expected_error.get("deserialization").is_some() {
                assert!(matches!(err, ClientError::Deserialization(_)), "{name}: expected Deserialization");
            } else {
                panic!("{name}: unknown expected_error: {expected_error}");
            }
        } else {
            let reply = result.unwrap();
            let expected = &case["expected_result"];
            if let Some(json) = expected.get("json") {
                assert_eq!(reply, Reply::Json(json.clone()), "{name}: parsed result");
            } else {
                let raw = reply.as_response().unwrap_or_else(|| panic!("{name}: expected raw reply"));
                assert_eq!(raw.text().unwrap(), expected["raw"].as_str().unwrap(), "{name}: raw body");
                assert_eq!(raw, &simulated, "{name}: raw response");
            }
        }
    }
}
