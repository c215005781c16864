//! Verify request building and response parsing against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use std::time::Duration;

use fleet_core::{parse_response, ApiClient, HttpMethod, HttpResponse, Payload, QueryValue, RequestConfig};
use serde_json::Value;

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|h| {
                    let arr = h.as_array().unwrap();
                    (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
                })
                .collect()
        })
        .unwrap_or_default()
}

fn query_value(value: &Value) -> Option<QueryValue> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(QueryValue::Bool(*b)),
        Value::String(s) => Some(QueryValue::Str(s.clone())),
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => QueryValue::Int(i),
            None => QueryValue::Float(n.as_f64().unwrap()),
        }),
        other => panic!("unsupported query value: {other}"),
    }
}

fn request_config(value: &Value) -> RequestConfig {
    let mut config = RequestConfig::new();
    config.headers = pairs(&value["headers"]);
    if let Some(query) = value["query"].as_array() {
        config.query = query
            .iter()
            .map(|entry| {
                let arr = entry.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), query_value(&arr[1]))
            })
            .collect();
    }
    if let Some(ms) = value["timeout_ms"].as_u64() {
        config.timeout = Some(Duration::from_millis(ms));
    }
    config
}

fn expected_payload(value: &Value) -> Payload {
    if let Some(json) = value.get("json") {
        Payload::Json(json.clone())
    } else {
        Payload::Text(value["text"].as_str().unwrap().to_string())
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let client = ApiClient::with_headers(case["base_url"].as_str().unwrap(), pairs(&case["default_headers"])).unwrap();
        let method = parse_method(case["method"].as_str().unwrap());
        let body = case.get("body");
        let config = request_config(&case["config"]);
        let expected = &case["expected"];

        let req = client
            .build_request(method, case["path"].as_str().unwrap(), body, &config)
            .unwrap();

        assert_eq!(req.method, method, "{name}: method");
        assert_eq!(req.url, expected["url"].as_str().unwrap(), "{name}: url");
        assert_eq!(req.headers, pairs(&expected["headers"]), "{name}: headers");
        assert_eq!(
            req.timeout,
            Duration::from_millis(expected["timeout_ms"].as_u64().unwrap()),
            "{name}: timeout"
        );

        match &expected["body"] {
            Value::Null => assert!(req.body.is_none(), "{name}: body should be None"),
            expected_body => {
                let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                assert_eq!(&sent, expected_body, "{name}: body");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            status_text: sim["status_text"].as_str().unwrap().to_string(),
            headers: pairs(&sim["headers"]),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let result = parse_response(response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(
                err.status(),
                Some(expected_error["status"].as_u64().unwrap() as u16),
                "{name}: status"
            );
            assert_eq!(err.to_string(), expected_error["message"].as_str().unwrap(), "{name}: message");
            assert_eq!(err.data(), Some(&expected_payload(&expected_error["data"])), "{name}: data");
        } else {
            let resp = result.unwrap();
            assert_eq!(resp.status, sim["status"].as_u64().unwrap() as u16, "{name}: status");
            assert_eq!(resp.data, expected_payload(&case["expected_result"]), "{name}: data");
        }
    }
}
