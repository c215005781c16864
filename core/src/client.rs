//! The fleet API client.
//!
//! # Design
//! `ApiClient` holds only immutable state: the normalized base URL, the
//! default headers, the default timeout and a pooled `reqwest::Client`.
//! Every call goes through `request`, which is split into three steps:
//! `build_request` (pure), `transport::execute` (network, deadline) and
//! `parse_response` (pure). Build it once at startup and share it by
//! reference or clone; clones share the connection pool.

use std::time::Duration;

use serde::Serialize;

use crate::api::{Dashboard, Execution, Market, News, Portfolio};
use crate::config::{build_query_string, ClientConfig, RequestConfig};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::response::{parse_response, ApiResponse};
use crate::transport;

/// Header every client sends unless a default or per-call header replaces it.
pub const JSON_CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    default_headers: Vec<(String, String)>,
    default_timeout: Duration,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::from_config(ClientConfig::new(base_url))
    }

    pub fn with_headers(base_url: &str, headers: Vec<(String, String)>) -> Result<Self, ApiError> {
        Self::from_config(ClientConfig {
            default_headers: headers,
            ..ClientConfig::new(base_url)
        })
    }

    /// Client for `FLEET_API_ORIGIN`/`FLEET_API_TIMEOUT_MS`, falling back to
    /// `http://localhost:8080/api`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_config(ClientConfig::from_env())
    }

    /// Fails with `ApiError::Transport` when the HTTP stack (TLS backend,
    /// resolver) cannot be initialized.
    pub fn from_config(config: ClientConfig) -> Result<Self, ApiError> {
        let base_headers = vec![(JSON_CONTENT_TYPE.0.to_string(), JSON_CONTENT_TYPE.1.to_string())];
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_headers: merge_headers(&base_headers, &config.default_headers),
            default_timeout: config.default_timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_headers(&self) -> &[(String, String)] {
        &self.default_headers
    }

    // ── Verbs ────────────────────────────────────────────────────────────

    pub async fn get(&self, path: &str, config: RequestConfig) -> Result<ApiResponse, ApiError> {
        self.request(HttpMethod::Get, path, None::<&()>, config).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        config: RequestConfig,
    ) -> Result<ApiResponse, ApiError> {
        self.request(HttpMethod::Post, path, Some(body), config).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        config: RequestConfig,
    ) -> Result<ApiResponse, ApiError> {
        self.request(HttpMethod::Put, path, Some(body), config).await
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        config: RequestConfig,
    ) -> Result<ApiResponse, ApiError> {
        self.request(HttpMethod::Patch, path, Some(body), config).await
    }

    pub async fn delete(&self, path: &str, config: RequestConfig) -> Result<ApiResponse, ApiError> {
        self.request(HttpMethod::Delete, path, None::<&()>, config).await
    }

    // ── Domain sub-clients ───────────────────────────────────────────────

    pub fn dashboard(&self) -> Dashboard<'_> {
        Dashboard { client: self }
    }

    pub fn execution(&self) -> Execution<'_> {
        Execution { client: self }
    }

    pub fn market(&self) -> Market<'_> {
        Market { client: self }
    }

    pub fn news(&self) -> News<'_> {
        News { client: self }
    }

    pub fn portfolio(&self) -> Portfolio<'_> {
        Portfolio { client: self }
    }

    // ── Request pipeline ─────────────────────────────────────────────────

    async fn request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        config: RequestConfig,
    ) -> Result<ApiResponse, ApiError> {
        let request = self.build_request(method, path, body, &config)?;
        let response = transport::execute(&self.http, request).await?;
        parse_response(response)
    }

    /// Resolve URL, headers, body and timeout for one call without sending
    /// anything.
    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        config: &RequestConfig,
    ) -> Result<HttpRequest, ApiError> {
        let body = body
            .map(|b| serde_json::to_string(b).map_err(ApiError::Serialization))
            .transpose()?;

        Ok(HttpRequest {
            method,
            url: self.url(path, config),
            headers: merge_headers(&self.default_headers, &config.headers),
            body,
            timeout: config.timeout.unwrap_or(self.default_timeout),
        })
    }

    fn url(&self, path: &str, config: &RequestConfig) -> String {
        let separator = if path.starts_with('/') { "" } else { "/" };
        format!(
            "{}{separator}{path}{}",
            self.base_url,
            build_query_string(&config.query)
        )
    }
}

/// Defaults first, in order, with same-named (case-insensitive) overrides
/// replacing them in place; remaining overrides are appended.
fn merge_headers(defaults: &[(String, String)], overrides: &[(String, String)]) -> Vec<(String, String)> {
    let mut merged = defaults.to_vec();
    for (name, value) in overrides {
        match merged.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some(slot) => slot.1 = value.clone(),
            None => merged.push((name.clone(), value.clone())),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> ApiClient {
        ApiClient::new("http://host/api").unwrap()
    }

    fn get(client: &ApiClient, path: &str, config: &RequestConfig) -> HttpRequest {
        client.build_request(HttpMethod::Get, path, None::<&()>, config).unwrap()
    }

    fn headers(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn constructors_build_the_http_pool() {
        let client = ApiClient::from_config(ClientConfig::new("http://host/api")).unwrap();
        assert_eq!(client.base_url(), "http://host/api");
        assert!(ApiClient::with_headers("http://host/api", Vec::new()).is_ok());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ApiClient::new("http://host/api/").unwrap();
        assert_eq!(client.base_url(), "http://host/api");
        let req = get(&client, "/x", &RequestConfig::default());
        assert_eq!(req.url, "http://host/api/x");
    }

    #[test]
    fn several_trailing_slashes_are_stripped() {
        let client = ApiClient::new("http://host/api///").unwrap();
        assert_eq!(get(&client, "/x", &RequestConfig::default()).url, "http://host/api/x");
    }

    #[test]
    fn leading_slash_is_optional() {
        let c = client();
        let config = RequestConfig::default();
        assert_eq!(get(&c, "x", &config), get(&c, "/x", &config));
    }

    #[test]
    fn query_string_is_appended() {
        let config = RequestConfig::new()
            .query("a", 1)
            .query_opt("b", None::<&str>)
            .query("c", "y z");
        let req = get(&client(), "/x", &config);
        assert_eq!(req.url, "http://host/api/x?a=1&c=y%20z");
    }

    #[test]
    fn json_content_type_is_the_baseline_header() {
        let req = get(&client(), "/x", &RequestConfig::default());
        assert_eq!(req.headers, headers(&[("Content-Type", "application/json")]));
    }

    #[test]
    fn per_call_header_overrides_default() {
        let client = ApiClient::with_headers(
            "http://host/api",
            headers(&[("X-Desk", "rates"), ("Authorization", "Bearer a")]),
        )
        .unwrap();
        let config = RequestConfig::new().header("x-desk", "credit").header("X-Trace", "t1");
        let req = get(&client, "/x", &config);
        assert_eq!(
            req.headers,
            headers(&[
                ("Content-Type", "application/json"),
                ("X-Desk", "credit"),
                ("Authorization", "Bearer a"),
                ("X-Trace", "t1"),
            ])
        );
    }

    #[test]
    fn content_type_can_be_overridden_per_call() {
        let config = RequestConfig::new().header("content-type", "text/csv");
        let req = get(&client(), "/x", &config);
        assert_eq!(req.header("Content-Type"), Some("text/csv"));
        assert_eq!(req.headers.len(), 1);
    }

    #[test]
    fn body_is_json_encoded() {
        let req = client()
            .build_request(HttpMethod::Post, "/x", Some(&json!({"a": 1})), &RequestConfig::default())
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.body.as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn requests_without_body_send_none() {
        let req = get(&client(), "/x", &RequestConfig::default());
        assert!(req.body.is_none());
    }

    #[test]
    fn timeout_defaults_to_fifteen_seconds() {
        let req = get(&client(), "/x", &RequestConfig::default());
        assert_eq!(req.timeout, Duration::from_millis(15_000));
        let req = get(&client(), "/x", &RequestConfig::new().timeout_ms(50));
        assert_eq!(req.timeout, Duration::from_millis(50));
    }

    #[test]
    fn client_default_timeout_is_configurable() {
        let client = ApiClient::from_config(ClientConfig::new("http://host/api").timeout(Duration::from_secs(2))).unwrap();
        assert_eq!(get(&client, "/x", &RequestConfig::default()).timeout, Duration::from_secs(2));
    }

    #[test]
    fn identically_configured_clients_build_identical_requests() {
        let make = || ApiClient::with_headers("http://host/api/", headers(&[("X-Desk", "ops")])).unwrap();
        let first = make();
        let second = make();
        let config = RequestConfig::new().query("page", 2).header("X-Trace", "t");

        // Exercise the first client with unrelated calls beforehand.
        let _ = get(&first, "/other", &RequestConfig::new().header("X-Desk", "fx"));
        let _ = first.build_request(HttpMethod::Put, "/y", Some(&json!([1, 2])), &config);

        assert_eq!(get(&first, "/x", &config), get(&second, "/x", &config));
    }

    #[test]
    fn merge_appends_new_headers_in_order() {
        let merged = merge_headers(&headers(&[("A", "1")]), &headers(&[("B", "2"), ("a", "3")]));
        assert_eq!(merged, headers(&[("A", "3"), ("B", "2")]));
    }
}
