//! Executes an `HttpRequest` over the network with a per-request deadline.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Send `request` and read the full body, failing with `ApiError::Timeout`
/// if both do not finish within `request.timeout`.
///
/// The deadline covers connect, headers and body. It is owned by this call
/// alone and is dropped on every return path.
pub async fn execute(http: &reqwest::Client, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    let headers = to_header_map(&request.headers)?;
    let mut builder = http
        .request(request.method.into(), &request.url)
        .headers(headers);
    if let Some(body) = request.body {
        builder = builder.body(body);
    }

    let method = request.method;
    let url = request.url;
    let timeout = request.timeout;
    debug!(%method, %url, timeout_ms = timeout.as_millis() as u64, "sending request");

    let exchange = async {
        let response = builder.send().await?;
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().await?;
        Ok::<_, reqwest::Error>(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    };

    match tokio::time::timeout(timeout, exchange).await {
        Ok(Ok(response)) => {
            debug!(%method, %url, status = response.status, "received response");
            Ok(response)
        }
        Ok(Err(e)) => {
            debug!(%method, %url, error = %e, "transport failure");
            Err(ApiError::Transport(e))
        }
        Err(_) => {
            warn!(%method, %url, timeout_ms = timeout.as_millis() as u64, "request timed out");
            Err(ApiError::Timeout)
        }
    }
}

fn to_header_map(headers: &[(String, String)]) -> Result<HeaderMap, ApiError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ApiError::InvalidHeader(name.clone()))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| ApiError::InvalidHeader(format!("{name}: {value}")))?;
        map.insert(name, value);
    }
    Ok(map)
}
