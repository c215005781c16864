//! Response envelope and body decoding.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpResponse;

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Body of a response whose content-type contains `application/json`.
    Json(Value),
    /// Any other body, read verbatim.
    Text(String),
}

impl Payload {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Json(_) => None,
        }
    }

    /// Decode into `T`. A text payload is offered to `T` as a JSON string.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let value = match self {
            Payload::Json(value) => value,
            Payload::Text(text) => Value::String(text),
        };
        serde_json::from_value(value).map_err(ApiError::Deserialization)
    }
}

/// A completed 2xx response: `{ data, status, headers }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T = Payload> {
    pub data: T,
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

impl ApiResponse<Payload> {
    /// Decode the payload into a typed value, keeping status and headers.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<ApiResponse<T>, ApiError> {
        Ok(ApiResponse {
            data: self.data.decode()?,
            status: self.status,
            headers: self.headers,
        })
    }
}

impl<T> ApiResponse<T> {
    pub fn header(&self, name: &str) -> Option<&str> {
        crate::http::find_header(&self.headers, name)
    }
}

/// Decode a response body according to its content-type, then check the
/// status.
///
/// Decoding happens first so that JSON error bodies end up in
/// `ApiError::Http::data`. A body that claims `application/json` but is not
/// valid JSON (including an empty one) fails with `Deserialization`.
pub fn parse_response(response: HttpResponse) -> Result<ApiResponse, ApiError> {
    let is_json = response
        .header("content-type")
        .is_some_and(|ct| ct.contains("application/json"));

    let success = response.is_success();
    let data = if is_json {
        Payload::Json(serde_json::from_str(&response.body).map_err(ApiError::Deserialization)?)
    } else {
        Payload::Text(response.body)
    };

    if !success {
        return Err(ApiError::Http {
            status: response.status,
            status_text: response.status_text,
            data,
        });
    }

    Ok(ApiResponse {
        data,
        status: response.status,
        headers: response.headers,
    })
}
