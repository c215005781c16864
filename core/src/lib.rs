//! Async API client core for the fleet operations backend.
//!
//! # Overview
//! `ApiClient` gives every outbound call one path: base URL resolution,
//! header merging, JSON body encoding, a per-request timeout, content-type
//! sniffing and status-based errors. Domain sub-clients (`dashboard`,
//! `execution`, `market`, `news`, `portfolio`) are thin typed wrappers on
//! top of it.
//!
//! # Design
//! - `ApiClient` is stateless apart from its immutable configuration; build
//!   it once and pass it by reference.
//! - Requests are built and responses parsed as plain data (`HttpRequest`,
//!   `HttpResponse`), so everything except the network hop is deterministic.
//! - Failures are one `ApiError` enum: non-2xx (`Http`), timeout (`Timeout`,
//!   status 408) and transport errors (`Transport`).
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod response;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use config::{ClientConfig, QueryValue, RequestConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use response::{parse_response, ApiResponse, Payload};
pub use types::{DroneStatus, GeoPosition, MissionStatus, Severity};
