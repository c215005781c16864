//! Client and per-request configuration.
//!
//! `ClientConfig` is resolved once at startup (usually from the environment)
//! and handed to `ApiClient`. `RequestConfig` is the per-call bag of header
//! overrides, query parameters and timeout.

use std::fmt;
use std::time::Duration;

/// Applied when a request does not set its own timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Base URL used when no origin is known.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Origin the backend is served from, e.g. `https://ops.example.com`.
pub const ORIGIN_ENV: &str = "FLEET_API_ORIGIN";

/// Overrides `DEFAULT_TIMEOUT`, in milliseconds.
pub const TIMEOUT_ENV: &str = "FLEET_API_TIMEOUT_MS";

/// `<origin>/api` when an origin is known, `DEFAULT_BASE_URL` otherwise.
pub fn resolve_base_url(origin: Option<&str>) -> String {
    match origin.map(|o| o.trim_end_matches('/')).filter(|o| !o.is_empty()) {
        Some(origin) => format!("{origin}/api"),
        None => DEFAULT_BASE_URL.to_string(),
    }
}

/// Construction-time settings for `ApiClient`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub default_headers: Vec<(String, String)>,
    pub default_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_headers: Vec::new(),
            default_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Read `FLEET_API_ORIGIN` and `FLEET_API_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let origin = lookup(ORIGIN_ENV);
        let default_timeout = match lookup(TIMEOUT_ENV) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!(value = %raw, "ignoring unparsable {TIMEOUT_ENV}");
                    DEFAULT_TIMEOUT
                }
            },
            None => DEFAULT_TIMEOUT,
        };
        Self {
            base_url: resolve_base_url(origin.as_deref()),
            default_headers: Vec::new(),
            default_timeout,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }
}

/// A query parameter value. Rendered the way a browser stringifies it.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Str(s) => f.write_str(s),
            QueryValue::Int(n) => write!(f, "{n}"),
            QueryValue::Float(n) => write_js_number(f, *n),
            QueryValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// `Number.prototype.toString` for finite and non-finite doubles: `NaN`,
/// `Infinity`, `-0` as `0`, and exponent notation (`1e+21`, `1.5e-7`)
/// outside `[1e-6, 1e21)`.
fn write_js_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if n == 0.0 {
        return f.write_str("0");
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return write!(f, "{n}");
    }
    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => write!(f, "{mantissa}e+{power}"),
        _ => f.write_str(&exp),
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Str(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        QueryValue::Str(value.clone())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

macro_rules! int_query_value {
    ($($t:ty),*) => {
        $(impl From<$t> for QueryValue {
            fn from(value: $t) -> Self {
                QueryValue::Int(i64::from(value))
            }
        })*
    };
}

int_query_value!(i8, i16, i32, i64, u8, u16, u32);

/// Per-call settings. All fields are optional; `Default` sends no extra
/// headers, no query string and uses the client's default timeout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestConfig {
    pub headers: Vec<(String, String)>,
    /// Ordered parameters. `None` values are skipped when the URL is built.
    pub query: Vec<(String, Option<QueryValue>)>,
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push((key.into(), Some(value.into())));
        self
    }

    /// Add a parameter that may be absent. `None` is dropped from the final
    /// query string.
    pub fn query_opt<V: Into<QueryValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.query.push((key.into(), value.map(Into::into)));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn timeout_ms(self, ms: u64) -> Self {
        self.timeout(Duration::from_millis(ms))
    }
}

/// Percent-encode like `encodeURIComponent`: `urlencoding` escapes
/// everything but `A-Za-z0-9-_.~`, so the sub-delimiters `!*'()` are put back.
fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw)
        .replace("%21", "!")
        .replace("%2A", "*")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
}

/// Render `?k=v&...` from the parameters that have a value, or an empty
/// string when none survive. Keys and values are percent-encoded separately.
pub fn build_query_string(query: &[(String, Option<QueryValue>)]) -> String {
    let pairs: Vec<String> = query
        .iter()
        .filter_map(|(key, value)| {
            value.as_ref().map(|v| {
                format!("{}={}", encode_component(key), encode_component(&v.to_string()))
            })
        })
        .collect();

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}
