//! Low-level HTTP transport for the D-API platform.
//!
//! One request per call: builds the target URL, injects the default headers,
//! enforces a per-call deadline, negotiates JSON vs. plain-text decoding, and
//! normalizes non-2xx responses into [`DApiError::Api`]. No retries, no
//! shared state beyond the immutable configuration.

use std::time::Duration;

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{DApiError, DApiResult};

const DEFAULT_BASE_URL: &str = "https://api.d-api.cloud";
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Configuration for connecting to the D-API platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DApiConfig {
    /// API key, sent verbatim as the `Authorization` header. Required.
    pub api_key: String,
    /// Base URL override (default: `https://api.d-api.cloud`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request deadline in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for DApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl DApiConfig {
    /// Configuration with the given API key and the default base URL and
    /// timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }
}

/// Scalar query-parameter value, stringified unquoted into the URL.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl std::fmt::Display for QueryValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}
impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}
impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::UInt(u64::from(value))
    }
}
impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}
impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}
impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Query-string builder.
///
/// A parameter set from `None` is omitted entirely — it never appears as an
/// empty or literal-`undefined` pair. Parameters keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pairs: Vec<(String, QueryValue)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Append a parameter only when a value is present.
    pub fn set_opt<V: Into<QueryValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The collected pairs, in insertion order.
    pub fn pairs(&self) -> &[(String, QueryValue)] {
        &self.pairs
    }
}

/// Per-request options for [`DApiClient::request`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method (default GET).
    pub method: Method,
    /// JSON request body; no payload is sent when absent.
    pub body: Option<Value>,
    /// Query parameters.
    pub query: Query,
    /// Extra headers, merged over the defaults — a caller-supplied header
    /// replaces the default of the same name, `Authorization` included.
    pub headers: HeaderMap,
}

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// The response declared `application/json` and parsed as JSON.
    Json(Value),
    /// Any other content type, taken as raw text.
    Text(String),
}

/// Low-level D-API HTTP client.
///
/// Holds only immutable configuration; cloning is cheap and clones share the
/// underlying connection pool, so any number of calls may run concurrently.
#[derive(Debug, Clone)]
pub struct DApiClient {
    http: reqwest::Client,
    auth: HeaderValue,
    base_url: String,
    timeout: Duration,
}

impl DApiClient {
    /// Create a new client from a [`DApiConfig`].
    ///
    /// Fails before any network activity when the API key is empty or not a
    /// valid header value. Exactly one trailing slash is stripped from the
    /// base URL.
    pub fn new(config: &DApiConfig) -> DApiResult<Self> {
        if config.api_key.is_empty() {
            return Err(DApiError::Config("API key is required".to_string()));
        }
        let auth = HeaderValue::from_str(&config.api_key)
            .map_err(|_| DApiError::Config("API key is not a valid header value".to_string()))?;

        let http = reqwest::Client::builder().build()?;
        let base_url = config
            .base_url
            .strip_suffix('/')
            .unwrap_or(&config.base_url)
            .to_string();

        Ok(Self {
            http,
            auth,
            base_url,
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the absolute target URL for a path and query.
    ///
    /// `path` may be relative to the base URL or a full URL of its own;
    /// resolution follows WHATWG URL semantics via [`Url::join`].
    fn build_url(&self, path: &str, query: &Query) -> DApiResult<Url> {
        let mut url = Url::parse(&self.base_url)?.join(path)?;

        if !query.is_empty() {
            let mut serializer = url.query_pairs_mut();
            for (key, value) in query.pairs() {
                serializer.append_pair(key, &value.to_string());
            }
        }

        Ok(url)
    }

    /// Default headers with the caller's merged on top (caller wins).
    fn request_headers(&self, extra: HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.auth.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.extend(extra);
        headers
    }

    /// Perform one HTTP exchange and return the decoded body.
    ///
    /// The exchange runs under a deadline of the configured timeout; when it
    /// fires, the in-flight request is aborted and the call fails with
    /// [`DApiError::Timeout`]. The deadline covers the exchange through
    /// response headers; the body is read afterwards. Non-2xx responses
    /// become [`DApiError::Api`] with the decoded error body attached.
    /// Network-level failures propagate unchanged as [`DApiError::Http`].
    pub async fn request_raw(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> DApiResult<ResponseBody> {
        let RequestOptions {
            method,
            body,
            query,
            headers,
        } = options;

        let url = self.build_url(path, &query)?;
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, url)
            .headers(self.request_headers(headers));
        if let Some(ref body) = body {
            request = request.json(body);
        }

        // Dropping the timed-out future cancels the in-flight exchange, so
        // the deadline needs no manual cleanup on any exit path.
        let response = match tokio::time::timeout(self.timeout, request.send()).await {
            Ok(result) => result?,
            Err(_) => return Err(DApiError::Timeout),
        };

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));
        let text = response.text().await?;

        let body = if is_json {
            ResponseBody::Json(serde_json::from_str(&text)?)
        } else {
            ResponseBody::Text(text)
        };

        if !status.is_success() {
            return Err(DApiError::from_api_response(status.as_u16(), body));
        }
        Ok(body)
    }

    /// Perform one HTTP exchange and decode the body into `T`.
    ///
    /// Plain-text responses decode only into string-shaped targets.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> DApiResult<T> {
        match self.request_raw(path, options).await? {
            ResponseBody::Json(value) => Ok(serde_json::from_value(value)?),
            ResponseBody::Text(text) => Ok(serde_json::from_value(Value::String(text))?),
        }
    }

    // ─── Fixed-method wrappers ───────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: Query) -> DApiResult<T> {
        self.request(
            path,
            RequestOptions {
                method: Method::GET,
                query,
                ..Default::default()
            },
        )
        .await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Value>,
        query: Query,
    ) -> DApiResult<T> {
        self.request(
            path,
            RequestOptions {
                method: Method::POST,
                body,
                query,
                ..Default::default()
            },
        )
        .await
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: Option<Value>) -> DApiResult<T> {
        self.request(
            path,
            RequestOptions {
                method: Method::PUT,
                body,
                ..Default::default()
            },
        )
        .await
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> DApiResult<T> {
        self.request(
            path,
            RequestOptions {
                method: Method::PATCH,
                body,
                ..Default::default()
            },
        )
        .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<Value>,
    ) -> DApiResult<T> {
        self.request(
            path,
            RequestOptions {
                method: Method::DELETE,
                body,
                ..Default::default()
            },
        )
        .await
    }
}

// Percent-encoding for path segments (minimal to avoid an extra dependency).
pub(crate) fn encode_segment(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> DApiClient {
        DApiClient::new(&DApiConfig {
            api_key: "test-key".to_string(),
            base_url: base_url.to_string(),
            timeout_ms: 30_000,
        })
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = DApiConfig::default();
        assert!(config.api_key.is_empty());
        assert_eq!(config.base_url, "https://api.d-api.cloud");
        assert_eq!(config.timeout_ms, 30_000);
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let err = DApiClient::new(&DApiConfig::default()).unwrap_err();
        assert!(matches!(err, DApiError::Config(_)));
        assert_eq!(err.to_string(), "API key is required");
    }

    #[test]
    fn test_api_key_with_invalid_header_bytes_rejected() {
        let err = DApiClient::new(&DApiConfig::new("key\nwith-newline")).unwrap_err();
        assert!(matches!(err, DApiError::Config(_)));
    }

    #[test]
    fn test_base_url_strips_one_trailing_slash() {
        assert_eq!(test_client("https://x.test/").base_url(), "https://x.test");
        assert_eq!(test_client("https://x.test//").base_url(), "https://x.test/");
    }

    #[test]
    fn test_build_url_joins_path() {
        let client = test_client("https://x.test");
        let url = client.build_url("/api/v1/sessions", &Query::new()).unwrap();
        assert_eq!(url.as_str(), "https://x.test/api/v1/sessions");
    }

    #[test]
    fn test_trailing_slash_base_equivalence() {
        let with = test_client("https://x.test/");
        let without = test_client("https://x.test");
        let query = Query::new().set("sessionId", "s1");

        assert_eq!(
            with.build_url("/api/v1/chats/", &query).unwrap(),
            without.build_url("/api/v1/chats/", &query).unwrap()
        );
    }

    #[test]
    fn test_build_url_absolute_path_kept() {
        let client = test_client("https://x.test");
        let url = client
            .build_url("https://other.test/hook", &Query::new())
            .unwrap();
        assert_eq!(url.as_str(), "https://other.test/hook");
    }

    #[test]
    fn test_query_omits_none_values() {
        let client = test_client("https://x.test");
        let query = Query::new()
            .set("sessionId", "s1")
            .set_opt("search", None::<&str>)
            .set_opt("limit", Some(25u32));
        let url = client.build_url("/api/v1/chats/", &query).unwrap();

        assert_eq!(url.query(), Some("sessionId=s1&limit=25"));
        assert!(!url.as_str().contains("search"));
    }

    #[test]
    fn test_query_stringifies_scalars() {
        let client = test_client("https://x.test");
        let query = Query::new()
            .set("includeEmpty", false)
            .set("page", 3u32)
            .set("offset", -1i64)
            .set("ratio", 1.5f64);
        let url = client.build_url("/api/v1/chats/", &query).unwrap();

        assert_eq!(url.query(), Some("includeEmpty=false&page=3&offset=-1&ratio=1.5"));
    }

    #[test]
    fn test_query_values_are_url_encoded() {
        let client = test_client("https://x.test");
        let query = Query::new().set("search", "john doe");
        let url = client.build_url("/api/v1/chats/", &query).unwrap();

        assert_eq!(url.query(), Some("search=john+doe"));
    }

    #[test]
    fn test_header_merge_caller_overrides_defaults() {
        let client = test_client("https://x.test");

        let merged = client.request_headers(HeaderMap::new());
        assert_eq!(merged.get(AUTHORIZATION).unwrap(), "test-key");
        assert_eq!(merged.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(merged.get(ACCEPT).unwrap(), "application/json");

        let mut extra = HeaderMap::new();
        extra.insert(AUTHORIZATION, HeaderValue::from_static("other-key"));
        extra.insert(ACCEPT, HeaderValue::from_static("text/plain"));
        let merged = client.request_headers(extra);
        assert_eq!(merged.get(AUTHORIZATION).unwrap(), "other-key");
        assert_eq!(merged.get(ACCEPT).unwrap(), "text/plain");
        assert_eq!(merged.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("my-session_1.0~x"), "my-session_1.0~x");
        assert_eq!(encode_segment("5511 9999/a"), "5511%209999%2Fa");
        assert_eq!(encode_segment("grp@g.us"), "grp%40g.us");
    }
}
