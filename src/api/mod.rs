pub mod error;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;

pub use error::ApiError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Normalize a configured base URL: empty or missing falls back to
/// [`DEFAULT_API_BASE_URL`], and a single trailing slash is dropped.
pub fn resolve_base_url(configured: Option<&str>) -> String {
    let url = configured.map(str::trim).unwrap_or_default();
    if url.is_empty() {
        return DEFAULT_API_BASE_URL.to_string();
    }
    url.strip_suffix('/').unwrap_or(url).to_string()
}

/// Join `path` onto `base`, leaving absolute `http(s)` URLs untouched.
pub fn build_request_url(base: &str, path: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }
    let base = base.strip_suffix('/').unwrap_or(base);
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

fn is_absolute_url(path: &str) -> bool {
    ["http:", "https:"].iter().any(|scheme| {
        path.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Per-call overrides for [`ApiClient::fetch_json`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    /// Merged over the default `content-type: application/json`; these win.
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: Option<&str>) -> Self {
        Self {
            base_url: resolve_base_url(base_url),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn request_url(&self, path: &str) -> String {
        build_request_url(&self.base_url, path)
    }

    /// Issue one request and decode the JSON body as `T`.
    ///
    /// There are no retries and no timeout; a single attempt is made.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let url = self.request_url(path);
        let headers = merge_headers(&options.headers)?;
        debug!(method = %options.method, %url, "sending request");

        let mut request = self
            .client
            .request(options.method, &url)
            .headers(headers);
        if let Some(body) = &options.body {
            request = request.body(body.to_string());
        }

        let resp = request.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let message = if text.is_empty() {
                path.to_string()
            } else {
                text
            };
            return Err(ApiError::Request {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|source| ApiError::Parse {
            path: path.to_string(),
            source,
        })
    }
}

fn merge_headers(extra: &[(String, String)]) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in extra {
        let invalid = || ApiError::InvalidHeader { name: name.clone() };
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        headers.insert(name, value);
    }
    Ok(headers)
}
