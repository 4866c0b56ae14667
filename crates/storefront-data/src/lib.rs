//! HTTP fetch client for the storefront.
//!
//! A thin builder-style wrapper around `reqwest` that buffers responses and
//! reports failures as [`FetchError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_data::FetchClient;
//!
//! let client = FetchClient::new();
//! let products: Vec<Product> = client
//!     .get("https://fakestoreapi.com/products")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod response;

use std::collections::HashMap;
use std::time::Duration;

pub use error::FetchError;
pub use response::Response;

/// HTTP client for making outbound requests.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
            default_headers: HashMap::new(),
            timeout: None,
        }
    }

    /// Create a client with a base URL that will be prepended to relative
    /// request paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Bound every request by `timeout`. Without one the transport's own
    /// behavior applies.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        let url = self.resolve(url.into());
        let mut inner = self.http.get(&url);
        for (key, value) in &self.default_headers {
            inner = inner.header(key.as_str(), value.as_str());
        }
        if let Some(timeout) = self.timeout {
            inner = inner.timeout(timeout);
        }
        ClientRequestBuilder { inner, url }
    }

    fn resolve(&self, url: String) -> String {
        match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    inner: reqwest::RequestBuilder,
    url: String,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.inner = self.inner.header(key.as_ref(), value.as_ref());
        self
    }

    /// The fully resolved request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send the request and buffer the response.
    ///
    /// Non-2xx statuses are returned as a normal [`Response`]; use
    /// [`Response::error_for_status`] to turn them into errors.
    pub async fn send(self) -> Result<Response, FetchError> {
        tracing::debug!(url = %self.url, "sending request");

        let response = self.inner.send().await?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(url = %self.url, status, bytes = body.len(), "received response");
        Ok(Response::new(status, headers, body))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Response};
}
