//! Request dispatch.
//!
//! [`request`] validates the method, builds the outgoing request from
//! [`RequestOptions`], sends it through a client from the options'
//! [`ClientFactory`] and wraps the outcome in a [`Response`]. The fixed-method
//! helpers ([`get`], [`post_basic_auth`], ...) only pin the method.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use reqwrap::RequestOptions;
//!
//! # async fn example() {
//! let options = RequestOptions::new()
//!     .param("q", "rust")
//!     .header("Accept", "application/json")
//!     .timeout(Duration::from_secs(2));
//! let response = reqwrap::get("https://example.com/search", &options).await;
//! if let Some(err) = response.err() {
//!     eprintln!("request failed: {err}");
//! } else {
//!     println!("{} {}", response.code(), response.text());
//! }
//! # }
//! ```

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::client::ClientFactory;
use crate::constants::DEFAULT_CONNECT_TIMEOUT;
use crate::error::RequestError;
use crate::method::HttpMethod;
use crate::query::append_query;
use crate::response::Response;

/// Per-call request parameters.
///
/// Built with chained setters; nothing outlives the call it is passed to.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    body: Option<Vec<u8>>,
    headers: Vec<(String, String)>,
    params: HashMap<String, String>,
    timeout: Duration,
    basic_auth: Option<(String, String)>,
    factory: ClientFactory,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            body: None,
            headers: Vec::new(),
            params: HashMap::new(),
            timeout: DEFAULT_CONNECT_TIMEOUT,
            basic_auth: None,
            factory: ClientFactory::default(),
        }
    }
}

impl RequestOptions {
    /// Options with no body, headers or params and the default connect timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a JSON body.
    ///
    /// A value that fails to serialize is not reported: the request is sent
    /// with an empty body instead.
    #[must_use]
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        let bytes = serde_json::to_vec(body).unwrap_or_else(|e| {
            debug!(error = %e, "JSON body serialization failed, sending empty body");
            Vec::new()
        });
        self.body = Some(bytes);
        self
    }

    /// Adds a header. Repeated names are all sent.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Adds every header from `headers`.
    #[must_use]
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets a query parameter, replacing an earlier value for the same key.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Sets every query parameter from `params`.
    #[must_use]
    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets Basic credentials. They are only sent when both parts are non-empty.
    #[must_use]
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some((username.into(), password.into()));
        self
    }

    /// Chooses how the client for this call is obtained.
    #[must_use]
    pub fn client_factory(mut self, factory: ClientFactory) -> Self {
        self.factory = factory;
        self
    }

    /// The configured connect timeout.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        self.timeout
    }

    /// The configured client factory.
    #[must_use]
    pub fn factory(&self) -> &ClientFactory {
        &self.factory
    }

    /// The URL with the encoded query appended, as it will be requested.
    #[must_use]
    pub fn target_url(&self, url: &str) -> String {
        append_query(url, &self.params)
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        self.basic_auth
            .as_ref()
            .map(|(user, pass)| (user.as_str(), pass.as_str()))
    }
}

/// Dispatches `method` (case-insensitive) to `url`.
///
/// Unsupported methods fail without any network activity.
#[instrument(skip(options), fields(url = %url))]
pub async fn request(method: &str, url: &str, options: &RequestOptions) -> Response {
    match method.parse::<HttpMethod>() {
        Ok(method) => dispatch(method, url, options, options.credentials()).await,
        Err(err) => {
            debug!(error = %err, "rejected request method");
            Response::failure(err)
        }
    }
}

/// Like [`request`], with Basic credentials supplied explicitly.
///
/// The explicit credentials take precedence over any set on `options`.
#[instrument(skip(options, password), fields(url = %url))]
pub async fn request_basic_auth(
    method: &str,
    url: &str,
    options: &RequestOptions,
    username: &str,
    password: &str,
) -> Response {
    match method.parse::<HttpMethod>() {
        Ok(method) => dispatch(method, url, options, Some((username, password))).await,
        Err(err) => {
            debug!(error = %err, "rejected request method");
            Response::failure(err)
        }
    }
}

async fn dispatch(
    method: HttpMethod,
    url: &str,
    options: &RequestOptions,
    credentials: Option<(&str, &str)>,
) -> Response {
    match execute(method, url, options, credentials).await {
        Ok((code, data)) => {
            debug!(%method, status = code, bytes = data.len(), "request completed");
            Response::success(data, code)
        }
        Err(err) => {
            debug!(%method, error = %err, "request failed");
            Response::failure(err)
        }
    }
}

async fn execute(
    method: HttpMethod,
    url: &str,
    options: &RequestOptions,
    credentials: Option<(&str, &str)>,
) -> Result<(u16, Vec<u8>), RequestError> {
    let url = options.target_url(url);
    let client = options
        .factory
        .client(options.timeout)
        .map_err(|e| RequestError::build(url.as_str(), e))?;

    let credentials = credentials.filter(|(user, pass)| !user.is_empty() && !pass.is_empty());

    let mut builder = client.request(method.into(), url.as_str());
    for (name, value) in &options.headers {
        // Basic credentials replace any caller-supplied Authorization header.
        if credentials.is_some() && name.eq_ignore_ascii_case(AUTHORIZATION.as_str()) {
            continue;
        }
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some((username, password)) = credentials {
        builder = builder.basic_auth(username, Some(password));
    }
    if let Some(body) = &options.body {
        builder = builder.body(body.clone());
    }

    let response = builder
        .send()
        .await
        .map_err(|e| RequestError::from_send(url.as_str(), e))?;
    let status = response.status().as_u16();
    let data = response
        .bytes()
        .await
        .map_err(|e| RequestError::body(url.as_str(), e))?;

    Ok((status, data.to_vec()))
}

/// Sends a HEAD request.
pub async fn head(url: &str, options: &RequestOptions) -> Response {
    request(HttpMethod::Head.as_str(), url, options).await
}

/// Sends a GET request.
pub async fn get(url: &str, options: &RequestOptions) -> Response {
    request(HttpMethod::Get.as_str(), url, options).await
}

/// Sends a GET request with Basic credentials.
pub async fn get_basic_auth(
    url: &str,
    options: &RequestOptions,
    username: &str,
    password: &str,
) -> Response {
    request_basic_auth(HttpMethod::Get.as_str(), url, options, username, password).await
}

/// Sends a POST request.
pub async fn post(url: &str, options: &RequestOptions) -> Response {
    request(HttpMethod::Post.as_str(), url, options).await
}

/// Sends a POST request with Basic credentials.
pub async fn post_basic_auth(
    url: &str,
    options: &RequestOptions,
    username: &str,
    password: &str,
) -> Response {
    request_basic_auth(HttpMethod::Post.as_str(), url, options, username, password).await
}

/// Sends a PUT request.
pub async fn put(url: &str, options: &RequestOptions) -> Response {
    request(HttpMethod::Put.as_str(), url, options).await
}

/// Sends a PUT request with Basic credentials.
pub async fn put_basic_auth(
    url: &str,
    options: &RequestOptions,
    username: &str,
    password: &str,
) -> Response {
    request_basic_auth(HttpMethod::Put.as_str(), url, options, username, password).await
}

/// Sends a DELETE request.
pub async fn delete(url: &str, options: &RequestOptions) -> Response {
    request(HttpMethod::Delete.as_str(), url, options).await
}

/// Sends a DELETE request with Basic credentials.
pub async fn delete_basic_auth(
    url: &str,
    options: &RequestOptions,
    username: &str,
    password: &str,
) -> Response {
    request_basic_auth(HttpMethod::Delete.as_str(), url, options, username, password).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RequestOptions::new();
        assert_eq!(options.connect_timeout(), DEFAULT_CONNECT_TIMEOUT);
        assert!(matches!(options.factory(), ClientFactory::Fresh));
        assert_eq!(options.target_url("http://h/p"), "http://h/p");
    }

    #[test]
    fn test_target_url_appends_escaped_query() {
        let options = RequestOptions::new().param("k", "v w");
        assert_eq!(options.target_url("http://h/p"), "http://h/p?k%3Dv+w");
    }

    #[test]
    fn test_json_body_serializes() {
        let options = RequestOptions::new().json(&serde_json::json!({"a": 1}));
        assert_eq!(options.body.as_deref(), Some(br#"{"a":1}"#.as_slice()));
    }

    #[test]
    fn test_json_body_serialization_failure_yields_empty_body() {
        // Maps with non-string keys cannot be represented as JSON objects.
        let body: HashMap<(i32, i32), i32> = HashMap::from([((1, 2), 3)]);
        let options = RequestOptions::new().json(&body);
        assert_eq!(options.body.as_deref(), Some([].as_slice()));
    }

    #[test]
    fn test_headers_accumulate() {
        let options = RequestOptions::new()
            .header("X-A", "1")
            .headers([("X-A", "2"), ("X-B", "3")]);
        assert_eq!(options.headers.len(), 3);
    }

    #[test]
    fn test_unsupported_method_short_circuits() {
        // No runtime is needed: validation fails before any I/O.
        let response = tokio_test::block_on(request(
            "OPTIONS",
            "http://127.0.0.1:9/",
            &RequestOptions::new(),
        ));
        assert_eq!(response.code(), 0);
        assert!(response.bytes().is_empty());
        assert!(matches!(
            response.err(),
            Some(RequestError::UnsupportedMethod { method }) if method == "OPTIONS"
        ));
    }

    #[tokio::test]
    async fn test_malformed_url_is_build_error() {
        let response = get("not a url", &RequestOptions::new()).await;
        assert_eq!(response.code(), 0);
        assert!(matches!(response.err(), Some(RequestError::Build { .. })));
    }
}
