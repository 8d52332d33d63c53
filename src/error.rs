//! Error types for the request dispatcher.
//!
//! A [`RequestError`] never escapes as `Err`: it travels inside the
//! [`Response`](crate::Response) returned by every dispatch.

use thiserror::Error;

/// Errors that can occur while dispatching a request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The method is not one of GET, POST, PUT, PATCH, DELETE or HEAD.
    #[error("unsupported HTTP method: {method}")]
    UnsupportedMethod {
        /// The method as the caller supplied it.
        method: String,
    },

    /// The client or the request could not be constructed (bad URL, bad header, TLS init).
    #[error("failed to build request for {url}: {source}")]
    Build {
        /// The final URL, including any appended query string.
        url: String,
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// Connection establishment exceeded the connect timeout.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
        /// The underlying timeout error.
        #[source]
        source: reqwest::Error,
    },

    /// Transport-level failure (DNS, connection refused, TLS, protocol).
    #[error("network error requesting {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The response arrived but its body could not be read.
    #[error("failed to read response body from {url}: {source}")]
    Body {
        /// The URL whose body failed.
        url: String,
        /// The underlying read error.
        #[source]
        source: reqwest::Error,
    },
}

impl RequestError {
    /// Creates an unsupported-method error.
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// Creates a construction error.
    pub fn build(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Build {
            url: url.into(),
            source,
        }
    }

    /// Creates a body-read error.
    pub fn body(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Body {
            url: url.into(),
            source,
        }
    }

    /// Classifies an error returned by `RequestBuilder::send`.
    pub fn from_send(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url, source }
        } else if source.is_builder() {
            Self::Build { url, source }
        } else {
            Self::Network { url, source }
        }
    }

    /// Returns true for connect-timeout failures.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

// No `From<reqwest::Error>`: every variant needs the URL for context, so the
// helper constructors above are used instead.
