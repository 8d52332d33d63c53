//! Error types for the download module.
//!
//! Each variant carries the URL or path it concerns so messages stand on
//! their own.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while downloading a file.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The provided URL is malformed or invalid.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// No usable file name can be taken from the URL's last path segment.
    #[error("cannot derive a file name from {url}")]
    FileName {
        /// The URL without a usable last segment.
        url: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client for {url}: {source}")]
    Client {
        /// The URL being downloaded.
        url: String,
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Connection establishment exceeded the connect timeout.
    #[error("timeout downloading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The server answered with anything other than 200 OK.
    #[error("file {url} not found (HTTP {status}), download failed")]
    NotFound {
        /// The URL that was requested.
        url: String,
        /// The status the server returned.
        status: u16,
    },

    /// The response body broke off while it was being copied.
    #[error("error reading response body from {url}: {source}")]
    Stream {
        /// The URL being downloaded.
        url: String,
        /// The underlying read error.
        #[source]
        source: std::io::Error,
    },

    /// File system error during download (create file, write, etc.)
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a file-name derivation error.
    pub fn file_name(url: impl Into<String>) -> Self {
        Self::FileName { url: url.into() }
    }

    /// Creates a client construction error.
    pub fn client(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Client {
            url: url.into(),
            source,
        }
    }

    /// Classifies an error returned while sending the request.
    pub fn from_send(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.into() }
        } else {
            Self::Network {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates a not-found error for a non-200 status.
    pub fn not_found(url: impl Into<String>, status: u16) -> Self {
        Self::NotFound {
            url: url.into(),
            status,
        }
    }

    /// Creates a body stream error.
    pub fn stream(url: impl Into<String>, source: std::io::Error) -> Self {
        Self::Stream {
            url: url.into(),
            source,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
