//! reqwrap
//!
//! Uniform HTTP request helpers over `reqwest`, plus a streamed file
//! downloader.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`client`] - Client construction (connect timeout, optional pool)
//! - [`method`] - The closed set of supported HTTP methods
//! - [`query`] - Whole-string query escaping
//! - [`request`] - Request dispatch and fixed-method helpers
//! - [`response`] - The uniform [`Response`] wrapper
//! - [`download`] - Streaming a URL's body to a file
//!
//! Request failures never surface as `Err`: they are carried by the returned
//! [`Response`]. Downloads return `Result<PathBuf, DownloadError>`.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod constants;
pub mod download;
pub mod error;
pub mod method;
pub mod query;
pub mod request;
pub mod response;

// Re-export commonly used types
pub use client::{ClientFactory, ClientPool, build_client};
pub use constants::{DEFAULT_CONNECT_TIMEOUT, DOWNLOAD_BUFFER_SIZE};
pub use download::{DownloadError, download_file, download_file_with};
pub use error::RequestError;
pub use method::HttpMethod;
pub use request::{
    RequestOptions, delete, delete_basic_auth, get, get_basic_auth, head, post, post_basic_auth,
    put, put_basic_auth, request, request_basic_auth,
};
pub use response::Response;
