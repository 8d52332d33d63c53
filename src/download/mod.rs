//! Streamed file downloads.
//!
//! A download issues one GET, accepts only `200 OK`, and copies the body to
//! `<dir>/<last URL path segment>` through a fixed 10 KiB window.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::time::Duration;
//!
//! use reqwrap::download::download_file;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let path = download_file(
//!     "https://example.com/paper.pdf",
//!     Path::new("./downloads"),
//!     Duration::from_secs(10),
//! )
//! .await?;
//! println!("Downloaded: {}", path.display());
//! # Ok(())
//! # }
//! ```

mod downloader;
mod error;
mod filename;

pub use downloader::{download_file, download_file_with};
pub use error::DownloadError;
