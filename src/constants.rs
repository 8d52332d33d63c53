//! Defaults shared by the request dispatcher and the file downloader.

use std::time::Duration;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default connect timeout as a [`Duration`].
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(CONNECT_TIMEOUT_SECS);

/// Size of the read/write window used when streaming a download to disk (10 KiB).
pub const DOWNLOAD_BUFFER_SIZE: usize = 10 * 1024;
