//! Streams a URL's body into a file named after its last path segment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::TryStreamExt;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tokio_util::io::StreamReader;
use tracing::{debug, info, instrument};
use url::Url;

use super::error::DownloadError;
use super::filename::file_name_from_url;
use crate::constants::DOWNLOAD_BUFFER_SIZE;
use crate::request::RequestOptions;

/// Downloads `url` into `dest_dir` using a fresh client with `timeout` as its
/// connect timeout.
///
/// The file is named after the URL's last path segment and overwritten if it
/// already exists. The directory must exist.
///
/// # Returns
///
/// The path of the written file.
///
/// # Errors
///
/// Returns `DownloadError` if:
/// - The URL is invalid or has no usable last segment
/// - The request fails (network error, connect timeout)
/// - The server answers with any status other than 200 (no file is created)
/// - Reading the body or writing to disk fails (the partial file is removed)
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let path = reqwrap::download_file(
///     "https://example.com/files/report.pdf",
///     Path::new("./downloads"),
///     Duration::from_secs(5),
/// )
/// .await?;
/// println!("Downloaded to: {}", path.display());
/// # Ok(())
/// # }
/// ```
pub async fn download_file(
    url: &str,
    dest_dir: &Path,
    timeout: Duration,
) -> Result<PathBuf, DownloadError> {
    download_file_with(url, dest_dir, &RequestOptions::new().timeout(timeout)).await
}

/// Like [`download_file`], taking the connect timeout and client factory from `options`.
///
/// Only those two settings apply; body, headers, params and credentials are ignored.
///
/// # Errors
///
/// Returns the same errors as [`download_file`].
#[instrument(skip(dest_dir, options), fields(url = %url, dir = %dest_dir.display()))]
pub async fn download_file_with(
    url: &str,
    dest_dir: &Path,
    options: &RequestOptions,
) -> Result<PathBuf, DownloadError> {
    debug!("starting download");

    let parsed_url = Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;
    let file_name = file_name_from_url(&parsed_url).ok_or_else(|| DownloadError::file_name(url))?;
    let file_path = dest_dir.join(file_name);

    let client = options
        .factory()
        .client(options.connect_timeout())
        .map_err(|e| DownloadError::client(url, e))?;
    let response = client
        .get(parsed_url)
        .send()
        .await
        .map_err(|e| DownloadError::from_send(url, e))?;

    let status = response.status().as_u16();
    if status != 200 {
        debug!(status, "refusing non-200 response");
        return Err(DownloadError::not_found(url, status));
    }

    let mut file = File::create(&file_path)
        .await
        .map_err(|e| DownloadError::io(file_path.clone(), e))?;

    match copy_body(response, &mut file, url, &file_path).await {
        Ok(bytes) => {
            info!(path = %file_path.display(), bytes, "download complete");
            Ok(file_path)
        }
        Err(error) => {
            drop(file);
            debug!(path = %file_path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(&file_path).await;
            Err(error)
        }
    }
}

/// Copies the body through a fixed-size window, returning bytes written.
///
/// End of stream is the only clean exit; any read or write error ends the copy.
async fn copy_body(
    response: reqwest::Response,
    file: &mut File,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let stream = response.bytes_stream().map_err(std::io::Error::other);
    let mut reader = StreamReader::new(Box::pin(stream));
    let mut writer = BufWriter::with_capacity(DOWNLOAD_BUFFER_SIZE, file);
    let mut buffer = vec![0_u8; DOWNLOAD_BUFFER_SIZE];
    let mut bytes_written: u64 = 0;

    loop {
        let read = reader
            .read(&mut buffer)
            .await
            .map_err(|e| DownloadError::stream(url, e))?;
        if read == 0 {
            break;
        }
        writer
            .write_all(&buffer[..read])
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;
        bytes_written += read as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
