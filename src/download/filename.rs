//! Destination file naming for downloads.

use std::path::{Component, Path};

use tracing::debug;
use url::Url;

/// Derives the destination file name from the last path segment of `url`.
///
/// The segment is percent-decoded. Returns `None` when the segment is empty
/// (`https://host/` or `https://host/dir/`), or when the decoded name would
/// escape the destination directory (`..`, `.`, separators, absolute paths).
pub(crate) fn file_name_from_url(url: &Url) -> Option<String> {
    let last = url.path_segments()?.next_back()?;
    if last.is_empty() {
        return None;
    }

    let decoded = urlencoding::decode(last).map_or_else(
        |e| {
            debug!(segment = %last, error = %e, "URL decoding failed, using raw segment");
            last.to_string()
        },
        std::borrow::Cow::into_owned,
    );

    is_plain_file_name(&decoded).then_some(decoded)
}

fn is_plain_file_name(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\', '\0']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn name_for(url: &str) -> Option<String> {
        file_name_from_url(&Url::parse(url).unwrap())
    }

    #[test]
    fn test_last_segment_is_used() {
        assert_eq!(name_for("https://example.com/a/b/report.pdf").as_deref(), Some("report.pdf"));
        assert_eq!(name_for("https://example.com/data.bin?x=1#frag").as_deref(), Some("data.bin"));
    }

    #[test]
    fn test_segment_is_percent_decoded() {
        assert_eq!(
            name_for("https://example.com/my%20file.txt").as_deref(),
            Some("my file.txt")
        );
    }

    #[test]
    fn test_empty_segment_is_rejected() {
        assert_eq!(name_for("https://example.com"), None);
        assert_eq!(name_for("https://example.com/"), None);
        assert_eq!(name_for("https://example.com/dir/"), None);
    }

    #[test]
    fn test_traversal_names_are_rejected() {
        assert_eq!(name_for("https://example.com/a/%2E%2E"), None);
        assert_eq!(name_for("https://example.com/a/..%2Fetc%2Fpasswd"), None);
        assert_eq!(name_for("https://example.com/a/x%5Cy"), None);
    }

    #[test]
    fn test_non_http_url_without_segments() {
        assert_eq!(name_for("mailto:someone@example.com"), None);
    }
}
