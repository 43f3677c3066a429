//! Public storage URL resolution for document files.
//!
//! Document rows store either a complete URL or a path relative to the
//! `medical_data` bucket. Resolution is idempotent about the bucket prefix: a
//! stored path that already starts with `medical_data/` is not prefixed
//! again.

use url::Url;

use crate::error::{DirectoryError, DirectoryResult};

/// The bucket documents are served from.
pub const BUCKET: &str = "medical_data";

const PUBLIC_OBJECT_PATH: &str = "storage/v1/object/public";

/// Resolves a stored file path to a public URL under the given storage base.
///
/// - Absolute `http(s)` URLs pass through unchanged.
/// - Relative paths are served from the public object endpoint, rooted under
///   the [`BUCKET`] exactly once.
pub fn resolve_storage_url(base: &Url, file_path: &str) -> DirectoryResult<Url> {
    if file_path.is_empty() {
        return Err(DirectoryError::invalid_url("empty document path"));
    }

    if file_path.starts_with("http://") || file_path.starts_with("https://") {
        return Url::parse(file_path)
            .map_err(|err| DirectoryError::invalid_url(format!("{file_path}: {err}")));
    }

    let clean = file_path.trim_start_matches('/');
    let full = if clean.starts_with(&format!("{BUCKET}/")) {
        format!("{PUBLIC_OBJECT_PATH}/{clean}")
    } else {
        format!("{PUBLIC_OBJECT_PATH}/{BUCKET}/{clean}")
    };

    // Url::join resolves against the parent of the last path segment, so a
    // base of `https://host/api` would lose `api` without a trailing slash.
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(&full)
        .map_err(|err| DirectoryError::invalid_url(format!("{file_path}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://storage.example.com/").unwrap()
    }

    #[test]
    fn test_absolute_urls_pass_through() {
        let resolved = resolve_storage_url(&base(), "https://cdn.example.com/x.png").unwrap();
        assert_eq!(resolved.as_str(), "https://cdn.example.com/x.png");
    }

    #[test]
    fn test_relative_path_gets_bucket_prefix() {
        let resolved = resolve_storage_url(&base(), "scans/foot.png").unwrap();
        assert_eq!(
            resolved.as_str(),
            "https://storage.example.com/storage/v1/object/public/medical_data/scans/foot.png"
        );
    }

    #[test]
    fn test_bucket_prefix_is_not_doubled() {
        let resolved = resolve_storage_url(&base(), "medical_data/scans/foot.png").unwrap();
        assert_eq!(
            resolved.as_str(),
            "https://storage.example.com/storage/v1/object/public/medical_data/scans/foot.png"
        );
    }

    #[test]
    fn test_leading_slash_is_trimmed() {
        let resolved = resolve_storage_url(&base(), "/report.pdf").unwrap();
        assert_eq!(
            resolved.as_str(),
            "https://storage.example.com/storage/v1/object/public/medical_data/report.pdf"
        );
    }

    #[test]
    fn test_base_path_without_trailing_slash_is_kept() {
        let base = Url::parse("https://storage.example.com/api").unwrap();
        let resolved = resolve_storage_url(&base, "scans/foot.png").unwrap();
        assert_eq!(
            resolved.as_str(),
            "https://storage.example.com/api/storage/v1/object/public/medical_data/scans/foot.png"
        );
    }

    #[test]
    fn test_empty_path_is_rejected() {
        assert!(resolve_storage_url(&base(), "").is_err());
    }
}
