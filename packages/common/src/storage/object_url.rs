use url::Url;

use super::error::StorageError;

/// Validates an object name for storage (no directory components allowed).
pub fn validate_object_name(name: &str) -> Result<&str, StorageError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(StorageError::InvalidObjectName(
            "name cannot be empty".into(),
        ));
    }

    if trimmed.contains('\0') || trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(StorageError::InvalidObjectName(
            "name must not contain control characters".into(),
        ));
    }

    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(StorageError::InvalidObjectName(
            "name must not contain path separators".into(),
        ));
    }

    if trimmed == ".." || trimmed.starts_with('.') {
        return Err(StorageError::InvalidObjectName(
            "name must not start with '.'".into(),
        ));
    }

    Ok(trimmed)
}

/// Join base URL, bucket, and filename into a public object URL.
pub fn join_public_url(base: &Url, bucket: &str, filename: &str) -> String {
    format!(
        "{}/{}/{}",
        base.as_str().trim_end_matches('/'),
        bucket,
        filename
    )
}

/// Recover the stored filename from a public object URL.
///
/// Returns `None` for URLs that are not rooted at `base` or that lack the
/// `/{bucket}/` path segment. Foreign URLs that ended up in an images column
/// must be skipped, never deleted.
pub fn filename_from_url(url: &str, base: &Url, bucket: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    if parsed.host_str() != base.host_str() {
        return None;
    }

    let marker = format!("/{bucket}/");
    let path = parsed.path();
    let idx = path.find(&marker)?;
    let name = &path[idx + marker.len()..];

    if name.is_empty() || name.contains('/') {
        return None;
    }

    Some(name.to_string())
}
