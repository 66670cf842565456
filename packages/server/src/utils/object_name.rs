use uuid::Uuid;

/// Generate a unique storage name preserving the upload's file extension.
///
/// Unusable extensions (empty, non-alphanumeric, absurdly long) are dropped
/// rather than stored.
pub fn unique_object_name(original: &str) -> String {
    match original.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= 8
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            format!("{}.{}", Uuid::new_v4(), ext.to_ascii_lowercase())
        }
        _ => Uuid::new_v4().to_string(),
    }
}
