//! Image set reconciliation for mutations on image-bearing records.
//!
//! Every create/update/approve flow follows the same sequence: upload the new
//! files, compute the final image set, persist the row, then delete whatever
//! the row no longer references. Orphan deletion happens strictly after the
//! row write has committed, so a live record never points at a blob that was
//! just removed.

use common::storage::{BlobStore, filename_from_url};
use tracing::warn;

use crate::error::AppError;
use crate::utils::object_name::unique_object_name;

/// Bucket holding listing and submission photos.
pub const LISTING_IMAGES_BUCKET: &str = "listings-images";
/// Bucket holding testimonial photos.
pub const TESTIMONIAL_IMAGES_BUCKET: &str = "testimonials-images";

/// A file received from a multipart form.
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Outcome of reconciling a record's image set.
#[derive(Debug, PartialEq, Eq)]
pub struct ImageSetPlan {
    /// URLs the record must reference after the mutation, in order.
    pub final_urls: Vec<String>,
    /// Previously referenced URLs that no longer appear in `final_urls`.
    pub orphaned_urls: Vec<String>,
}

/// Compute the final image set and its orphans.
///
/// `final_urls` is `kept_urls` (client order) followed by `uploaded_urls`
/// (upload-call order). A URL present in `final_urls` is never orphaned even
/// if it also appears in `original_urls`, and each orphan appears exactly
/// once.
pub fn reconcile(
    original_urls: &[String],
    kept_urls: &[String],
    uploaded_urls: Vec<String>,
) -> ImageSetPlan {
    let mut final_urls = Vec::with_capacity(kept_urls.len() + uploaded_urls.len());
    final_urls.extend(kept_urls.iter().cloned());
    final_urls.extend(uploaded_urls);

    let mut orphaned_urls: Vec<String> = Vec::new();
    for url in original_urls {
        if !final_urls.contains(url) && !orphaned_urls.contains(url) {
            orphaned_urls.push(url.clone());
        }
    }

    ImageSetPlan {
        final_urls,
        orphaned_urls,
    }
}

/// Outcome of reconciling a record's single optional image.
#[derive(Debug, PartialEq, Eq)]
pub struct SingleImagePlan {
    pub final_url: Option<String>,
    pub orphaned_urls: Vec<String>,
}

/// Single-image variant used by testimonials.
///
/// A fresh upload supersedes both the original and the kept value; otherwise
/// the kept value (possibly cleared) wins. The original is orphaned only when
/// it is set and differs from the final value.
pub fn reconcile_single(
    original: Option<&str>,
    kept: Option<&str>,
    uploaded: Option<String>,
) -> SingleImagePlan {
    let final_url = uploaded.or_else(|| kept.map(str::to_string));

    let orphaned_urls = match original {
        Some(orig) if final_url.as_deref() != Some(orig) => vec![orig.to_string()],
        _ => Vec::new(),
    };

    SingleImagePlan {
        final_url,
        orphaned_urls,
    }
}

/// Upload form files one at a time, returning public URLs in upload order.
///
/// Zero-byte files mean "no file chosen" and are skipped without a storage
/// call. The first failure aborts the whole mutation; files stored before it
/// stay behind as logged orphans for a later sweep.
pub async fn upload_images(
    store: &dyn BlobStore,
    bucket: &str,
    files: &[ImageUpload],
) -> Result<Vec<String>, AppError> {
    let mut urls = Vec::new();
    for file in files {
        if file.bytes.is_empty() {
            continue;
        }

        let name = unique_object_name(&file.filename);
        let path = store.put(bucket, &name, &file.bytes).await.map_err(|e| {
            warn!(filename = %file.filename, error = %e, "image upload failed, aborting mutation");
            AppError::Upload(format!("Failed to store '{}': {e}", file.filename))
        })?;

        urls.push(store.public_url(bucket, &path));
    }
    Ok(urls)
}

/// Best-effort removal of orphaned image URLs after the row write committed.
///
/// URLs not rooted at the configured storage origin are skipped, never
/// deleted. Failures are logged and do not propagate; the row is already
/// correct and a leaked blob is the lesser problem.
pub async fn delete_images(store: &dyn BlobStore, bucket: &str, urls: &[String]) {
    let filenames: Vec<String> = urls
        .iter()
        .filter_map(|url| {
            let name = filename_from_url(url, store.public_base(), bucket);
            if name.is_none() {
                warn!(url, "skipping deletion of URL outside the storage origin");
            }
            name
        })
        .collect();

    if filenames.is_empty() {
        return;
    }

    for failure in store.remove(bucket, &filenames).await {
        warn!(
            filename = %failure.filename,
            error = %failure.error,
            "failed to delete orphaned image"
        );
    }
}
