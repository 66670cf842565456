use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use common::storage::validate_object_name;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::config::StorageBackend;
use crate::error::AppError;
use crate::images::{LISTING_IMAGES_BUCKET, TESTIMONIAL_IMAGES_BUCKET};
use crate::state::AppState;

/// Streams a stored image for the filesystem backend. With an S3-compatible
/// backend the public URLs point at the remote gateway and this route is
/// never the origin.
#[instrument(skip(state))]
pub async fn serve_object(
    State(state): State<AppState>,
    Path((bucket, filename)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    if state.config.storage.backend != StorageBackend::Filesystem {
        return Err(AppError::NotFound("Object not found".into()));
    }

    if !matches!(
        bucket.as_str(),
        LISTING_IMAGES_BUCKET | TESTIMONIAL_IMAGES_BUCKET
    ) {
        return Err(AppError::NotFound("Object not found".into()));
    }

    let name = validate_object_name(&filename)
        .map_err(|_| AppError::NotFound("Object not found".into()))?;

    let path = state.config.storage.root.join(&bucket).join(name);
    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound("Object not found".into()));
        }
        Err(e) => return Err(AppError::Internal(format!("IO error: {e}"))),
    };

    let mime = mime_guess::from_path(name).first_or_octet_stream();
    let stream = ReaderStream::new(file);

    Response::builder()
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}
