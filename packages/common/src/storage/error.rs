use thiserror::Error;

/// Errors that can occur during blob storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested object was not found.
    #[error("object not found: {0}")]
    NotFound(String),

    /// An I/O error occurred.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The object name is empty, contains path components, or is otherwise
    /// unsafe to store.
    #[error("invalid object name: {0}")]
    InvalidObjectName(String),

    /// The object exceeds the configured size limit.
    #[error("object exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },

    /// The remote storage backend rejected the request.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A single failed deletion within a batch [`remove`](super::BlobStore::remove) call.
#[derive(Debug)]
pub struct RemoveFailure {
    pub filename: String,
    pub error: StorageError,
}
