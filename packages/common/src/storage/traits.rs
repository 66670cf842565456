use async_trait::async_trait;
use url::Url;

use super::error::{RemoveFailure, StorageError};

/// Bucket-partitioned blob storage with durable public URLs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under `filename` in `bucket` and return the stored path.
    async fn put(
        &self,
        bucket: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError>;

    /// Public URL for a stored object. Pure derivation, never fails.
    fn public_url(&self, bucket: &str, filename: &str) -> String;

    /// Delete one object.
    ///
    /// Returns `true` if the object was deleted, `false` if it did not exist.
    async fn delete(&self, bucket: &str, filename: &str) -> Result<bool, StorageError>;

    /// Delete a batch of objects. Failures are reported per file; the caller
    /// decides whether any of them is fatal.
    async fn remove(&self, bucket: &str, filenames: &[String]) -> Vec<RemoveFailure> {
        let mut failures = Vec::new();
        for name in filenames {
            if let Err(error) = self.delete(bucket, name).await {
                failures.push(RemoveFailure {
                    filename: name.clone(),
                    error,
                });
            }
        }
        failures
    }

    /// Base URL all public object URLs are rooted under.
    fn public_base(&self) -> &Url;
}
