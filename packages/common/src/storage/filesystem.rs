use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use url::Url;

use super::error::StorageError;
use super::object_url::{join_public_url, validate_object_name};
use super::traits::BlobStore;

/// Filesystem-backed blob store.
///
/// Objects are stored as `{root}/{bucket}/{filename}`; bucket directories are
/// created on first write. Public URLs are derived from a configured base.
pub struct FilesystemBlobStore {
    root: PathBuf,
    public_base: Url,
    max_size: u64,
}

impl FilesystemBlobStore {
    /// Create a new filesystem blob store rooted at `root`.
    pub async fn new(
        root: PathBuf,
        public_base: Url,
        max_size: u64,
    ) -> Result<Self, StorageError> {
        fs::create_dir_all(&root).await?;
        fs::create_dir_all(root.join(".tmp")).await?;
        Ok(Self {
            root,
            public_base,
            max_size,
        })
    }

    fn object_path(&self, bucket: &str, filename: &str) -> PathBuf {
        self.root.join(bucket).join(filename)
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.root.join(".tmp").join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn put(
        &self,
        bucket: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError> {
        let filename = validate_object_name(filename)?;

        if bytes.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: bytes.len() as u64,
                limit: self.max_size,
            });
        }

        let object_path = self.object_path(bucket, filename);
        if let Some(parent) = object_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &object_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(filename.to_string())
    }

    fn public_url(&self, bucket: &str, filename: &str) -> String {
        join_public_url(&self.public_base, bucket, filename)
    }

    async fn delete(&self, bucket: &str, filename: &str) -> Result<bool, StorageError> {
        let filename = validate_object_name(filename)?;
        match fs::remove_file(self.object_path(bucket, filename)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn public_base(&self) -> &Url {
        &self.public_base
    }
}
