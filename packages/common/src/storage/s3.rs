use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use url::Url;

use super::error::StorageError;
use super::object_url::{join_public_url, validate_object_name};
use super::traits::BlobStore;

/// Blob store backed by an S3-compatible object storage service.
///
/// Each logical bucket maps to a bucket of the same name on the remote
/// service. Public URLs are derived from a configured base rather than the
/// API endpoint, so a CDN or public gateway can front the bucket.
pub struct S3BlobStore {
    region: Region,
    credentials: Credentials,
    public_base: Url,
}

impl S3BlobStore {
    pub fn new(
        endpoint: String,
        region: String,
        access_key: &str,
        secret_key: &str,
        public_base: Url,
    ) -> Result<Self, StorageError> {
        let credentials = Credentials::new(Some(access_key), Some(secret_key), None, None, None)
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        Ok(Self {
            region: Region::Custom { region, endpoint },
            credentials,
            public_base,
        })
    }

    fn bucket(&self, name: &str) -> Result<Box<Bucket>, StorageError> {
        let bucket = Bucket::new(name, self.region.clone(), self.credentials.clone())
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(bucket.with_path_style())
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(
        &self,
        bucket: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError> {
        let filename = validate_object_name(filename)?;

        let response = self
            .bucket(bucket)?
            .put_object(filename, bytes)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        if response.status_code() != 200 {
            return Err(StorageError::Backend(format!(
                "put of '{filename}' returned status {}",
                response.status_code()
            )));
        }

        Ok(filename.to_string())
    }

    fn public_url(&self, bucket: &str, filename: &str) -> String {
        join_public_url(&self.public_base, bucket, filename)
    }

    async fn delete(&self, bucket: &str, filename: &str) -> Result<bool, StorageError> {
        let filename = validate_object_name(filename)?;

        let response = self
            .bucket(bucket)?
            .delete_object(filename)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        match response.status_code() {
            200 | 204 => Ok(true),
            404 => Ok(false),
            status => Err(StorageError::Backend(format!(
                "delete of '{filename}' returned status {status}"
            ))),
        }
    }

    fn public_base(&self) -> &Url {
        &self.public_base
    }
}
