mod error;
mod object_url;
mod traits;

pub mod filesystem;
#[cfg(feature = "object-storage")]
pub mod s3;

pub use error::{RemoveFailure, StorageError};
pub use object_url::{filename_from_url, join_public_url, validate_object_name};
pub use traits::BlobStore;
