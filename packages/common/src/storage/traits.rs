use std::io::Cursor;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::error::StorageError;

/// Type alias for a boxed async reader.
pub type BoxReader = Box<dyn AsyncRead + Unpin + Send>;

/// A stored media file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Generated unique filename under the upload directory.
    pub filename: String,
    /// Size in bytes.
    pub size: u64,
}

/// Storage for uploaded media files (question images, answer videos).
///
/// Files are stored flat under a single directory, each under a generated
/// unique name that preserves the original extension.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store raw bytes, returning the generated filename.
    async fn save(&self, original_name: &str, data: &[u8]) -> Result<StoredMedia, StorageError> {
        let reader: BoxReader = Box::new(Cursor::new(data.to_vec()));
        self.save_stream(original_name, reader).await
    }

    /// Store data from an async reader, returning the generated filename.
    async fn save_stream(
        &self,
        original_name: &str,
        reader: BoxReader,
    ) -> Result<StoredMedia, StorageError>;

    /// Check whether a stored file exists.
    async fn exists(&self, filename: &str) -> Result<bool, StorageError>;

    /// Delete a stored file.
    ///
    /// Returns `true` if the file was deleted, `false` if it did not exist.
    async fn delete(&self, filename: &str) -> Result<bool, StorageError>;
}
