use thiserror::Error;

/// Errors that can occur while storing or serving uploaded media.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested file does not exist in the store.
    #[error("media file not found: {0}")]
    NotFound(String),

    /// The supplied filename is empty, contains path separators, or traverses
    /// out of the upload directory.
    #[error("invalid filename: {0}")]
    InvalidFilename(String),

    /// The upload exceeds the configured size limit.
    #[error("upload exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
}
