use std::path::PathBuf;

use async_trait::async_trait;
use rand::Rng;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::error::StorageError;
use super::filename::{generate_media_filename, validate_stored_filename};
use super::traits::{BoxReader, MediaStore, StoredMedia};

/// Filesystem-backed media store.
///
/// Uploads land in `{base_dir}/{unix-millis}-{random}{.ext}`; the directory is
/// expected to be served statically by the HTTP layer.
pub struct DiskMediaStore {
    base_dir: PathBuf,
    max_size: u64,
}

impl DiskMediaStore {
    /// Create a new disk media store, creating the upload directory if needed.
    pub async fn new(base_dir: PathBuf, max_size: u64) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_dir).await?;
        fs::create_dir_all(base_dir.join(".tmp")).await?;
        Ok(Self { base_dir, max_size })
    }

    /// Absolute path of a stored file.
    pub fn media_path(&self, filename: &str) -> Result<PathBuf, StorageError> {
        let name = validate_stored_filename(filename)?;
        Ok(self.base_dir.join(name))
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_dir
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }

    fn fresh_filename(&self, original_name: &str) -> String {
        let now_millis = chrono::Utc::now().timestamp_millis();
        let random: u32 = rand::rng().random_range(0..1_000_000_000);
        generate_media_filename(original_name, now_millis, random)
    }
}

#[async_trait]
impl MediaStore for DiskMediaStore {
    async fn save_stream(
        &self,
        original_name: &str,
        mut reader: BoxReader,
    ) -> Result<StoredMedia, StorageError> {
        let temp_path = self.temp_path();
        let mut temp_file = fs::File::create(&temp_path).await?;

        let mut buf = vec![0u8; 64 * 1024];
        let mut total_bytes: u64 = 0;

        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                break;
            }

            total_bytes += n as u64;
            if total_bytes > self.max_size {
                drop(temp_file);
                let _ = fs::remove_file(&temp_path).await;
                return Err(StorageError::SizeLimitExceeded {
                    actual: total_bytes,
                    limit: self.max_size,
                });
            }

            temp_file.write_all(&buf[..n]).await?;
        }

        temp_file.flush().await?;
        drop(temp_file);

        // The timestamp-random name can collide under extreme concurrency;
        // retry with a fresh name instead of overwriting.
        for _ in 0..3 {
            let filename = self.fresh_filename(original_name);
            let target = self.base_dir.join(&filename);
            if fs::try_exists(&target).await? {
                continue;
            }
            if let Err(e) = fs::rename(&temp_path, &target).await {
                let _ = fs::remove_file(&temp_path).await;
                return Err(e.into());
            }
            tracing::debug!(%filename, size = total_bytes, "stored media file");
            return Ok(StoredMedia {
                filename,
                size: total_bytes,
            });
        }

        let _ = fs::remove_file(&temp_path).await;
        Err(StorageError::InvalidFilename(
            "could not allocate a unique stored filename".into(),
        ))
    }

    async fn exists(&self, filename: &str) -> Result<bool, StorageError> {
        let path = self.media_path(filename)?;
        Ok(fs::try_exists(&path).await?)
    }

    async fn delete(&self, filename: &str) -> Result<bool, StorageError> {
        let path = self.media_path(filename)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
