mod disk;
mod error;
mod filename;
mod traits;

pub use disk::DiskMediaStore;
pub use error::StorageError;
pub use filename::{file_extension, generate_media_filename};
pub use traits::{BoxReader, MediaStore, StoredMedia};
