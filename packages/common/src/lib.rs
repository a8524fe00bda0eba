pub mod storage;

pub use storage::{DiskMediaStore, MediaStore, StorageError, StoredMedia};
