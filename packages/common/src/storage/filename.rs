use super::error::StorageError;

/// Maximum length of a preserved file extension, dot excluded.
const MAX_EXTENSION_LEN: usize = 10;

/// Extracts the extension (without the dot) from an uploaded filename.
///
/// Only plain alphanumeric extensions are preserved; anything else is treated
/// as if the file had no extension at all, so a hostile original name can
/// never smuggle separators or control characters into the stored name.
pub fn file_extension(original_name: &str) -> Option<&str> {
    let (_, ext) = original_name.rsplit_once('.')?;
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext)
}

/// Generates a unique stored filename preserving the original extension.
///
/// Format: `{unix-millis}-{random}` plus the extension, e.g.
/// `1724569200123-482930175.png`.
pub fn generate_media_filename(original_name: &str, now_millis: i64, random: u32) -> String {
    match file_extension(original_name) {
        Some(ext) => format!("{now_millis}-{random}.{ext}"),
        None => format!("{now_millis}-{random}"),
    }
}

/// Validates a stored filename before it is used to address a file on disk.
///
/// Stored names are always flat: no separators, no traversal, no hidden
/// files, no control characters.
pub fn validate_stored_filename(filename: &str) -> Result<&str, StorageError> {
    let name = filename.trim();

    if name.is_empty() {
        return Err(StorageError::InvalidFilename("empty".into()));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(StorageError::InvalidFilename(
            "path separators are not allowed".into(),
        ));
    }
    if name == ".." || name.starts_with('.') {
        return Err(StorageError::InvalidFilename(
            "hidden or traversal names are not allowed".into(),
        ));
    }
    if name.chars().any(|c| c.is_ascii_control()) {
        return Err(StorageError::InvalidFilename(
            "control characters are not allowed".into(),
        ));
    }

    Ok(name)
}
