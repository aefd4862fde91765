//! Storage trait definitions

use async_trait::async_trait;

use crate::error::{StorageError, StorageResult};

/// Longest accepted content name
pub const MAX_NAME_LEN: usize = 255;

/// Reject names that could escape the storage root
///
/// Accepts a single path component of ASCII letters, digits, `-`, `_`
/// and `.`, not starting with a dot.
pub fn validate_name(name: &str) -> StorageResult<()> {
    let valid = !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidName(name.to_string()))
    }
}

/// Named blob storage for uploaded image content
///
/// Names are generated by the caller and are unique per upload.
#[async_trait]
pub trait ContentStorage: Send + Sync {
    /// Store content under `name`, replacing anything already there
    ///
    /// Must return an error rather than report success if the bytes were
    /// not durably written.
    async fn put(&self, name: &str, data: &[u8]) -> StorageResult<()>;

    /// Retrieve content by name
    ///
    /// Returns `StorageError::NotFound` if nothing is stored under `name`.
    async fn get(&self, name: &str) -> StorageResult<Vec<u8>>;

    /// Check if content exists
    async fn exists(&self, name: &str) -> StorageResult<bool>;

    /// Delete content
    ///
    /// Returns `Ok(())` even if nothing was stored (idempotent).
    async fn delete(&self, name: &str) -> StorageResult<()>;
}
