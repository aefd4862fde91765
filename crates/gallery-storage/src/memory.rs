//! In-memory storage backend (for testing)

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{StorageError, StorageResult};
use crate::traits::{ContentStorage, validate_name};

fn poisoned<T>(_: std::sync::PoisonError<T>) -> StorageError {
    StorageError::Backend("content lock poisoned".into())
}

/// In-memory storage for unit tests
///
/// Thread-safe via `RwLock`. Not persistent; data is lost on drop.
#[derive(Default)]
pub struct InMemoryStorage {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs
    pub fn len(&self) -> usize {
        self.blobs.read().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ContentStorage for InMemoryStorage {
    async fn put(&self, name: &str, data: &[u8]) -> StorageResult<()> {
        validate_name(name)?;
        self.blobs
            .write()
            .map_err(poisoned)?
            .insert(name.to_string(), data.to_vec());
        Ok(())
    }

    async fn get(&self, name: &str) -> StorageResult<Vec<u8>> {
        validate_name(name)?;
        self.blobs
            .read()
            .map_err(poisoned)?
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    async fn exists(&self, name: &str) -> StorageResult<bool> {
        validate_name(name)?;
        Ok(self.blobs.read().map_err(poisoned)?.contains_key(name))
    }

    async fn delete(&self, name: &str) -> StorageResult<()> {
        validate_name(name)?;
        self.blobs.write().map_err(poisoned)?.remove(name);
        Ok(())
    }
}
