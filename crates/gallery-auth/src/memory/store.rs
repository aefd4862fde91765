//! In-memory image store

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{AuthError, AuthResult};
use crate::image::{Image, ImageId};
use crate::store::ImageStore;

/// In-memory image store
///
/// Writes apply immediately, so `commit` has nothing to flush.
#[derive(Default)]
pub struct InMemoryImageStore {
    /// image id -> record
    images: RwLock<HashMap<ImageId, Image>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored images
    pub fn len(&self) -> usize {
        self.images.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn find_by_id(&self, id: &ImageId) -> AuthResult<Option<Image>> {
        let images = self.images.read().map_err(AuthError::poisoned)?;
        Ok(images.get(id).cloned())
    }

    async fn find_by_owner(&self, owner_id: &str) -> AuthResult<Vec<Image>> {
        let images = self.images.read().map_err(AuthError::poisoned)?;
        let mut owned: Vec<Image> = images
            .values()
            .filter(|image| image.is_owned_by(owner_id))
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(owned)
    }

    async fn insert(&self, image: Image) -> AuthResult<()> {
        let mut images = self.images.write().map_err(AuthError::poisoned)?;

        if images.contains_key(&image.id) {
            return Err(AuthError::AlreadyExists(format!("Image {}", image.id)));
        }

        images.insert(image.id, image);
        Ok(())
    }

    async fn update(&self, image: Image) -> AuthResult<()> {
        let mut images = self.images.write().map_err(AuthError::poisoned)?;

        match images.get_mut(&image.id) {
            Some(existing) => {
                // Owner stays as recorded at creation
                existing.title = image.title;
                existing.file_name = image.file_name;
                Ok(())
            }
            None => Err(AuthError::ImageNotFound(image.id.to_string())),
        }
    }

    async fn delete(&self, id: &ImageId) -> AuthResult<()> {
        let mut images = self.images.write().map_err(AuthError::poisoned)?;
        images
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AuthError::ImageNotFound(id.to_string()))
    }

    async fn commit(&self) -> AuthResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = InMemoryImageStore::new();
        let image = Image::new("alice", "a.jpg", "Lighthouse");

        store.insert(image.clone()).await.unwrap();

        assert_eq!(store.find_by_id(&image.id).await.unwrap(), Some(image));
        assert_eq!(store.find_by_id(&ImageId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_conflict() {
        let store = InMemoryImageStore::new();
        let image = Image::new("alice", "a.jpg", "Lighthouse");

        store.insert(image.clone()).await.unwrap();
        let result = store.insert(image).await;

        assert!(matches!(result, Err(AuthError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_find_by_owner() {
        let store = InMemoryImageStore::new();
        store.insert(Image::new("alice", "1.jpg", "B")).await.unwrap();
        store.insert(Image::new("alice", "2.jpg", "A")).await.unwrap();
        store.insert(Image::new("bob", "3.jpg", "C")).await.unwrap();

        let alice: Vec<String> = store
            .find_by_owner("alice")
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(alice, vec!["A", "B"]);
        assert!(store.find_by_owner("ALICE").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_owner() {
        let store = InMemoryImageStore::new();
        let image = Image::new("alice", "a.jpg", "Old");
        store.insert(image.clone()).await.unwrap();

        let mut changed = image.clone();
        changed.title = "New".into();
        changed.owner_id = "mallory".into();
        store.update(changed).await.unwrap();

        let stored = store.find_by_id(&image.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "New");
        assert_eq!(stored.owner_id, "alice");
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = InMemoryImageStore::new();
        let image = Image::new("alice", "a.jpg", "Gone");
        store.insert(image.clone()).await.unwrap();

        store.delete(&image.id).await.unwrap();
        assert!(store.is_empty());

        let result = store.delete(&image.id).await;
        assert!(matches!(result, Err(AuthError::ImageNotFound(_))));
    }
}
