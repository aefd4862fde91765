//! Image record persistence

use async_trait::async_trait;

use crate::error::AuthResult;
use crate::image::{Image, ImageId};

/// Persists image records and answers lookups by id and by owner
///
/// Implementations must be safe to share across concurrent requests and
/// must make a write visible to reads issued later in the same operation.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Look up a single image
    async fn find_by_id(&self, id: &ImageId) -> AuthResult<Option<Image>>;

    /// All images recorded for an owner subject (exact match)
    async fn find_by_owner(&self, owner_id: &str) -> AuthResult<Vec<Image>>;

    /// Record a new image
    ///
    /// Returns `AuthError::AlreadyExists` if the id is taken.
    async fn insert(&self, image: Image) -> AuthResult<()>;

    /// Replace the mutable fields of an existing image
    ///
    /// The recorded owner is never changed by this call.
    async fn update(&self, image: Image) -> AuthResult<()>;

    /// Remove an image record
    ///
    /// Returns `AuthError::ImageNotFound` if it does not exist.
    async fn delete(&self, id: &ImageId) -> AuthResult<()>;

    /// Flush pending writes for the current unit of work
    async fn commit(&self) -> AuthResult<()>;
}
