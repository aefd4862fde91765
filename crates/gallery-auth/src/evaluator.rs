//! Ownership evaluation: does this subject own this image?

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AuthResult;
use crate::image::ImageId;
use crate::store::ImageStore;

/// Answers ownership questions for already-parsed image ids
///
/// A missing image and an image owned by someone else both answer `false`,
/// so callers can't learn whether another tenant's image exists.
#[async_trait]
pub trait OwnershipEvaluator: Send + Sync {
    async fn is_owner(&self, id: &ImageId, subject: Option<&str>) -> AuthResult<bool>;
}

/// Evaluator backed by an [`ImageStore`]
///
/// Reads the store on every call; nothing is cached between requests.
pub struct StoreOwnershipEvaluator {
    store: Arc<dyn ImageStore>,
}

impl StoreOwnershipEvaluator {
    pub fn new(store: Arc<dyn ImageStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OwnershipEvaluator for StoreOwnershipEvaluator {
    async fn is_owner(&self, id: &ImageId, subject: Option<&str>) -> AuthResult<bool> {
        // An absent subject never matches anything
        let Some(subject) = subject else {
            return Ok(false);
        };

        Ok(self
            .store
            .find_by_id(id)
            .await?
            .is_some_and(|image| image.is_owned_by(subject)))
    }
}
