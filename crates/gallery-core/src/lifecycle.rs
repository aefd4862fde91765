//! Image lifecycle: create, list, read, update, delete
//!
//! Every operation on an existing image runs authorize → locate → act. The
//! ownership policy denies missing and foreign images alike, so `NotFound`
//! is only ever reported to a caller the policy already permitted.

use std::sync::Arc;

use gallery_auth::{
    AccessRequest, AuthError, CAN_CREATE_IMAGES, CallerIdentity, Decision, DenyReason, Image,
    ImageId, ImageStore, MUST_OWN_IMAGE, PolicyRegistry, SUBJECT_CLAIM,
};
use gallery_storage::ContentStorage;
use uuid::Uuid;

use crate::error::{LifecycleError, LifecycleResult};
use crate::input::{DEFAULT_MAX_UPLOAD_BYTES, ImageUpdate, NewImage};

/// Extension given to stored content
const CONTENT_EXTENSION: &str = "jpg";

/// Gated image operations
#[derive(Clone)]
pub struct ImageService {
    store: Arc<dyn ImageStore>,
    content: Arc<dyn ContentStorage>,
    policies: Arc<PolicyRegistry>,
    subject_claim: String,
    max_upload_bytes: usize,
}

impl ImageService {
    pub fn new(
        store: Arc<dyn ImageStore>,
        content: Arc<dyn ContentStorage>,
        policies: Arc<PolicyRegistry>,
    ) -> Self {
        Self {
            store,
            content,
            policies,
            subject_claim: SUBJECT_CLAIM.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Claim type recorded as the owner on create
    pub fn with_subject_claim(mut self, claim_type: impl Into<String>) -> Self {
        self.subject_claim = claim_type.into();
        self
    }

    pub fn with_max_upload_bytes(mut self, max: usize) -> Self {
        self.max_upload_bytes = max;
        self
    }

    fn subject<'a>(&self, identity: &'a CallerIdentity) -> Option<&'a str> {
        identity.first(&self.subject_claim)
    }

    async fn require(&self, policy: &str, request: &AccessRequest<'_>) -> LifecycleResult<()> {
        match self.policies.evaluate(policy, request).await? {
            Decision::Permit => Ok(()),
            Decision::Deny(reason) => Err(LifecycleError::Denied(reason)),
        }
    }

    /// Run the ownership policy and hand back the parsed id
    async fn authorize_owner(
        &self,
        identity: &CallerIdentity,
        raw_id: &str,
    ) -> LifecycleResult<ImageId> {
        self.require(MUST_OWN_IMAGE, &AccessRequest::for_resource(identity, raw_id))
            .await?;
        ImageId::parse(raw_id).ok_or(LifecycleError::Denied(DenyReason::MalformedIdentifier))
    }

    async fn locate(&self, id: ImageId) -> LifecycleResult<Image> {
        self.store
            .find_by_id(&id)
            .await?
            .ok_or(LifecycleError::NotFound(id))
    }

    /// Images owned by the caller
    ///
    /// A caller without a subject owns nothing.
    pub async fn list(&self, identity: &CallerIdentity) -> LifecycleResult<Vec<Image>> {
        match self.subject(identity) {
            Some(subject) => Ok(self.store.find_by_owner(subject).await?),
            None => Ok(Vec::new()),
        }
    }

    /// Store the content and record a new image owned by the caller
    ///
    /// Requires the creation entitlement. Content is written first; if that
    /// fails nothing is recorded.
    pub async fn create(&self, identity: &CallerIdentity, new: NewImage) -> LifecycleResult<Image> {
        self.require(CAN_CREATE_IMAGES, &AccessRequest::new(identity))
            .await?;
        new.validate(self.max_upload_bytes)?;

        let owner_id = self
            .subject(identity)
            .ok_or(LifecycleError::MissingSubject)?
            .to_string();

        let file_name = format!("{}.{CONTENT_EXTENSION}", Uuid::new_v4());
        self.content.put(&file_name, &new.bytes).await?;

        let image = Image {
            id: ImageId::new(),
            owner_id,
            file_name,
            title: new.title,
        };

        if let Err(e) = self.record(image.clone()).await {
            self.discard_content(&image.file_name).await;
            return Err(e.into());
        }

        tracing::info!(image = %image.id, owner = %image.owner_id, "image created");
        Ok(image)
    }

    async fn record(&self, image: Image) -> Result<(), AuthError> {
        self.store.insert(image).await?;
        self.store.commit().await
    }

    /// Fetch one image the caller owns
    pub async fn get(&self, identity: &CallerIdentity, raw_id: &str) -> LifecycleResult<Image> {
        let id = self.authorize_owner(identity, raw_id).await?;
        self.locate(id).await
    }

    /// Apply a title change to an image the caller owns
    ///
    /// Owner and content are never modified here.
    pub async fn update(
        &self,
        identity: &CallerIdentity,
        raw_id: &str,
        update: ImageUpdate,
    ) -> LifecycleResult<Image> {
        let id = self.authorize_owner(identity, raw_id).await?;
        let mut image = self.locate(id).await?;
        update.validate()?;

        image.title = update.title;
        self.store
            .update(image.clone())
            .await
            .map_err(|e| vanished(e, id))?;
        self.store.commit().await?;

        tracing::info!(image = %id, "image updated");
        Ok(image)
    }

    /// Remove an image the caller owns, then its content
    pub async fn delete(&self, identity: &CallerIdentity, raw_id: &str) -> LifecycleResult<()> {
        let id = self.authorize_owner(identity, raw_id).await?;
        let image = self.locate(id).await?;

        self.store.delete(&id).await.map_err(|e| vanished(e, id))?;
        self.store.commit().await?;
        self.discard_content(&image.file_name).await;

        tracing::info!(image = %id, "image deleted");
        Ok(())
    }

    /// Best-effort content removal; the record is already authoritative
    async fn discard_content(&self, file_name: &str) {
        if let Err(e) = self.content.delete(file_name).await {
            tracing::warn!(file_name, error = %e, "failed to remove image content");
        }
    }
}

/// A record removed between locate and act reads as not-found
fn vanished(err: AuthError, id: ImageId) -> LifecycleError {
    match err {
        AuthError::ImageNotFound(_) => LifecycleError::NotFound(id),
        other => LifecycleError::Auth(other),
    }
}
