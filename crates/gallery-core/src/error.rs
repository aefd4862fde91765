//! Lifecycle error types

use gallery_auth::{AuthError, DenyReason, ImageId};
use gallery_storage::StorageError;
use thiserror::Error;

pub type LifecycleResult<T> = Result<T, LifecycleError>;

#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A policy turned the request away
    #[error("Access denied: {0}")]
    Denied(DenyReason),

    /// Permitted, but the image was gone by the time we acted
    #[error("Image not found: {0}")]
    NotFound(ImageId),

    /// The caller identity carries no subject claim
    #[error("Caller identity has no subject")]
    MissingSubject,

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Store error: {0}")]
    Auth(#[from] AuthError),

    #[error("Content error: {0}")]
    Content(#[from] StorageError),
}
