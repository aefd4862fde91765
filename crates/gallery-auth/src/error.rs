//! Auth error types

use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Image not found: {0}")]
    ImageNotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Unknown policy: {0}")]
    UnknownPolicy(String),

    #[error("Storage error: {0}")]
    Store(String),

    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl AuthError {
    /// Lock poisoning surfaces as a store failure rather than a panic
    pub(crate) fn poisoned<T>(_: std::sync::PoisonError<T>) -> Self {
        AuthError::Store("store lock poisoned".into())
    }
}
