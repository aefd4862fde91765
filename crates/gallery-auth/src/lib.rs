//! gallery-auth: Per-image ownership authorization
//!
//! Decides whether an authenticated caller may act on one specific image,
//! and persists the image records that decision is made against.
//!
//! ## Features
//!
//! | Feature  | Description                    |
//! |----------|--------------------------------|
//! | (none)   | In-memory backend only         |
//! | `sqlite` | SQLite persistence             |
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gallery_auth::{
//!     AccessGate, CallerIdentity, Decision, InMemoryImageStore, StoreOwnershipEvaluator,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(InMemoryImageStore::new());
//!     let gate = AccessGate::new(Arc::new(StoreOwnershipEvaluator::new(store)));
//!
//!     let caller = CallerIdentity::with_subject("alice");
//!     let decision = gate.authorize("not-a-guid", &caller).await?;
//!     assert!(!decision.is_permit());
//!
//!     Ok(())
//! }
//! ```

mod error;
mod evaluator;
mod gate;
mod identity;
mod image;
mod policy;
mod store;

pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

// Re-exports
pub use error::{AuthError, AuthResult};
pub use evaluator::{OwnershipEvaluator, StoreOwnershipEvaluator};
pub use gate::{AccessGate, Decision, DenyReason};
pub use identity::{CallerIdentity, Claim, ROLE_CLAIM, SUBJECT_CLAIM};
pub use image::{Image, ImageId};
pub use policy::{
    AccessRequest, CAN_CREATE_IMAGES, MUST_OWN_IMAGE, MustOwnImage, PAYING_USER_ROLE, Policy,
    PolicyRegistry, RequireClaim,
};
pub use store::ImageStore;

pub use memory::InMemoryImageStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteImageStore;
