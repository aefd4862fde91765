//! gallery-storage: Content storage for uploaded images
//!
//! Provides async storage backends for image bytes, keyed by a generated
//! file name. No authorization logic; that lives in `gallery-auth`.
//!
//! ## Backends
//!
//! | Backend            | Use Case              |
//! |--------------------|-----------------------|
//! | `InMemoryStorage`  | Unit tests            |
//! | `LocalFileStorage` | Single-node serving   |
//!
//! ## Example
//!
//! ```rust,ignore
//! use gallery_storage::{ContentStorage, InMemoryStorage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let storage = InMemoryStorage::new();
//!
//!     storage.put("sunset.jpg", b"...").await?;
//!     let retrieved = storage.get("sunset.jpg").await?;
//!     assert_eq!(retrieved, b"...");
//!
//!     Ok(())
//! }
//! ```

mod error;
mod traits;

mod local;
mod memory;

// Re-exports
pub use error::{StorageError, StorageResult};
pub use traits::{ContentStorage, MAX_NAME_LEN, validate_name};

pub use local::LocalFileStorage;
pub use memory::InMemoryStorage;
