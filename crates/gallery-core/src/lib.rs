//! gallery-core: Image lifecycle operations
//!
//! Composes the ownership policies from `gallery-auth` with record and
//! content storage. Create is gated on the creation entitlement; read,
//! update and delete are gated on ownership of the targeted image.

mod error;
mod input;
mod lifecycle;

pub use error::{LifecycleError, LifecycleResult};
pub use input::{DEFAULT_MAX_UPLOAD_BYTES, ImageUpdate, MAX_TITLE_CHARS, NewImage};
pub use lifecycle::ImageService;
