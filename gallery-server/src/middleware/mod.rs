pub mod identity;

pub use identity::{CLAIMS_HEADER, extract_identity, require_identity};
