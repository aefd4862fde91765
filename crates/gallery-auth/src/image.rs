//! Image records and their identifiers

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Globally unique image identifier
///
/// Assigned once at creation and never reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(Uuid);

impl ImageId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a raw token (e.g. a path segment)
    ///
    /// Returns `None` for anything that is not a UUID.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }
}

impl Default for ImageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageId({})", self.0)
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ImageId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// A stored image record
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pub id: ImageId,
    /// Subject of the caller that created the image; never changes
    pub owner_id: String,
    /// Name the content was stored under
    pub file_name: String,
    pub title: String,
}

impl Image {
    pub fn new(
        owner_id: impl Into<String>,
        file_name: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: ImageId::new(),
            owner_id: owner_id.into(),
            file_name: file_name.into(),
            title: title.into(),
        }
    }

    /// Exact, case-sensitive owner comparison
    pub fn is_owned_by(&self, subject: &str) -> bool {
        self.owner_id == subject
    }
}
