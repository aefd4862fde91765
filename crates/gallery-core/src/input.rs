//! Validated inputs for create and update

use crate::error::{LifecycleError, LifecycleResult};

/// Longest accepted title, in characters
pub const MAX_TITLE_CHARS: usize = 150;

/// Default upload limit (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

fn validate_title(title: &str) -> LifecycleResult<()> {
    if title.trim().is_empty() {
        return Err(LifecycleError::Invalid("title is required".into()));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(LifecycleError::Invalid(format!(
            "title must be at most {MAX_TITLE_CHARS} characters"
        )));
    }
    Ok(())
}

/// A new image: title plus raw content bytes
#[derive(Clone, Debug)]
pub struct NewImage {
    pub title: String,
    pub bytes: Vec<u8>,
}

impl NewImage {
    pub fn new(title: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            title: title.into(),
            bytes: bytes.into(),
        }
    }

    pub(crate) fn validate(&self, max_bytes: usize) -> LifecycleResult<()> {
        validate_title(&self.title)?;
        if self.bytes.is_empty() {
            return Err(LifecycleError::Invalid("image content is required".into()));
        }
        if self.bytes.len() > max_bytes {
            return Err(LifecycleError::Invalid(format!(
                "image content exceeds {max_bytes} bytes"
            )));
        }
        Ok(())
    }
}

/// Fields an owner may change on an existing image
#[derive(Clone, Debug)]
pub struct ImageUpdate {
    pub title: String,
}

impl ImageUpdate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub(crate) fn validate(&self) -> LifecycleResult<()> {
        validate_title(&self.title)
    }
}
