//! Access gate for operations that target one existing image

use std::fmt;
use std::sync::Arc;

use crate::error::AuthResult;
use crate::evaluator::OwnershipEvaluator;
use crate::identity::{CallerIdentity, SUBJECT_CLAIM};
use crate::image::ImageId;

/// Why a request was turned away
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DenyReason {
    /// The id token could not be parsed
    MalformedIdentifier,
    /// The caller does not own the image, or it does not exist
    NotOwner,
    /// The caller lacks the entitlement the operation requires
    MissingEntitlement,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::MalformedIdentifier => "malformed identifier",
            DenyReason::NotOwner => "not owner",
            DenyReason::MissingEntitlement => "missing entitlement",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an authorization check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Permit,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_permit(&self) -> bool {
        matches!(self, Decision::Permit)
    }
}

/// Gates read/update/delete on ownership
///
/// Takes the raw id token and caller identity explicitly; holds no
/// per-request state, so one gate serves every request.
#[derive(Clone)]
pub struct AccessGate {
    evaluator: Arc<dyn OwnershipEvaluator>,
    subject_claim: String,
}

impl AccessGate {
    pub fn new(evaluator: Arc<dyn OwnershipEvaluator>) -> Self {
        Self::with_subject_claim(evaluator, SUBJECT_CLAIM)
    }

    /// Gate that reads the subject from a non-default claim type
    pub fn with_subject_claim(
        evaluator: Arc<dyn OwnershipEvaluator>,
        subject_claim: impl Into<String>,
    ) -> Self {
        Self {
            evaluator,
            subject_claim: subject_claim.into(),
        }
    }

    /// Decide whether `identity` may act on the image named by `raw_id`
    ///
    /// A malformed token is denied without consulting the evaluator. Only
    /// evaluator failures are returned as errors.
    pub async fn authorize(&self, raw_id: &str, identity: &CallerIdentity) -> AuthResult<Decision> {
        let Some(id) = ImageId::parse(raw_id) else {
            tracing::debug!(raw_id, "denied: malformed image id");
            return Ok(Decision::Deny(DenyReason::MalformedIdentifier));
        };

        let subject = identity.first(&self.subject_claim);

        if self.evaluator.is_owner(&id, subject).await? {
            Ok(Decision::Permit)
        } else {
            tracing::debug!(image = %id, subject, "denied: not owner");
            Ok(Decision::Deny(DenyReason::NotOwner))
        }
    }
}
