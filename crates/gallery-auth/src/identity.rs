//! Caller identity: the verified claims attached to a request

use serde::{Deserialize, Serialize};

/// Claim type carrying the caller's stable subject identifier
pub const SUBJECT_CLAIM: &str = "sub";

/// Claim type carrying role entitlements
pub const ROLE_CLAIM: &str = "role";

/// A single verified claim
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    #[serde(rename = "type")]
    pub claim_type: String,
    pub value: String,
    #[serde(default)]
    pub issuer: Option<String>,
}

impl Claim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
            issuer: None,
        }
    }

    pub fn issued_by(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }
}

/// Identity of an already-authenticated caller
///
/// Claims keep the order the credential supplied them in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallerIdentity {
    claims: Vec<Claim>,
}

impl CallerIdentity {
    pub fn new(claims: Vec<Claim>) -> Self {
        Self { claims }
    }

    /// Identity with just a subject claim
    pub fn with_subject(subject: impl Into<String>) -> Self {
        Self::new(vec![Claim::new(SUBJECT_CLAIM, subject)])
    }

    /// Append a role claim
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.claims.push(Claim::new(ROLE_CLAIM, role));
        self
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Value of the first claim of the given type
    pub fn first(&self, claim_type: &str) -> Option<&str> {
        self.claims
            .iter()
            .find(|c| c.claim_type == claim_type)
            .map(|c| c.value.as_str())
    }

    /// Subject under the default claim type
    pub fn subject(&self) -> Option<&str> {
        self.first(SUBJECT_CLAIM)
    }

    pub fn has_claim(&self, claim_type: &str, value: &str) -> bool {
        self.claims
            .iter()
            .any(|c| c.claim_type == claim_type && c.value == value)
    }

    /// Issuers of every claim, in claim order
    pub fn issuers(&self) -> Vec<Option<&str>> {
        self.claims.iter().map(|c| c.issuer.as_deref()).collect()
    }
}
