//! Named authorization policies
//!
//! Each operation names the policy it needs; the registry resolves the name
//! to a predicate and evaluates it. Unknown names are an error, never an
//! implicit permit.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{AuthError, AuthResult};
use crate::gate::{AccessGate, Decision, DenyReason};
use crate::identity::{CallerIdentity, ROLE_CLAIM};

/// Caller must own the targeted image
pub const MUST_OWN_IMAGE: &str = "must-own-image";

/// Caller must hold the image-creation entitlement
pub const CAN_CREATE_IMAGES: &str = "can-create-images";

/// Role granting the creation entitlement by default
pub const PAYING_USER_ROLE: &str = "PayingUser";

/// Inputs to a policy check
#[derive(Clone, Copy, Debug)]
pub struct AccessRequest<'a> {
    /// Raw id token of the targeted image, if the operation targets one
    pub resource_id: Option<&'a str>,
    pub identity: &'a CallerIdentity,
}

impl<'a> AccessRequest<'a> {
    pub fn new(identity: &'a CallerIdentity) -> Self {
        Self {
            resource_id: None,
            identity,
        }
    }

    pub fn for_resource(identity: &'a CallerIdentity, resource_id: &'a str) -> Self {
        Self {
            resource_id: Some(resource_id),
            identity,
        }
    }
}

#[async_trait]
pub trait Policy: Send + Sync {
    async fn evaluate(&self, request: &AccessRequest<'_>) -> AuthResult<Decision>;
}

/// Ownership policy: delegates to the [`AccessGate`]
pub struct MustOwnImage {
    gate: AccessGate,
}

impl MustOwnImage {
    pub fn new(gate: AccessGate) -> Self {
        Self { gate }
    }
}

#[async_trait]
impl Policy for MustOwnImage {
    async fn evaluate(&self, request: &AccessRequest<'_>) -> AuthResult<Decision> {
        match request.resource_id {
            Some(raw_id) => self.gate.authorize(raw_id, request.identity).await,
            None => Ok(Decision::Deny(DenyReason::MalformedIdentifier)),
        }
    }
}

/// Entitlement policy: caller must carry a specific claim value
pub struct RequireClaim {
    claim_type: String,
    value: String,
}

impl RequireClaim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }

    pub fn role(role: impl Into<String>) -> Self {
        Self::new(ROLE_CLAIM, role)
    }
}

#[async_trait]
impl Policy for RequireClaim {
    async fn evaluate(&self, request: &AccessRequest<'_>) -> AuthResult<Decision> {
        if request.identity.has_claim(&self.claim_type, &self.value) {
            Ok(Decision::Permit)
        } else {
            tracing::debug!(
                claim_type = %self.claim_type,
                required = %self.value,
                "denied: missing entitlement"
            );
            Ok(Decision::Deny(DenyReason::MissingEntitlement))
        }
    }
}

/// Named-policy registry
#[derive(Default, Clone)]
pub struct PolicyRegistry {
    policies: HashMap<String, Arc<dyn Policy>>,
}

impl PolicyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the gallery's two policies wired up
    pub fn standard(gate: AccessGate, creator: RequireClaim) -> Self {
        let mut registry = Self::new();
        registry.register(MUST_OWN_IMAGE, Arc::new(MustOwnImage::new(gate)));
        registry.register(CAN_CREATE_IMAGES, Arc::new(creator));
        registry
    }

    /// Register (or replace) a policy under `name`
    pub fn register(&mut self, name: impl Into<String>, policy: Arc<dyn Policy>) {
        self.policies.insert(name.into(), policy);
    }

    /// Evaluate the policy registered under `name`
    pub async fn evaluate(&self, name: &str, request: &AccessRequest<'_>) -> AuthResult<Decision> {
        let policy = self
            .policies
            .get(name)
            .ok_or_else(|| AuthError::UnknownPolicy(name.to_string()))?;
        policy.evaluate(request).await
    }
}
