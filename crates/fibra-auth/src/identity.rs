//! Resolved caller identity and the session-resolution seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fibra_core::result::AppResult;
use fibra_entity::user::Role;

/// The authenticated caller of a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// The user's ID.
    pub id: Uuid,
    /// The user's role at resolution time.
    pub role: Role,
    /// The user's email address (empty string when none is on file).
    pub email: String,
}

impl Principal {
    /// Creates a new principal.
    pub fn new(id: Uuid, role: Role, email: impl Into<String>) -> Self {
        Self {
            id,
            role,
            email: email.into(),
        }
    }
}

/// Resolves an opaque bearer credential into a caller identity.
///
/// Implemented against the session store; the gate treats it as a
/// black box. `Ok(None)` means "no valid session", which the gate
/// turns into an unauthenticated failure.
#[async_trait]
pub trait IdentityResolver: Send + Sync + std::fmt::Debug {
    /// Resolve the credential, returning `None` when no valid session exists.
    async fn resolve(&self, credential: &str) -> AppResult<Option<Principal>>;
}
