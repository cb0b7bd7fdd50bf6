//! Session-backed identity resolution.

use std::sync::Arc;

use async_trait::async_trait;

use fibra_core::result::AppResult;
use fibra_database::repositories::session::SessionRepository;

use crate::identity::{IdentityResolver, Principal};

/// Resolves bearer tokens against the sessions table.
#[derive(Debug, Clone)]
pub struct SessionIdentityResolver {
    /// Session repository.
    sessions: Arc<SessionRepository>,
}

impl SessionIdentityResolver {
    /// Creates a resolver over the session repository.
    pub fn new(sessions: Arc<SessionRepository>) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl IdentityResolver for SessionIdentityResolver {
    async fn resolve(&self, credential: &str) -> AppResult<Option<Principal>> {
        let row = self.sessions.find_principal_by_token(credential).await?;
        Ok(row.map(|r| Principal::new(r.id, r.role, r.email.unwrap_or_default())))
    }
}
