//! The authorization gate.
//!
//! Every privileged operation resolves its caller through one of the
//! `require_*` methods before performing work. Failures are signaling:
//! they propagate to the boundary and map to 401/403 there, and are
//! never swallowed inside business logic.

use std::sync::Arc;

use fibra_core::error::AppError;
use fibra_core::result::AppResult;
use fibra_entity::module::Module;
use fibra_entity::user::Role;

use crate::identity::{IdentityResolver, Principal};
use crate::rbac::can_access;

/// Single choke point for authentication and authorization checks.
#[derive(Debug, Clone)]
pub struct AuthGate {
    /// Session resolution seam.
    resolver: Arc<dyn IdentityResolver>,
}

impl AuthGate {
    /// Creates a gate over the given identity resolver.
    pub fn new(resolver: Arc<dyn IdentityResolver>) -> Self {
        Self { resolver }
    }

    /// Resolves the caller or fails with `Unauthenticated`.
    pub async fn require_authenticated(&self, credential: &str) -> AppResult<Principal> {
        match self.resolver.resolve(credential).await? {
            Some(principal) => Ok(principal),
            None => Err(AppError::unauthenticated("No valid session")),
        }
    }

    /// Resolves the caller and requires view access to the module.
    pub async fn require_module_access(
        &self,
        credential: &str,
        module: Module,
    ) -> AppResult<Principal> {
        let principal = self.require_authenticated(credential).await?;
        Self::ensure_module_access(&principal, module)?;
        Ok(principal)
    }

    /// Resolves the caller and requires membership in one of the roles.
    pub async fn require_any_role(
        &self,
        credential: &str,
        allowed: &[Role],
    ) -> AppResult<Principal> {
        let principal = self.require_authenticated(credential).await?;
        Self::ensure_any_role(&principal, allowed)?;
        Ok(principal)
    }

    /// Checks module access for an already-resolved principal.
    pub fn ensure_module_access(principal: &Principal, module: Module) -> AppResult<()> {
        if can_access(principal.role, module) {
            Ok(())
        } else {
            Err(AppError::unauthorized(format!(
                "Role '{}' may not access module '{module}'",
                principal.role
            )))
        }
    }

    /// Checks role membership for an already-resolved principal.
    pub fn ensure_any_role(principal: &Principal, allowed: &[Role]) -> AppResult<()> {
        if allowed.contains(&principal.role) {
            Ok(())
        } else {
            Err(AppError::unauthorized(format!(
                "Role '{}' is not permitted for this operation",
                principal.role
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fibra_core::error::ErrorKind;
    use uuid::Uuid;

    /// Resolver backed by a fixed token → principal table.
    #[derive(Debug, Default)]
    struct StubResolver {
        sessions: Vec<(String, Principal)>,
    }

    #[async_trait]
    impl IdentityResolver for StubResolver {
        async fn resolve(&self, credential: &str) -> AppResult<Option<Principal>> {
            Ok(self
                .sessions
                .iter()
                .find(|(token, _)| token == credential)
                .map(|(_, p)| p.clone()))
        }
    }

    fn gate_with(role: Role) -> (AuthGate, String) {
        let token = "tok-1".to_string();
        let principal = Principal::new(Uuid::new_v4(), role, "user@fibra.studio");
        let resolver = StubResolver {
            sessions: vec![(token.clone(), principal)],
        };
        (AuthGate::new(Arc::new(resolver)), token)
    }

    #[tokio::test]
    async fn test_unknown_credential_is_unauthenticated() {
        let (gate, _) = gate_with(Role::Sales);
        let err = gate.require_authenticated("nope").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }

    #[tokio::test]
    async fn test_module_denial_is_unauthorized_not_unauthenticated() {
        let (gate, token) = gate_with(Role::Sales);
        let err = gate
            .require_module_access(&token, Module::Settings)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_module_access_granted() {
        let (gate, token) = gate_with(Role::Sales);
        let principal = gate
            .require_module_access(&token, Module::Sales)
            .await
            .unwrap();
        assert_eq!(principal.role, Role::Sales);
    }

    #[tokio::test]
    async fn test_any_role_membership() {
        let (gate, token) = gate_with(Role::Accounting);
        assert!(
            gate.require_any_role(&token, &[Role::Admin, Role::Accounting])
                .await
                .is_ok()
        );
        let err = gate
            .require_any_role(&token, &[Role::Admin, Role::Management])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }
}
