//! `AuthUser` extractor — pulls the bearer credential from the
//! Authorization header and resolves it through the auth gate.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use fibra_auth::identity::Principal;
use fibra_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated caller available in handlers.
///
/// Extraction itself only authenticates; handlers add module or role
/// checks through the gate where the operation requires them.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    /// Returns the inner principal.
    pub fn principal(&self) -> &Principal {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthenticated("Missing Authorization header"))
            .map_err(ApiError::from)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthenticated("Invalid Authorization header format"))
            .map_err(ApiError::from)?;

        let principal = state
            .auth_gate
            .require_authenticated(token)
            .await
            .map_err(ApiError::from)?;
        Ok(AuthUser(principal))
    }
}
