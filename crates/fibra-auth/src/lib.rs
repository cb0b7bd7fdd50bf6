//! # fibra-auth
//!
//! Authorization for the Fibra Core platform.
//!
//! ## Modules
//!
//! - `rbac` — the static Role × Module permission matrix
//! - `identity` — the resolved caller principal and the session-resolution seam
//! - `session` — the database-backed identity resolver
//! - `gate` — the single authorization choke point every privileged
//!   operation passes through

pub mod gate;
pub mod identity;
pub mod rbac;
pub mod session;

pub use gate::AuthGate;
pub use identity::{IdentityResolver, Principal};
pub use session::SessionIdentityResolver;
pub use rbac::{accessible_modules, can_access, permission};
