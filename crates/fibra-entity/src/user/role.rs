//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the access control system.
///
/// A user's role is immutable for the duration of a request; it changes
/// only through an explicit user-update operation by an authorized actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full platform administrator.
    Admin,
    /// Studio management; full access to every area.
    Management,
    /// Accounting team.
    Accounting,
    /// Finance team.
    Finance,
    /// Project management team.
    Projects,
    /// Marketing team.
    Marketing,
    /// Sales / CRM team.
    Sales,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 7] = [
        Role::Admin,
        Role::Management,
        Role::Accounting,
        Role::Finance,
        Role::Projects,
        Role::Marketing,
        Role::Sales,
    ];

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Management => "management",
            Self::Accounting => "accounting",
            Self::Finance => "finance",
            Self::Projects => "projects",
            Self::Marketing => "marketing",
            Self::Sales => "sales",
        }
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = fibra_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "management" => Ok(Self::Management),
            "accounting" => Ok(Self::Accounting),
            "finance" => Ok(Self::Finance),
            "projects" => Ok(Self::Projects),
            "marketing" => Ok(Self::Marketing),
            "sales" => Ok(Self::Sales),
            _ => Err(fibra_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, management, accounting, finance, projects, marketing, sales"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("SALES".parse::<Role>().unwrap(), Role::Sales);
        assert!("intern".parse::<Role>().is_err());
    }

    #[test]
    fn test_all_covers_every_role() {
        assert_eq!(Role::ALL.len(), 7);
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }
}
