//! Permission tuple attached to a (Role, Module) pair.

use serde::{Deserialize, Serialize};

/// What a role may do within a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// May open the module at all.
    pub can_view: bool,
    /// May create records in the module.
    pub can_create: bool,
    /// May edit records in the module.
    pub can_edit: bool,
    /// May delete records in the module.
    pub can_delete: bool,
}

impl Permission {
    /// All four capabilities granted.
    pub const FULL: Permission = Permission::new(true, true, true, true);
    /// View, create, and edit but no delete.
    pub const EDIT: Permission = Permission::new(true, true, true, false);
    /// View and create only.
    pub const CREATE: Permission = Permission::new(true, true, false, false);
    /// Read-only access.
    pub const VIEW: Permission = Permission::new(true, false, false, false);
    /// No access. The fail-closed default for undefined pairs.
    pub const NONE: Permission = Permission::new(false, false, false, false);

    /// Construct a permission from its four flags.
    pub const fn new(can_view: bool, can_create: bool, can_edit: bool, can_delete: bool) -> Self {
        Self {
            can_view,
            can_create,
            can_edit,
            can_delete,
        }
    }
}
