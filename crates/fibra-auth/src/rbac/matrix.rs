//! The Role × Module permission matrix.
//!
//! Every cell is written out as a match arm; adding a role or a module
//! forces the compiler to demand the missing cells. There is no
//! inheritance between roles, and no wildcard arms outside the two
//! full-access roles.

use fibra_entity::module::Module;
use fibra_entity::permission::Permission;
use fibra_entity::user::Role;

/// Look up the permission for a (role, module) pair.
///
/// Pure function of static data. Cannot fail: the matrix is exhaustive,
/// and explicitly denied cells carry [`Permission::NONE`].
pub fn permission(role: Role, module: Module) -> Permission {
    match role {
        Role::Admin => admin(module),
        Role::Management => management(module),
        Role::Accounting => accounting(module),
        Role::Finance => finance(module),
        Role::Projects => projects(module),
        Role::Marketing => marketing(module),
        Role::Sales => sales(module),
    }
}

/// Shorthand for `permission(role, module).can_view`.
pub fn can_access(role: Role, module: Module) -> bool {
    permission(role, module).can_view
}

/// Modules the role may view, in declaration order.
pub fn accessible_modules(role: Role) -> Vec<Module> {
    Module::ALL
        .into_iter()
        .filter(|m| can_access(role, *m))
        .collect()
}

fn admin(module: Module) -> Permission {
    match module {
        Module::Dashboard => Permission::FULL,
        Module::Sales => Permission::FULL,
        Module::Projects => Permission::FULL,
        Module::Tasks => Permission::FULL,
        Module::Team => Permission::FULL,
        Module::Suppliers => Permission::FULL,
        Module::Accounting => Permission::FULL,
        Module::Invoices => Permission::FULL,
        Module::Finance => Permission::FULL,
        Module::Marketing => Permission::FULL,
        Module::Reports => Permission::FULL,
        Module::Chatbot => Permission::FULL,
        Module::Settings => Permission::FULL,
    }
}

fn management(module: Module) -> Permission {
    match module {
        Module::Dashboard => Permission::FULL,
        Module::Sales => Permission::FULL,
        Module::Projects => Permission::FULL,
        Module::Tasks => Permission::FULL,
        Module::Team => Permission::FULL,
        Module::Suppliers => Permission::FULL,
        Module::Accounting => Permission::FULL,
        Module::Invoices => Permission::FULL,
        Module::Finance => Permission::FULL,
        Module::Marketing => Permission::FULL,
        Module::Reports => Permission::FULL,
        Module::Chatbot => Permission::FULL,
        Module::Settings => Permission::FULL,
    }
}

fn accounting(module: Module) -> Permission {
    match module {
        Module::Dashboard => Permission::VIEW,
        Module::Sales => Permission::NONE,
        Module::Projects => Permission::NONE,
        Module::Tasks => Permission::CREATE,
        Module::Team => Permission::NONE,
        Module::Suppliers => Permission::EDIT,
        Module::Accounting => Permission::EDIT,
        Module::Invoices => Permission::EDIT,
        Module::Finance => Permission::VIEW,
        Module::Marketing => Permission::NONE,
        Module::Reports => Permission::CREATE,
        Module::Chatbot => Permission::CREATE,
        Module::Settings => Permission::NONE,
    }
}

fn finance(module: Module) -> Permission {
    match module {
        Module::Dashboard => Permission::VIEW,
        Module::Sales => Permission::NONE,
        Module::Projects => Permission::VIEW,
        Module::Tasks => Permission::CREATE,
        Module::Team => Permission::NONE,
        Module::Suppliers => Permission::EDIT,
        Module::Accounting => Permission::VIEW,
        Module::Invoices => Permission::CREATE,
        Module::Finance => Permission::EDIT,
        Module::Marketing => Permission::NONE,
        Module::Reports => Permission::CREATE,
        Module::Chatbot => Permission::CREATE,
        Module::Settings => Permission::NONE,
    }
}

fn projects(module: Module) -> Permission {
    match module {
        Module::Dashboard => Permission::VIEW,
        Module::Sales => Permission::VIEW,
        Module::Projects => Permission::EDIT,
        Module::Tasks => Permission::CREATE,
        Module::Team => Permission::NONE,
        Module::Suppliers => Permission::NONE,
        Module::Accounting => Permission::NONE,
        Module::Invoices => Permission::NONE,
        Module::Finance => Permission::NONE,
        Module::Marketing => Permission::NONE,
        Module::Reports => Permission::VIEW,
        Module::Chatbot => Permission::CREATE,
        Module::Settings => Permission::NONE,
    }
}

fn marketing(module: Module) -> Permission {
    match module {
        Module::Dashboard => Permission::VIEW,
        Module::Sales => Permission::VIEW,
        Module::Projects => Permission::VIEW,
        Module::Tasks => Permission::CREATE,
        Module::Team => Permission::NONE,
        Module::Suppliers => Permission::NONE,
        Module::Accounting => Permission::NONE,
        Module::Invoices => Permission::NONE,
        Module::Finance => Permission::NONE,
        Module::Marketing => Permission::EDIT,
        Module::Reports => Permission::VIEW,
        Module::Chatbot => Permission::CREATE,
        Module::Settings => Permission::NONE,
    }
}

fn sales(module: Module) -> Permission {
    match module {
        Module::Dashboard => Permission::VIEW,
        Module::Sales => Permission::EDIT,
        Module::Projects => Permission::VIEW,
        Module::Tasks => Permission::CREATE,
        Module::Team => Permission::NONE,
        Module::Suppliers => Permission::NONE,
        Module::Accounting => Permission::NONE,
        Module::Invoices => Permission::VIEW,
        Module::Finance => Permission::NONE,
        Module::Marketing => Permission::VIEW,
        Module::Reports => Permission::VIEW,
        Module::Chatbot => Permission::CREATE,
        Module::Settings => Permission::NONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denied_cells_are_all_false() {
        let p = permission(Role::Accounting, Module::Marketing);
        assert!(!p.can_view && !p.can_create && !p.can_edit && !p.can_delete);
        assert!(!can_access(Role::Sales, Module::Settings));
        assert!(!can_access(Role::Projects, Module::Accounting));
    }

    #[test]
    fn test_admin_and_management_see_everything() {
        for module in Module::ALL {
            assert_eq!(permission(Role::Admin, module), Permission::FULL);
            assert_eq!(permission(Role::Management, module), Permission::FULL);
        }
        assert_eq!(accessible_modules(Role::Admin).len(), Module::ALL.len());
    }

    #[test]
    fn test_accessible_modules_is_deterministic_and_ordered() {
        let first = accessible_modules(Role::Sales);
        let second = accessible_modules(Role::Sales);
        assert_eq!(first, second);

        // Declaration order of Module::ALL is preserved.
        let mut last_index = 0;
        for m in &first {
            let idx = Module::ALL.iter().position(|x| x == m).unwrap();
            assert!(idx >= last_index);
            last_index = idx;
        }
    }

    #[test]
    fn test_view_does_not_imply_write() {
        let p = permission(Role::Sales, Module::Invoices);
        assert!(p.can_view);
        assert!(!p.can_create && !p.can_edit && !p.can_delete);
    }

    #[test]
    fn test_sales_module_access_by_role() {
        assert!(can_access(Role::Sales, Module::Sales));
        assert!(can_access(Role::Management, Module::Sales));
        assert!(!can_access(Role::Accounting, Module::Sales));
        assert!(!can_access(Role::Finance, Module::Sales));
    }
}
