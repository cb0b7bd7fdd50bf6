//! Read-side routing of notification types to application modules.
//!
//! Used to aggregate unread counts for module badges. A single unread
//! notification increments the counter of every module in its type's set.

use serde::Serialize;

use fibra_entity::module::Module;

/// Map a notification type to the modules it is relevant to.
///
/// The sets are static and non-empty; unrecognized types fall back to the
/// dashboard.
pub fn modules_for_type(kind: &str) -> &'static [Module] {
    match kind {
        "new_lead" | "quote_update" | "contact_data_missing" => {
            &[Module::Sales, Module::Dashboard]
        }
        "project_update" | "project_data_missing" => &[Module::Projects, Module::Dashboard],
        "task_due" => &[
            Module::Tasks,
            Module::Projects,
            Module::Team,
            Module::Dashboard,
        ],
        "invoice_update" | "invoice_overdue" => &[
            Module::Accounting,
            Module::Invoices,
            Module::Finance,
            Module::Dashboard,
        ],
        "finance_update" => &[Module::Finance, Module::Accounting, Module::Dashboard],
        "milestone_billing_due" => &[
            Module::Projects,
            Module::Accounting,
            Module::Finance,
            Module::Dashboard,
        ],
        "report_ready" => &[Module::Reports, Module::Dashboard],
        _ => &[Module::Dashboard],
    }
}

/// Unread count for one module.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ModuleUnread {
    /// The module.
    pub module: Module,
    /// Unread notifications relevant to it.
    pub unread: u64,
}

/// Per-module unread aggregation for badge display.
#[derive(Debug, Clone, Serialize)]
pub struct UnreadSummary {
    /// Total unread notifications for the user.
    pub total_unread: u64,
    /// Per-module counters, in module declaration order. Every module is
    /// present, zeroes included.
    pub by_module: Vec<ModuleUnread>,
}

impl UnreadSummary {
    /// Tally the type tags of a user's unread notifications.
    pub fn tally<S: AsRef<str>>(kinds: &[S]) -> Self {
        let mut counters = [0u64; Module::ALL.len()];

        for kind in kinds {
            for module in modules_for_type(kind.as_ref()) {
                let idx = Module::ALL.iter().position(|m| m == module).unwrap();
                counters[idx] += 1;
            }
        }

        Self {
            total_unread: kinds.len() as u64,
            by_module: Module::ALL
                .into_iter()
                .zip(counters)
                .map(|(module, unread)| ModuleUnread { module, unread })
                .collect(),
        }
    }

    /// The counter for one module.
    pub fn unread_for(&self, module: Module) -> u64 {
        self.by_module
            .iter()
            .find(|m| m.module == module)
            .map(|m| m.unread)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_due_routes_to_four_modules() {
        assert_eq!(
            modules_for_type("task_due"),
            &[
                Module::Tasks,
                Module::Projects,
                Module::Team,
                Module::Dashboard
            ]
        );
    }

    #[test]
    fn test_unknown_type_defaults_to_dashboard() {
        assert_eq!(modules_for_type("totally_new_event"), &[Module::Dashboard]);
        assert_eq!(modules_for_type(""), &[Module::Dashboard]);
    }

    #[test]
    fn test_every_known_type_includes_dashboard() {
        for kind in [
            "new_lead",
            "quote_update",
            "contact_data_missing",
            "project_update",
            "project_data_missing",
            "task_due",
            "invoice_update",
            "invoice_overdue",
            "finance_update",
            "milestone_billing_due",
            "report_ready",
        ] {
            assert!(
                modules_for_type(kind).contains(&Module::Dashboard),
                "{kind} set is missing the dashboard"
            );
        }
    }

    #[test]
    fn test_tally_increments_every_module_in_the_set() {
        let summary = UnreadSummary::tally(&["task_due", "new_lead", "unknown"]);
        assert_eq!(summary.total_unread, 3);
        // task_due + new_lead + unknown all touch the dashboard.
        assert_eq!(summary.unread_for(Module::Dashboard), 3);
        assert_eq!(summary.unread_for(Module::Tasks), 1);
        assert_eq!(summary.unread_for(Module::Projects), 1);
        assert_eq!(summary.unread_for(Module::Sales), 1);
        assert_eq!(summary.unread_for(Module::Settings), 0);
    }

    #[test]
    fn test_tally_lists_all_modules_in_order() {
        let summary = UnreadSummary::tally::<&str>(&[]);
        assert_eq!(summary.by_module.len(), Module::ALL.len());
        let order: Vec<Module> = summary.by_module.iter().map(|m| m.module).collect();
        assert_eq!(order, Module::ALL.to_vec());
    }
}
