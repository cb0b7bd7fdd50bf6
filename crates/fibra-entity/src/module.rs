//! Application module (capability domain) enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named areas of the application.
///
/// The set is fixed and closed. Declaration order is the canonical
/// enumeration order used when listing accessible modules or reporting
/// per-module unread counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    /// Landing dashboard.
    Dashboard,
    /// CRM: leads, contacts, quotes.
    Sales,
    /// Projects and milestones.
    Projects,
    /// Task board.
    Tasks,
    /// Team directory and payroll.
    Team,
    /// Supplier management.
    Suppliers,
    /// Accounting transactions.
    Accounting,
    /// Invoices issued and received.
    Invoices,
    /// Finance overview and fixed costs.
    Finance,
    /// Marketing metrics.
    Marketing,
    /// Generated reports.
    Reports,
    /// AI chatbot.
    Chatbot,
    /// Platform settings.
    Settings,
}

impl Module {
    /// Every module, in declaration order.
    pub const ALL: [Module; 13] = [
        Module::Dashboard,
        Module::Sales,
        Module::Projects,
        Module::Tasks,
        Module::Team,
        Module::Suppliers,
        Module::Accounting,
        Module::Invoices,
        Module::Finance,
        Module::Marketing,
        Module::Reports,
        Module::Chatbot,
        Module::Settings,
    ];

    /// Return the module as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Sales => "sales",
            Self::Projects => "projects",
            Self::Tasks => "tasks",
            Self::Team => "team",
            Self::Suppliers => "suppliers",
            Self::Accounting => "accounting",
            Self::Invoices => "invoices",
            Self::Finance => "finance",
            Self::Marketing => "marketing",
            Self::Reports => "reports",
            Self::Chatbot => "chatbot",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
