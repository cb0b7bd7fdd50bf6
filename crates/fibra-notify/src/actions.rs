//! Suggested follow-up actions for a notification.
//!
//! Combines paths detected inside the message text with per-type
//! shortcuts and a dashboard fallback, deduplicated by target.

use serde::Serialize;

/// A suggested link shown next to a notification.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NotificationAction {
    /// Link label.
    pub label: String,
    /// Application path.
    pub href: String,
    /// Optional explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NotificationAction {
    fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
            description: None,
        }
    }
}

/// Extract unique application paths embedded in the message.
///
/// A path starts with a single `/` and continues with alphanumerics,
/// `/`, `_`, or `-`. Protocol-relative `//` prefixes are rejected.
fn paths_in_message(message: &str) -> Vec<String> {
    let bytes = message.as_bytes();
    let mut paths: Vec<String> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'/' {
            let start = i;
            let mut end = i + 1;
            while end < bytes.len()
                && (bytes[end].is_ascii_alphanumeric()
                    || bytes[end] == b'/'
                    || bytes[end] == b'_'
                    || bytes[end] == b'-')
            {
                end += 1;
            }
            let candidate = &message[start..end];
            if candidate.len() > 1
                && !candidate.starts_with("//")
                && !paths.contains(&candidate.to_string())
            {
                paths.push(candidate.to_string());
            }
            i = end;
        } else {
            i += 1;
        }
    }

    paths
}

/// Build the ordered action list for a notification.
pub fn actions_for(kind: &str, message: &str) -> Vec<NotificationAction> {
    let mut actions: Vec<NotificationAction> = paths_in_message(message)
        .into_iter()
        .map(|href| NotificationAction {
            label: "Open related resource".to_string(),
            href,
            description: Some("Link detected inside the notification".to_string()),
        })
        .collect();

    let by_type: Vec<NotificationAction> = match kind {
        "new_lead" => vec![
            NotificationAction::new("View sales pipeline", "/sales?tab=pipeline"),
            NotificationAction::new("View contacts", "/sales?tab=contacts"),
        ],
        "quote_update" => vec![NotificationAction::new("View quotes", "/sales?tab=quotes")],
        "contact_data_missing" => vec![NotificationAction::new(
            "Complete contacts",
            "/sales?tab=contacts",
        )],
        "project_update" => vec![NotificationAction::new("View projects", "/projects")],
        "project_data_missing" => vec![NotificationAction::new("Complete projects", "/projects")],
        "task_due" => vec![
            NotificationAction::new("View tasks", "/tasks"),
            NotificationAction::new("View projects", "/projects"),
        ],
        "invoice_update" => vec![
            NotificationAction::new("View invoices", "/invoices"),
            NotificationAction::new("View accounting", "/accounting"),
        ],
        "invoice_overdue" => vec![
            NotificationAction::new("View overdue invoices", "/invoices"),
            NotificationAction::new("View finance", "/finance"),
        ],
        "milestone_billing_due" => vec![
            NotificationAction::new("View pending invoices", "/invoices"),
            NotificationAction::new("View projects", "/projects"),
        ],
        "report_ready" => vec![NotificationAction::new("View reports", "/reports")],
        _ => vec![],
    };
    actions.extend(by_type);
    actions.push(NotificationAction::new("Go to dashboard", "/dashboard"));

    // Keep the first action per target.
    let mut seen: Vec<String> = Vec::new();
    actions.retain(|a| {
        if seen.contains(&a.href) {
            false
        } else {
            seen.push(a.href.clone());
            true
        }
    });
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_extracted_from_message() {
        let actions = actions_for("project_update", "Milestone overdue, see /projects/42");
        assert_eq!(actions[0].href, "/projects/42");
        assert!(actions.iter().any(|a| a.href == "/projects"));
    }

    #[test]
    fn test_protocol_relative_urls_are_rejected() {
        let paths = paths_in_message("see //evil.example/path and /invoices");
        assert_eq!(paths, vec!["/invoices".to_string()]);
    }

    #[test]
    fn test_unknown_type_still_offers_dashboard() {
        let actions = actions_for("mystery_event", "no links here");
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].href, "/dashboard");
    }

    #[test]
    fn test_deduplicates_by_href() {
        let actions = actions_for("task_due", "check /tasks now");
        let hrefs: Vec<&str> = actions.iter().map(|a| a.href.as_str()).collect();
        assert_eq!(hrefs, vec!["/tasks", "/projects", "/dashboard"]);
    }
}
