//! Notification fan-out operations.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use fibra_core::config::notifications::NotificationConfig;
use fibra_core::result::AppResult;
use fibra_entity::notification::NewNotification;
use fibra_entity::user::Role;

use crate::email::EmailChannel;
use crate::store::{NotificationStore, UserDirectory};

/// Outcome of a fan-out call.
///
/// `email_error` carries a dispatch failure without failing the call:
/// persistence and email are independent steps, and rows already created
/// are never rolled back because the relay failed.
#[derive(Debug, Clone, Default)]
pub struct FanoutReport {
    /// Notifications persisted.
    pub created: u64,
    /// Dispatch failure, if the email step was attempted and failed.
    pub email_error: Option<String>,
}

/// Outcome of the dedup-window variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupeOutcome {
    /// A notification was created.
    Created,
    /// A recent notification of the same kind already existed; nothing written.
    Skipped,
}

/// Creates persisted notifications and relays them by email when enabled.
#[derive(Debug, Clone)]
pub struct Notifier {
    /// Notification persistence seam.
    store: Arc<dyn NotificationStore>,
    /// User resolution seam.
    directory: Arc<dyn UserDirectory>,
    /// Outbound email channel.
    email: Arc<dyn EmailChannel>,
    /// Fan-out settings.
    config: NotificationConfig,
}

impl Notifier {
    /// Creates a new fan-out service.
    pub fn new(
        store: Arc<dyn NotificationStore>,
        directory: Arc<dyn UserDirectory>,
        email: Arc<dyn EmailChannel>,
        config: NotificationConfig,
    ) -> Self {
        Self {
            store,
            directory,
            email,
            config,
        }
    }

    /// The configured default dedup window.
    pub fn default_dedupe_window(&self) -> Duration {
        Duration::from_secs(self.config.dedupe_window_hours * 3600)
    }

    /// Notify every active user holding one of the given roles.
    ///
    /// Resolving zero users is a silent no-op: no rows, no email, no error.
    /// When email relay is enabled, one batched email goes to all resolved
    /// addresses; users without an address are silently excluded.
    pub async fn notify_roles(
        &self,
        roles: &[Role],
        kind: &str,
        message: &str,
    ) -> AppResult<FanoutReport> {
        let recipients = self.directory.users_by_roles(roles).await?;
        if recipients.is_empty() {
            return Ok(FanoutReport::default());
        }

        let rows: Vec<NewNotification> = recipients
            .iter()
            .map(|r| NewNotification::new(r.id, kind, message))
            .collect();
        let created = self.store.insert_many(&rows).await?;
        info!(kind, created, "Notifications fanned out");

        let addresses: Vec<String> = recipients.iter().filter_map(|r| r.email.clone()).collect();
        let email_error = self.relay(&addresses, kind, message).await;

        Ok(FanoutReport {
            created,
            email_error,
        })
    }

    /// Notify a single user.
    pub async fn notify_user(
        &self,
        user_id: Uuid,
        kind: &str,
        message: &str,
    ) -> AppResult<FanoutReport> {
        let row = NewNotification::new(user_id, kind, message);
        self.store.insert(&row).await?;

        let addresses: Vec<String> = self
            .directory
            .email_of(user_id)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Email lookup failed, skipping relay");
                None
            })
            .into_iter()
            .collect();
        let email_error = self.relay(&addresses, kind, message).await;

        Ok(FanoutReport {
            created: 1,
            email_error,
        })
    }

    /// Notify a single user at most once per window.
    ///
    /// Checks for an existing notification of the same (user, kind) inside
    /// the window and skips the write when one is found. The check and the
    /// insert are separate store calls; a concurrent race can produce at
    /// most one benign duplicate.
    pub async fn notify_user_once(
        &self,
        user_id: Uuid,
        kind: &str,
        message: &str,
        window: Option<Duration>,
    ) -> AppResult<DedupeOutcome> {
        let window = window.unwrap_or_else(|| self.default_dedupe_window());
        let since = Utc::now()
            - chrono::Duration::from_std(window)
                .unwrap_or_else(|_| chrono::Duration::hours(self.config.dedupe_window_hours as i64));

        if self.store.exists_recent(user_id, kind, since).await? {
            return Ok(DedupeOutcome::Skipped);
        }

        let row = NewNotification::new(user_id, kind, message);
        self.store.insert(&row).await?;
        Ok(DedupeOutcome::Created)
    }

    /// Email relay step. Returns the failure message instead of an error:
    /// the persistence step has already committed and must stand.
    async fn relay(&self, addresses: &[String], kind: &str, message: &str) -> Option<String> {
        if !self.config.email_enabled || addresses.is_empty() {
            return None;
        }

        let subject = format!("[Fibra Core] {}", kind.replace('_', " "));
        match self.email.send(addresses, &subject, message).await {
            Ok(()) => None,
            Err(e) => {
                warn!(kind, error = %e, "Email relay failed; notifications kept");
                Some(e.message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use fibra_core::error::AppError;
    use fibra_entity::notification::Notification;
    use std::sync::Mutex;

    use crate::store::Recipient;

    /// In-memory notification store.
    #[derive(Debug, Default)]
    struct MemoryStore {
        rows: Mutex<Vec<Notification>>,
    }

    impl MemoryStore {
        fn push_row(&self, user_id: Uuid, kind: &str, created_at: DateTime<Utc>) {
            self.rows.lock().unwrap().push(Notification {
                id: Uuid::new_v4(),
                user_id,
                kind: kind.to_string(),
                message: String::new(),
                read: false,
                created_at,
            });
        }

        fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl NotificationStore for MemoryStore {
        async fn insert_many(&self, rows: &[NewNotification]) -> AppResult<u64> {
            for row in rows {
                self.push_row(row.user_id, &row.kind, Utc::now());
            }
            Ok(rows.len() as u64)
        }

        async fn insert(&self, row: &NewNotification) -> AppResult<Notification> {
            self.push_row(row.user_id, &row.kind, Utc::now());
            let rows = self.rows.lock().unwrap();
            Ok(rows.last().unwrap().clone())
        }

        async fn exists_recent(
            &self,
            user_id: Uuid,
            kind: &str,
            since: DateTime<Utc>,
        ) -> AppResult<bool> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .any(|n| n.user_id == user_id && n.kind == kind && n.created_at >= since))
        }
    }

    /// Fixed-recipient directory.
    #[derive(Debug, Default)]
    struct MemoryDirectory {
        recipients: Vec<Recipient>,
    }

    #[async_trait]
    impl UserDirectory for MemoryDirectory {
        async fn users_by_roles(&self, _roles: &[Role]) -> AppResult<Vec<Recipient>> {
            Ok(self.recipients.clone())
        }

        async fn email_of(&self, user_id: Uuid) -> AppResult<Option<String>> {
            Ok(self
                .recipients
                .iter()
                .find(|r| r.id == user_id)
                .and_then(|r| r.email.clone()))
        }
    }

    /// Email channel that records sends and optionally fails.
    #[derive(Debug, Default)]
    struct MockEmail {
        fail: bool,
        sent: Mutex<Vec<Vec<String>>>,
    }

    #[async_trait]
    impl EmailChannel for MockEmail {
        async fn send(&self, recipients: &[String], _: &str, _: &str) -> AppResult<()> {
            if self.fail {
                return Err(AppError::dispatch("provider 500"));
            }
            self.sent.lock().unwrap().push(recipients.to_vec());
            Ok(())
        }
    }

    struct Fixture {
        store: Arc<MemoryStore>,
        email: Arc<MockEmail>,
        notifier: Notifier,
    }

    fn fixture(recipients: Vec<Recipient>, email_enabled: bool, email_fails: bool) -> Fixture {
        let store = Arc::new(MemoryStore::default());
        let email = Arc::new(MockEmail {
            fail: email_fails,
            ..Default::default()
        });
        let config = NotificationConfig {
            email_enabled,
            ..Default::default()
        };
        let notifier = Notifier::new(
            store.clone(),
            Arc::new(MemoryDirectory { recipients }),
            email.clone(),
            config,
        );
        Fixture {
            store,
            email,
            notifier,
        }
    }

    fn recipient(email: Option<&str>) -> Recipient {
        Recipient {
            id: Uuid::new_v4(),
            email: email.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_notify_roles_with_no_users_is_a_noop() {
        let fx = fixture(vec![], true, false);
        let report = fx
            .notifier
            .notify_roles(&[Role::Sales], "new_lead", "New lead registered")
            .await
            .unwrap();
        assert_eq!(report.created, 0);
        assert!(report.email_error.is_none());
        assert_eq!(fx.store.len(), 0);
        assert!(fx.email.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_notify_roles_persists_per_user_and_batches_one_email() {
        let fx = fixture(
            vec![
                recipient(Some("ana@fibra.studio")),
                recipient(None),
                recipient(Some("bob@fibra.studio")),
            ],
            true,
            false,
        );
        let report = fx
            .notifier
            .notify_roles(&[Role::Sales, Role::Management], "new_lead", "New lead")
            .await
            .unwrap();
        assert_eq!(report.created, 3);
        assert_eq!(fx.store.len(), 3);

        let sent = fx.email.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        // The user without an address is silently excluded.
        assert_eq!(sent[0].len(), 2);
    }

    #[tokio::test]
    async fn test_email_failure_keeps_persisted_rows() {
        let fx = fixture(vec![recipient(Some("ana@fibra.studio"))], true, true);
        let report = fx
            .notifier
            .notify_roles(&[Role::Sales], "quote_update", "Quote updated")
            .await
            .unwrap();
        assert_eq!(report.created, 1);
        assert_eq!(fx.store.len(), 1);
        assert!(report.email_error.unwrap().contains("provider 500"));
    }

    #[tokio::test]
    async fn test_email_disabled_skips_relay() {
        let fx = fixture(vec![recipient(Some("ana@fibra.studio"))], false, false);
        let report = fx
            .notifier
            .notify_roles(&[Role::Sales], "new_lead", "New lead")
            .await
            .unwrap();
        assert_eq!(report.created, 1);
        assert!(report.email_error.is_none());
        assert!(fx.email.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_notify_user_once_dedups_within_window() {
        let fx = fixture(vec![], false, false);
        let user = Uuid::new_v4();
        let window = Some(Duration::from_secs(3600));

        let first = fx
            .notifier
            .notify_user_once(user, "contact_data_missing", "3 contacts incomplete", window)
            .await
            .unwrap();
        assert_eq!(first, DedupeOutcome::Created);

        let second = fx
            .notifier
            .notify_user_once(user, "contact_data_missing", "3 contacts incomplete", window)
            .await
            .unwrap();
        assert_eq!(second, DedupeOutcome::Skipped);
        assert_eq!(fx.store.len(), 1);
    }

    #[tokio::test]
    async fn test_notify_user_once_creates_again_after_window() {
        let fx = fixture(vec![], false, false);
        let user = Uuid::new_v4();

        // An alert older than the window does not suppress a new one.
        fx.store.push_row(
            user,
            "project_data_missing",
            Utc::now() - chrono::Duration::hours(9),
        );

        let outcome = fx
            .notifier
            .notify_user_once(
                user,
                "project_data_missing",
                "2 projects incomplete",
                Some(Duration::from_secs(8 * 3600)),
            )
            .await
            .unwrap();
        assert_eq!(outcome, DedupeOutcome::Created);
        assert_eq!(fx.store.len(), 2);
    }

    #[tokio::test]
    async fn test_different_kinds_do_not_dedupe_each_other() {
        let fx = fixture(vec![], false, false);
        let user = Uuid::new_v4();
        let window = Some(Duration::from_secs(3600));

        fx.notifier
            .notify_user_once(user, "contact_data_missing", "msg", window)
            .await
            .unwrap();
        let outcome = fx
            .notifier
            .notify_user_once(user, "project_data_missing", "msg", window)
            .await
            .unwrap();
        assert_eq!(outcome, DedupeOutcome::Created);
        assert_eq!(fx.store.len(), 2);
    }
}
