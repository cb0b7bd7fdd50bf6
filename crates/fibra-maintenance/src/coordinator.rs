//! The maintenance coordinator.
//!
//! Selects the upkeep tasks applicable to the caller's role, runs them
//! concurrently under their guards, and aggregates the per-task results.
//! The coordinator itself never fails: task errors are captured as data.

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use fibra_entity::user::Role;

use crate::guard::TaskGuards;
use crate::tasks::MaintenanceTask;

/// Outcome of one task within a coordinator invocation.
///
/// `executed` tracks whether the body was *attempted*: a throttled or
/// already-running task reports `executed = false` (the expected outcome,
/// not an error), and a failed attempt reports `executed = true` with
/// `error` set.
#[derive(Debug, Clone, Serialize)]
pub struct TaskResult {
    /// Task name.
    pub name: String,
    /// Whether the task body was attempted.
    pub executed: bool,
    /// Failure message, if the attempt failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Runs the registered maintenance tasks on demand.
#[derive(Debug)]
pub struct MaintenanceCoordinator {
    /// Shared guard map. Injected so tests can reset and inspect it.
    guards: Arc<TaskGuards>,
    /// Registered tasks, in registration order.
    tasks: Vec<Arc<dyn MaintenanceTask>>,
}

impl MaintenanceCoordinator {
    /// Creates a coordinator over the given guard map.
    pub fn new(guards: Arc<TaskGuards>) -> Self {
        Self {
            guards,
            tasks: Vec::new(),
        }
    }

    /// Register a task. Registration order is the result order.
    pub fn register(&mut self, task: Arc<dyn MaintenanceTask>) -> &mut Self {
        debug!(task = task.name(), "Registered maintenance task");
        self.tasks.push(task);
        self
    }

    /// The shared guard map.
    pub fn guards(&self) -> &Arc<TaskGuards> {
        &self.guards
    }

    /// Run every task the caller's role selects.
    ///
    /// Tasks whose module gate rejects the role are omitted entirely and
    /// never guard-checked. Selected tasks run concurrently; the returned
    /// list follows registration order of the selected subset.
    pub async fn run(&self, user_id: Uuid, role: Role) -> Vec<TaskResult> {
        let selected: Vec<Arc<dyn MaintenanceTask>> = self
            .tasks
            .iter()
            .filter(|task| task.enabled_for(role))
            .cloned()
            .collect();

        let attempts = selected.into_iter().map(|task| {
            let guards = Arc::clone(&self.guards);
            async move {
                let key = task.guard_key(user_id);
                if !guards.try_begin(&key, task.min_interval()) {
                    return TaskResult {
                        name: task.name().to_string(),
                        executed: false,
                        error: None,
                    };
                }

                let outcome = task.run(user_id).await;
                guards.finish(&key);

                match outcome {
                    Ok(()) => TaskResult {
                        name: task.name().to_string(),
                        executed: true,
                        error: None,
                    },
                    Err(e) => {
                        warn!(task = task.name(), error = %e, "Maintenance task failed");
                        TaskResult {
                            name: task.name().to_string(),
                            executed: true,
                            error: Some(e.message),
                        }
                    }
                }
            }
        });

        join_all(attempts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fibra_auth::rbac::can_access;
    use fibra_core::error::AppError;
    use fibra_core::result::AppResult;
    use fibra_entity::module::Module;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Configurable stub task.
    #[derive(Debug)]
    struct StubTask {
        name: &'static str,
        module: Module,
        per_user: bool,
        interval: Duration,
        delay: Duration,
        fail: bool,
        runs: AtomicU32,
    }

    impl StubTask {
        fn new(name: &'static str, module: Module) -> Self {
            Self {
                name,
                module,
                per_user: false,
                interval: Duration::from_millis(100),
                delay: Duration::ZERO,
                fail: false,
                runs: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl MaintenanceTask for StubTask {
        fn name(&self) -> &str {
            self.name
        }

        fn guard_key(&self, user_id: Uuid) -> String {
            if self.per_user {
                format!("stub:{}:{user_id}", self.name)
            } else {
                format!("stub:{}", self.name)
            }
        }

        fn min_interval(&self) -> Duration {
            self.interval
        }

        fn enabled_for(&self, role: Role) -> bool {
            can_access(role, self.module)
        }

        async fn run(&self, _user_id: Uuid) -> AppResult<()> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.fail {
                Err(AppError::internal("stub blew up"))
            } else {
                Ok(())
            }
        }
    }

    fn coordinator_with(tasks: Vec<Arc<StubTask>>) -> MaintenanceCoordinator {
        let mut coordinator = MaintenanceCoordinator::new(Arc::new(TaskGuards::new()));
        for task in tasks {
            coordinator.register(task);
        }
        coordinator
    }

    #[tokio::test]
    async fn test_role_gating_skips_tasks_without_guard_checking() {
        let sales_task = Arc::new(StubTask::new("sales_scan", Module::Sales));
        let accounting_task = Arc::new(StubTask::new("bank_seed", Module::Accounting));
        let coordinator =
            coordinator_with(vec![Arc::clone(&sales_task), Arc::clone(&accounting_task)]);

        let user = Uuid::new_v4();
        let results = coordinator.run(user, Role::Accounting).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "bank_seed");
        assert!(results[0].executed);
        assert_eq!(sales_task.runs.load(Ordering::SeqCst), 0);
        // The skipped task never even touched the guard map.
        assert!(!coordinator.guards().contains(&sales_task.guard_key(user)));
    }

    #[tokio::test]
    async fn test_concurrent_invocations_execute_once_and_skip_once() {
        let task = Arc::new(StubTask {
            delay: Duration::from_millis(50),
            ..StubTask::new("slow_sync", Module::Sales)
        });
        let coordinator = coordinator_with(vec![Arc::clone(&task)]);
        let user = Uuid::new_v4();

        let (first, second) =
            tokio::join!(coordinator.run(user, Role::Sales), coordinator.run(user, Role::Sales));

        let executed = [&first[0], &second[0]]
            .iter()
            .filter(|r| r.executed)
            .count();
        assert_eq!(executed, 1);
        assert_eq!(task.runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_min_interval_throttles_reruns() {
        let task = Arc::new(StubTask {
            interval: Duration::from_millis(80),
            ..StubTask::new("seed", Module::Marketing)
        });
        let coordinator = coordinator_with(vec![Arc::clone(&task)]);
        let user = Uuid::new_v4();

        assert!(coordinator.run(user, Role::Marketing).await[0].executed);
        assert!(!coordinator.run(user, Role::Marketing).await[0].executed);

        tokio::time::sleep(Duration::from_millis(90)).await;
        assert!(coordinator.run(user, Role::Marketing).await[0].executed);
        assert_eq!(task.runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failing_task_reports_error_and_releases_its_guard() {
        let task = Arc::new(StubTask {
            fail: true,
            interval: Duration::from_millis(40),
            ..StubTask::new("broken", Module::Sales)
        });
        let coordinator = coordinator_with(vec![Arc::clone(&task)]);
        let user = Uuid::new_v4();

        let results = coordinator.run(user, Role::Sales).await;
        assert!(results[0].executed);
        assert_eq!(results[0].error.as_deref(), Some("stub blew up"));

        // The failure released the guard; the interval still applies.
        assert!(!coordinator.run(user, Role::Sales).await[0].executed);
        tokio::time::sleep(Duration::from_millis(50)).await;
        let retry = coordinator.run(user, Role::Sales).await;
        assert!(retry[0].executed);
        assert_eq!(task.runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_per_user_keys_throttle_independently() {
        let task = Arc::new(StubTask {
            per_user: true,
            ..StubTask::new("quality", Module::Sales)
        });
        let coordinator = coordinator_with(vec![Arc::clone(&task)]);

        let first = coordinator.run(Uuid::new_v4(), Role::Sales).await;
        let second = coordinator.run(Uuid::new_v4(), Role::Sales).await;
        assert!(first[0].executed);
        assert!(second[0].executed);
        assert_eq!(task.runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_one_failure_never_blocks_the_rest_of_the_batch() {
        let broken = Arc::new(StubTask {
            fail: true,
            ..StubTask::new("broken", Module::Sales)
        });
        let healthy = Arc::new(StubTask::new("healthy", Module::Dashboard));
        let coordinator = coordinator_with(vec![Arc::clone(&broken), Arc::clone(&healthy)]);

        let results = coordinator.run(Uuid::new_v4(), Role::Sales).await;
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.executed));
        assert!(results.iter().any(|r| r.error.is_some()));
        assert!(results.iter().any(|r| r.error.is_none()));
    }
}
