//! Per-key task execution guards.
//!
//! A guard entry is transient, process-lifetime coordination state: it is
//! never persisted, and in a multi-instance deployment each instance
//! throttles independently (best-effort throttle, not a distributed lock).

use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Guard state for one task key.
#[derive(Debug, Clone, Copy)]
struct GuardEntry {
    /// Whether an execution currently holds the key.
    running: bool,
    /// When the last attempt finished. Failures count as runs.
    last_run_at: Option<Instant>,
}

/// Process-wide map of task guards keyed by task identity.
///
/// The check-and-set in [`try_begin`](Self::try_begin) is atomic per key:
/// the dashmap entry handle holds the key's shard lock for the duration of
/// the read-modify-write. Different keys are fully independent.
#[derive(Debug, Default)]
pub struct TaskGuards {
    /// Task key → guard state.
    entries: DashMap<String, GuardEntry>,
}

impl TaskGuards {
    /// Creates an empty guard map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to start an execution for the key.
    ///
    /// Returns `false` when an execution is already running, or when the
    /// last attempt finished less than `min_interval` ago. Returns `true`
    /// and marks the key running otherwise; the caller must pair a
    /// successful begin with [`finish`](Self::finish).
    pub fn try_begin(&self, key: &str, min_interval: Duration) -> bool {
        let mut entry = self.entries.entry(key.to_string()).or_insert(GuardEntry {
            running: false,
            last_run_at: None,
        });

        if entry.running {
            return false;
        }
        if let Some(last) = entry.last_run_at {
            if last.elapsed() < min_interval {
                return false;
            }
        }

        entry.running = true;
        true
    }

    /// Release the key and stamp the attempt time.
    ///
    /// Called after every attempt, successful or not, so a broken task
    /// still waits out its interval instead of hot-looping.
    pub fn finish(&self, key: &str) {
        if let Some(mut entry) = self.entries.get_mut(key) {
            entry.running = false;
            entry.last_run_at = Some(Instant::now());
        }
    }

    /// Whether the key currently holds a running execution.
    pub fn is_running(&self, key: &str) -> bool {
        self.entries.get(key).map(|e| e.running).unwrap_or(false)
    }

    /// Whether the key has ever been guard-checked.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Drop all guard state. Test hook.
    pub fn reset(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_first_begin_wins_second_is_blocked() {
        let guards = TaskGuards::new();
        assert!(guards.try_begin("sync", Duration::from_secs(60)));
        assert!(!guards.try_begin("sync", Duration::from_secs(60)));
        assert!(guards.is_running("sync"));
    }

    #[test]
    fn test_finish_starts_the_interval() {
        let guards = TaskGuards::new();
        assert!(guards.try_begin("sync", Duration::from_millis(50)));
        guards.finish("sync");
        // Inside the interval: blocked.
        assert!(!guards.try_begin("sync", Duration::from_millis(50)));
        std::thread::sleep(Duration::from_millis(60));
        // Interval elapsed: allowed again.
        assert!(guards.try_begin("sync", Duration::from_millis(50)));
    }

    #[test]
    fn test_keys_are_independent() {
        let guards = TaskGuards::new();
        assert!(guards.try_begin("quality:sales:u1", Duration::from_secs(60)));
        assert!(guards.try_begin("quality:sales:u2", Duration::from_secs(60)));
        guards.finish("quality:sales:u1");
        assert!(guards.is_running("quality:sales:u2"));
        assert!(!guards.is_running("quality:sales:u1"));
    }

    #[tokio::test]
    async fn test_concurrent_begins_have_exactly_one_winner() {
        let guards = Arc::new(TaskGuards::new());
        let wins = Arc::new(AtomicU32::new(0));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let guards = Arc::clone(&guards);
            let wins = Arc::clone(&wins);
            handles.push(tokio::spawn(async move {
                if guards.try_begin("contended", Duration::from_secs(60)) {
                    wins.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(wins.load(Ordering::SeqCst), 1);
    }
}
