//! Bounded retry for transient connection-pool exhaustion.
//!
//! Only pool-acquire timeouts are retried; every other database error
//! propagates immediately. Component logic built on top of this layer
//! (guards, dedup checks) adds no retry layer of its own.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Number of additional attempts after the first failure.
const RETRIES: u32 = 2;
/// Base delay; the wait grows linearly with the attempt number.
const BASE_DELAY: Duration = Duration::from_millis(250);

/// Whether the error is a transient pool-acquire timeout.
pub fn is_pool_timeout(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::PoolTimedOut)
}

/// Run `operation`, retrying pool-acquire timeouts with linear backoff.
pub async fn with_pool_retry<T, F, Fut>(operation: F) -> Result<T, sqlx::Error>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if is_pool_timeout(&err) && attempt < RETRIES => {
                let wait = BASE_DELAY * (attempt + 1);
                warn!(
                    attempt = attempt + 1,
                    wait_ms = wait.as_millis() as u64,
                    "Connection pool exhausted, retrying"
                );
                tokio::time::sleep(wait).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_retries_pool_timeout_then_succeeds() {
        let calls = AtomicU32::new(0);
        let result = with_pool_retry(|| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(sqlx::Error::PoolTimedOut)
                } else {
                    Ok(42)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_transient_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<i32, _> = with_pool_retry(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(sqlx::Error::RowNotFound) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_bounded_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<i32, _> = with_pool_retry(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(sqlx::Error::PoolTimedOut) }
        })
        .await;
        assert!(matches!(result, Err(sqlx::Error::PoolTimedOut)));
        assert_eq!(calls.load(Ordering::SeqCst), 1 + RETRIES);
    }
}
