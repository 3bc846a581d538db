//! Fixed-interval retry
//!
//! Bounded sequential retry for cluster convergence waits. No backoff, no
//! jitter: attempts are evenly spaced and the last error is propagated
//! unchanged once the budget runs out.

use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Attempt budget and the fixed wait between attempts
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub wait: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, wait: Duration) -> Self {
        Self { attempts, wait }
    }

    pub fn from_secs(attempts: u32, wait_secs: u64) -> Self {
        Self::new(attempts, Duration::from_secs(wait_secs))
    }

    /// Run `op` until it succeeds or attempts are exhausted.
    ///
    /// Attempts run one after another with the configured wait in between.
    /// The final attempt's error is returned as-is.
    pub async fn run<F, Fut, T, E>(&self, what: &str, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let attempts = self.attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            match op().await {
                Ok(value) => {
                    debug!("{what}: succeeded on attempt {attempt}/{attempts}");
                    return Ok(value);
                }
                Err(e) => {
                    debug!("{what}: attempt {attempt}/{attempts} failed: {e}");
                    last_error = Some(e);
                    if attempt < attempts {
                        tokio::time::sleep(self.wait).await;
                    }
                }
            }
        }

        Err(last_error.expect("at least one attempt always runs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_success_on_later_attempt() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let policy = RetryPolicy::new(5, Duration::from_millis(1));
        let result: Result<u32, String> = policy
            .run("test", || {
                let c = counter_clone.clone();
                async move {
                    let n = c.fetch_add(1, Ordering::SeqCst);
                    if n >= 2 {
                        Ok(n)
                    } else {
                        Err("not yet".to_string())
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_returns_last_error() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let result: Result<(), String> = policy
            .run("test", || {
                let c = counter_clone.clone();
                async move {
                    let n = c.fetch_add(1, Ordering::SeqCst);
                    Err(format!("failure {n}"))
                }
            })
            .await;

        assert_eq!(result.unwrap_err(), "failure 2");
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_runs_once() {
        let policy = RetryPolicy::new(0, Duration::from_millis(1));
        let result: Result<u32, String> = policy.run("test", || async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
