use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::config::RetryConfig;

/// Outcome of a retried step: the value plus how many retries it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryOutcome<T> {
    pub value: T,
    pub retries: u32,
}

/// Runs `operation` under the per-step retry policy: each attempt is bounded
/// by the step timeout, failed attempts back off exponentially (doubling from
/// the initial interval, capped at the maximum interval), and once the
/// attempt cap is exceeded the last error is surfaced as the step's failure.
///
/// A timed-out attempt is abandoned and retried from its start; `on_timeout`
/// produces the error recorded for it.
pub async fn with_retry<T, E, F, Fut>(
    config: &RetryConfig,
    step: &str,
    on_timeout: impl Fn(Duration) -> E,
    mut operation: F,
) -> Result<RetryOutcome<T>, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut interval = config.initial_interval;
    let mut attempt = 0;

    loop {
        attempt += 1;

        let result = match tokio::time::timeout(config.step_timeout, operation()).await {
            Ok(result) => result,
            Err(_) => Err(on_timeout(config.step_timeout)),
        };

        match result {
            Ok(value) => {
                return Ok(RetryOutcome {
                    value,
                    retries: attempt - 1,
                });
            }
            Err(error) => {
                warn!(step, attempt, max_attempts, %error, "step attempt failed");

                if attempt >= max_attempts {
                    return Err(error);
                }

                tokio::time::sleep(interval).await;
                interval = Duration::min(interval * 2, config.max_interval);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_config(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            initial_interval: Duration::from_millis(1),
            max_interval: Duration::from_millis(4),
            step_timeout: Duration::from_millis(200),
        }
    }

    #[tokio::test]
    async fn succeeds_after_two_failures_with_two_recorded_retries() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let outcome = with_retry(
            &fast_config(3),
            "parse",
            |d| format!("timed out after {:?}", d),
            move || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err("transient failure".to_string())
                    } else {
                        Ok(42_u32)
                    }
                }
            },
        )
        .await
        .unwrap();

        assert_eq!(outcome.value, 42);
        assert_eq!(outcome.retries, 2);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhausted_attempts_surface_the_last_error() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let result: Result<RetryOutcome<()>, String> = with_retry(
            &fast_config(3),
            "embed",
            |d| format!("timed out after {:?}", d),
            move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                async move { Err(format!("failure #{}", n + 1)) }
            },
        )
        .await;

        assert_eq!(result.unwrap_err(), "failure #3");
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn timed_out_attempt_counts_as_a_failed_attempt() {
        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();

        let config = RetryConfig {
            max_attempts: 2,
            initial_interval: Duration::from_millis(1),
            max_interval: Duration::from_millis(2),
            step_timeout: Duration::from_millis(10),
        };

        let outcome = with_retry(
            &config,
            "fetch",
            |d| format!("timed out after {:?}", d),
            move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        // First attempt hangs past the step timeout.
                        tokio::time::sleep(Duration::from_secs(5)).await;
                    }
                    Ok::<_, String>("done")
                }
            },
        )
        .await
        .unwrap();

        assert_eq!(outcome.value, "done");
        assert_eq!(outcome.retries, 1);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn first_try_success_records_no_retries() {
        let outcome = with_retry(
            &fast_config(3),
            "store",
            |d| format!("timed out after {:?}", d),
            || async { Ok::<_, String>(7_u32) },
        )
        .await
        .unwrap();

        assert_eq!(outcome.value, 7);
        assert_eq!(outcome.retries, 0);
    }
}
