//! Retry strategies with exponential backoff and jitter.
//!
//! Grounds the single-node executor's retry/timeout loop: callers configure
//! a [`RetryStrategy`] and drive [`retry`] or [`retry_with_timeout`] around a
//! fallible async operation.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{sleep, timeout};

use crate::error::NebulaError;

/// Retry strategy configuration: attempt count, backoff shape, and an
/// optional cumulative timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryStrategy {
    /// Maximum number of attempts (the first attempt counts as one).
    pub max_attempts: u32,
    /// Base delay between retries.
    pub base_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Exponential backoff multiplier.
    pub backoff_multiplier: f64,
    /// Jitter factor (0.0 = no jitter, 1.0 = full jitter).
    pub jitter_factor: f64,
    /// Whether to use exponential backoff (`false` = fixed `base_delay`).
    pub exponential_backoff: bool,
    /// Cumulative timeout for the whole retry operation.
    pub timeout: Option<Duration>,
}

impl Default for RetryStrategy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::MAX,
            backoff_multiplier: 2.0,
            jitter_factor: 0.0,
            exponential_backoff: true,
            timeout: None,
        }
    }
}

impl RetryStrategy {
    /// Create a new retry strategy with the engine defaults (§4.6.2):
    /// one attempt, no backoff, no cumulative timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of attempts.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the base delay.
    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Set the maximum delay.
    #[must_use]
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Set the backoff multiplier.
    #[must_use]
    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Set the jitter factor.
    #[must_use]
    pub fn with_jitter_factor(mut self, jitter: f64) -> Self {
        self.jitter_factor = jitter;
        self
    }

    /// Enable or disable exponential backoff.
    #[must_use]
    pub fn with_exponential_backoff(mut self, enabled: bool) -> Self {
        self.exponential_backoff = enabled;
        self
    }

    /// Set the cumulative timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Compute the delay to sleep before the given (zero-indexed) retry
    /// attempt, clamped to `[base_delay, max_delay]`.
    #[must_use]
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        if !self.exponential_backoff || attempt == 0 {
            return self.base_delay.min(self.max_delay);
        }

        let mut delay = self.base_delay.as_millis() as f64;
        for _ in 0..attempt {
            delay *= self.backoff_multiplier;
        }

        if self.jitter_factor > 0.0 {
            let jitter = delay * self.jitter_factor * (rand::random::<f64>() - 0.5);
            delay += jitter;
        }

        delay = delay.max(self.base_delay.as_millis() as f64);
        delay = delay.min(self.max_delay.as_millis() as f64);
        Duration::from_millis(delay as u64)
    }
}

/// Retry a fallible async operation according to `strategy`.
///
/// On each failed attempt the error is handed to `retry_on`: returning
/// `false` halts retrying immediately even if attempts remain (§4.6,
/// step 3b). Passing `|_| true` retries any error, matching the default
/// "absence of `retryOn` means retry any error" policy (§4.6.2).
pub async fn retry<F, Fut, T, E, R>(f: F, strategy: &RetryStrategy, retry_on: R) -> Result<T, E>
where
    F: Fn(u32) -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
{
    let start = std::time::Instant::now();
    let mut last_error = None;

    for attempt in 0..strategy.max_attempts {
        if strategy.timeout.is_some_and(|budget| start.elapsed() >= budget) {
            break;
        }

        match f(attempt).await {
            Ok(value) => return Ok(value),
            Err(error) => {
                let should_retry = retry_on(&error);
                last_error = Some(error);

                if !should_retry || attempt + 1 >= strategy.max_attempts {
                    break;
                }

                sleep(strategy.calculate_delay(attempt)).await;
            }
        }
    }

    Err(last_error.expect("loop runs at least once since max_attempts >= 1 is the caller's contract"))
}

/// Retry a fallible async operation, additionally racing the whole retry
/// loop against a single outer timeout.
pub async fn retry_with_timeout<F, Fut, T, E, R>(
    f: F,
    strategy: &RetryStrategy,
    operation_timeout: Duration,
    retry_on: R,
) -> Result<T, NebulaError>
where
    F: Fn(u32) -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: Into<NebulaError>,
    R: Fn(&E) -> bool,
{
    match timeout(operation_timeout, retry(f, strategy, retry_on)).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => Err(NebulaError::timeout(operation_timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn default_strategy_is_single_attempt_no_backoff() {
        let strategy = RetryStrategy::default();
        assert_eq!(strategy.max_attempts, 1);
        assert_eq!(strategy.base_delay, Duration::ZERO);
    }

    #[test]
    fn calculate_delay_grows_with_exponential_backoff() {
        let strategy = RetryStrategy::new()
            .with_base_delay(Duration::from_millis(100))
            .with_backoff_multiplier(2.0);

        let d1 = strategy.calculate_delay(1);
        let d2 = strategy.calculate_delay(2);
        let d3 = strategy.calculate_delay(3);
        assert!(d2 > d1);
        assert!(d3 > d2);
    }

    #[test]
    fn calculate_delay_clamped_to_max() {
        let strategy = RetryStrategy::new()
            .with_base_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(150))
            .with_backoff_multiplier(10.0);
        assert_eq!(strategy.calculate_delay(5), Duration::from_millis(150));
    }

    #[tokio::test]
    async fn retry_succeeds_after_two_failures() {
        let attempts = AtomicU32::new(0);
        let strategy = RetryStrategy::new()
            .with_max_attempts(3)
            .with_base_delay(Duration::from_millis(1));

        let result: Result<&str, &str> = retry(
            |_attempt| {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n < 3 {
                        Err("not yet")
                    } else {
                        Ok("success")
                    }
                }
            },
            &strategy,
            |_| true,
        )
        .await;

        assert_eq!(result, Ok("success"));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retry_exhausts_max_attempts() {
        let attempts = AtomicU32::new(0);
        let strategy = RetryStrategy::new().with_max_attempts(2);

        let result: Result<(), &str> = retry(
            |_attempt| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async move { Err("always fails") }
            },
            &strategy,
            |_| true,
        )
        .await;

        assert_eq!(result, Err("always fails"));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn retry_on_false_stops_immediately() {
        let attempts = AtomicU32::new(0);
        let strategy = RetryStrategy::new().with_max_attempts(5);

        let result: Result<(), &str> = retry(
            |_attempt| {
                attempts.fetch_add(1, Ordering::SeqCst);
                async move { Err("permanent") }
            },
            &strategy,
            |_| false,
        )
        .await;

        assert_eq!(result, Err("permanent"));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retry_with_timeout_surfaces_timeout_error() {
        let strategy = RetryStrategy::new().with_max_attempts(5);
        let result: Result<(), NebulaError> = retry_with_timeout(
            |_attempt| async {
                sleep(Duration::from_millis(50)).await;
                Err::<(), NebulaError>(NebulaError::executor_failure("slow failure"))
            },
            &strategy,
            Duration::from_millis(5),
            |_| true,
        )
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.error_code(), "TIMEOUT");
    }
}
