//! # Retry Mechanism
//!
//! Bounded retry with capped exponential backoff for outbound calls.
//! Waits are deterministic: a `Retry-After` hint wins, otherwise
//! `base * 2^attempt` capped per error category.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::sanitization::sanitize_message;
use crate::types::{Error, ErrorKind, Result};

/// The result of a retry operation
#[derive(Debug)]
pub enum RetryResult<T> {
    /// The operation succeeded with the given result
    Success(T),
    /// All retries failed, returning the final error
    Failure(Error),
}

impl<T> RetryResult<T> {
    /// Converts the result to a standard Result
    pub fn into_result(self) -> Result<T> {
        match self {
            RetryResult::Success(value) => Ok(value),
            RetryResult::Failure(err) => Err(err),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RetryResult::Failure(_))
    }
}

/// A trait for errors that can be retried
pub trait RetryableError {
    /// Returns true if the error is transient and the operation might succeed on retry
    fn is_transient(&self) -> bool;

    /// Returns the suggested delay before retrying
    fn suggested_delay(&self) -> Option<Duration> {
        None
    }

    /// True when no response was received at all (uses the shorter cap)
    fn is_connectivity(&self) -> bool {
        false
    }
}

impl RetryableError for Error {
    fn is_transient(&self) -> bool {
        Error::is_transient(self)
    }

    fn suggested_delay(&self) -> Option<Duration> {
        self.retry_after.map(Duration::from_secs)
    }

    fn is_connectivity(&self) -> bool {
        self.kind == ErrorKind::Transport
    }
}

/// Configuration for a retry policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,

    /// Base duration for exponential backoff
    pub base_backoff: Duration,

    /// Backoff cap after an upstream response
    pub max_backoff: Duration,

    /// Backoff cap when the request never got a response
    pub network_max_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_backoff: Duration::from_millis(1000),
            max_backoff: Duration::from_secs(30),
            network_max_backoff: Duration::from_secs(8),
        }
    }
}

/// A retry policy that determines how to handle retries
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,

    /// Name of the policy (for logs)
    name: String,
}

impl RetryPolicy {
    /// Creates a new retry policy with the given name and configuration
    pub fn new<S: Into<String>>(name: S, config: Option<RetryConfig>) -> Self {
        Self {
            config: config.unwrap_or_default(),
            name: name.into(),
        }
    }

    /// Creates a policy for operations that should never be retried
    pub fn never() -> Self {
        Self::new(
            "never",
            Some(RetryConfig {
                max_retries: 0,
                ..Default::default()
            }),
        )
    }

    /// Checks if an error is retryable according to this policy
    pub fn is_retryable<E: RetryableError>(&self, error: &E, attempt: u32) -> bool {
        attempt < self.config.max_retries && error.is_transient()
    }

    /// Calculates the backoff duration for a retry
    pub fn calculate_backoff<E: RetryableError>(&self, error: &E, attempt: u32) -> Duration {
        if let Some(delay) = error.suggested_delay() {
            return delay;
        }

        let cap = if error.is_connectivity() {
            self.config.network_max_backoff
        } else {
            self.config.max_backoff
        };

        let base_ms = self.config.base_backoff.as_millis() as u64;
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        let backoff_ms = base_ms.saturating_mul(factor);

        Duration::from_millis(backoff_ms).min(cap)
    }

    /// Executes a function with retry behavior.
    ///
    /// The closure is invoked at most `max_retries + 1` times. Each retry
    /// emits one warning with the attempt number, the wait and the status.
    pub async fn retry<F, Fut, T>(&self, operation_name: &str, mut f: F) -> RetryResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt: u32 = 0;

        loop {
            match f().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(
                            policy = %self.name,
                            operation = %operation_name,
                            attempts = attempt + 1,
                            "Operation succeeded after retries"
                        );
                    }
                    return RetryResult::Success(value);
                }
                Err(error) => {
                    if !self.is_retryable(&error, attempt) {
                        if error.is_transient() {
                            warn!(
                                policy = %self.name,
                                operation = %operation_name,
                                attempts = attempt + 1,
                                status = ?error.status,
                                error = %sanitize_message(&error.message),
                                "Retry budget exhausted"
                            );
                        }
                        return RetryResult::Failure(error);
                    }

                    let delay = self.calculate_backoff(&error, attempt);
                    warn!(
                        policy = %self.name,
                        operation = %operation_name,
                        attempt = attempt + 1,
                        max_retries = self.config.max_retries,
                        wait_ms = delay.as_millis() as u64,
                        status = ?error.status,
                        "Transient failure, retrying"
                    );

                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(
            "test",
            Some(RetryConfig {
                max_retries,
                ..Default::default()
            }),
        )
    }

    #[test]
    fn test_backoff_is_capped_and_monotonic() {
        let policy = policy(10);
        let upstream = Error::from_status(503, "unavailable");
        let waits: Vec<u64> = (0..8)
            .map(|a| policy.calculate_backoff(&upstream, a).as_millis() as u64)
            .collect();
        assert_eq!(waits[..6], [1000, 2000, 4000, 8000, 16000, 30000]);
        assert!(waits.windows(2).all(|w| w[0] <= w[1]));
        assert!(waits.iter().all(|w| *w <= 30000));

        let network = Error::transport("connection reset");
        let waits: Vec<u64> = (0..6)
            .map(|a| policy.calculate_backoff(&network, a).as_millis() as u64)
            .collect();
        assert_eq!(waits, vec![1000, 2000, 4000, 8000, 8000, 8000]);
    }

    #[test]
    fn test_only_transport_errors_use_network_cap() {
        assert!(Error::transport("timed out").is_connectivity());
        assert!(!Error::from_status(503, "unavailable").is_connectivity());
        assert!(!Error::from_status(429, "slow down").is_connectivity());

        let policy = policy(10);
        let throttled = Error::from_status(429, "slow down");
        assert_eq!(policy.calculate_backoff(&throttled, 4), Duration::from_secs(16));
    }

    #[test]
    fn test_retry_after_takes_precedence() {
        let policy = policy(3);
        let err = Error::from_status(429, "slow down").with_retry_after(Some(2));
        assert_eq!(policy.calculate_backoff(&err, 0), Duration::from_secs(2));
        assert_eq!(policy.calculate_backoff(&err, 3), Duration::from_secs(2));
    }

    #[test]
    fn test_large_attempt_does_not_overflow() {
        let policy = policy(100);
        let err = Error::from_status(500, "boom");
        assert_eq!(policy.calculate_backoff(&err, 80), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempts_bounded_by_retries_plus_one() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: RetryResult<()> = policy(3)
            .retry("always-fails", || {
                let counter = counter_clone.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(Error::from_status(503, "unavailable"))
                }
            })
            .await;

        assert!(result.is_failure());
        assert_eq!(counter.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_transient_failures() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = policy(3)
            .retry("flaky", || {
                let counter = counter_clone.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    if n < 2 {
                        Err(Error::transport("connection reset"))
                    } else {
                        Ok("done")
                    }
                }
            })
            .await;

        assert_eq!(result.into_result().unwrap(), "done");
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_transient_error_fails_immediately() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: RetryResult<()> = policy(3)
            .retry("rejected", || {
                let counter = counter_clone.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(Error::from_status(400, "invalid argument"))
                }
            })
            .await;

        let err = result.into_result().unwrap_err();
        assert_eq!(err.status, Some(400));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_policy_runs_once() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: RetryResult<()> = RetryPolicy::never()
            .retry("once", || {
                let counter = counter_clone.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(Error::from_status(429, "slow down"))
                }
            })
            .await;

        assert!(result.is_failure());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
