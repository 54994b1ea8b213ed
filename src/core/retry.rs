//! Bounded retry with a fixed pause between attempts.
//!
//! Every error is treated the same way: there is no retryable/non-retryable
//! split, no backoff and no jitter. The pause goes through
//! `tokio::time::sleep`, so tests can drive it on a paused clock.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::core::config;

/// Retry-related errors.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// All attempts exhausted
    #[error("Max retries reached after {attempts} attempt(s)")]
    MaxRetriesExhausted { attempts: u32, last_error: E },
}

/// Retry strategy configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, first call included (at least 1)
    pub max_attempts: u32,
    /// Pause between two consecutive attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: config::vision::MAX_ATTEMPTS,
            delay: config::vision::retry_delay(),
        }
    }
}

impl RetryPolicy {
    /// Creates a new policy with default settings (3 attempts, 2 seconds apart).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the total number of attempts. Values below 1 are clamped to 1.
    #[must_use]
    pub fn max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max.max(1);
        self
    }

    /// Sets the pause between attempts.
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Single attempt, no retry.
    pub fn once() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }
}

/// Result of a retried operation.
#[derive(Debug)]
pub struct RetryResult<T, E> {
    /// The final result (success or last error)
    pub result: Result<T, RetryError<E>>,
    /// Number of attempts made
    pub attempts: u32,
}

/// Executes an async operation with retry logic.
///
/// `operation_name` only appears in log lines.
pub async fn retry<F, Fut, T, E>(policy: &RetryPolicy, operation_name: &str, mut operation: F) -> RetryResult<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempts = 0;

    loop {
        attempts += 1;

        match operation(attempts).await {
            Ok(value) => {
                return RetryResult {
                    result: Ok(value),
                    attempts,
                };
            }
            Err(e) if attempts < max_attempts => {
                log::error!("{} failed on attempt {}: {}", operation_name, attempts, e);
                log::info!("Retrying in {} seconds...", policy.delay.as_secs_f64());
                tokio::time::sleep(policy.delay).await;
            }
            Err(e) => {
                log::error!("{} failed on attempt {}: {}", operation_name, attempts, e);
                log::error!("Max retries reached. {} gave up after {} attempt(s)", operation_name, attempts);
                return RetryResult {
                    result: Err(RetryError::MaxRetriesExhausted {
                        attempts,
                        last_error: e,
                    }),
                    attempts,
                };
            }
        }
    }
}
