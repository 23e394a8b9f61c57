//! Field-level retry.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use sheetpilot_config::RetryConfig;
use sheetpilot_protocols::DriverError;

/// Retry policy for single form field operations.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Pause after the first failed attempt.
    pub delay: Duration,
    /// Growth factor applied to the pause after each further failure.
    pub backoff_multiplier: f64,
    /// Upper bound on any single pause.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            delay: Duration::from_millis(config.delay_ms),
            backoff_multiplier: config.backoff_multiplier,
            max_delay: Duration::from_millis(config.max_delay_ms),
        }
    }
}

/// Why a retried operation gave up.
#[derive(Debug)]
pub enum RetryFailure {
    /// Every attempt hit a transient error; carries the last one.
    Exhausted { attempts: u32, last: DriverError },
    /// A non-transient error stopped retrying at once.
    Fatal(DriverError),
}

impl RetryPolicy {
    /// Same attempt bound as the default, without pauses.
    pub fn no_delay() -> Self {
        Self {
            delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Pause after failed attempt number `attempt` (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let delay = self.delay.as_millis() as f64 * self.backoff_multiplier.powi(exponent);
        let delay = delay.min(self.max_delay.as_millis() as f64);
        if delay.is_finite() && delay > 0.0 {
            Duration::from_millis(delay as u64)
        } else {
            Duration::ZERO
        }
    }

    /// Run `operation` until it succeeds, fails non-transiently, or the
    /// attempt bound is reached. The operation is re-invoked from scratch
    /// on each attempt.
    pub async fn run<T, F, Fut>(&self, element: &str, mut operation: F) -> Result<T, RetryFailure>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DriverError>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_transient() => return Err(RetryFailure::Fatal(e)),
                Err(e) if attempt >= attempts => {
                    return Err(RetryFailure::Exhausted { attempts, last: e });
                }
                Err(e) => {
                    let delay = self.delay_for_attempt(attempt);
                    warn!(
                        element,
                        attempt,
                        max_attempts = attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Field operation failed, retrying"
                    );
                    if !delay.is_zero() {
                        sleep(delay).await;
                    }
                    attempt += 1;
                    debug!(element, attempt, "Retrying field operation");
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
