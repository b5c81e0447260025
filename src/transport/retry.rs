use bon::Builder;
use reqwest::StatusCode;
use std::time::Duration;

/// Upper bound on a single backoff sleep.
pub const MAX_BACKOFF: Duration = Duration::from_secs(120);

/// How often and how patiently a failed request is retried.
///
/// The first retry happens immediately; retry `n >= 2` sleeps
/// `backoff_factor * 2^(n - 1)` seconds, capped at [`MAX_BACKOFF`]. With the
/// defaults this gives 0, 0.4, 0.8, 1.6 and 3.2 seconds.
///
/// # Examples
///
/// ```
/// use annual_rainfall::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::builder().max_retries(3).backoff_factor(1.0).build();
/// assert_eq!(policy.delay_for_retry(1), Duration::ZERO);
/// assert_eq!(policy.delay_for_retry(3), Duration::from_secs(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    #[builder(default = 5)]
    pub max_retries: u32,
    /// Base of the exponential backoff, in seconds.
    #[builder(default = 0.2)]
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RetryPolicy {
    /// A policy that never waits between attempts. Handy for tests.
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff_factor: 0.0,
        }
    }

    /// Sleep before the `retry`-th retry (1-based).
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        if retry <= 1 || self.backoff_factor <= 0.0 {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(retry - 1).unwrap_or(i32::MAX);
        let seconds = self.backoff_factor * 2f64.powi(exponent);
        if !seconds.is_finite() || seconds >= MAX_BACKOFF.as_secs_f64() {
            return MAX_BACKOFF;
        }
        Duration::from_secs_f64(seconds)
    }

    /// Total number of requests sent before giving up.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    pub fn is_retryable_status(status: StatusCode) -> bool {
        status.is_server_error()
    }
}
