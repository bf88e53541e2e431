//! Retry policy for identity service calls.
//!
//! Provides exponential backoff with jitter for transient errors. A policy
//! governs retries of one request; callers resolve it before the call.

use rand::Rng;
use std::time::Duration;
use tfo_error::{ErrorCategory, Result, classify_error};
use tokio::time::sleep;
use tracing::warn;

/// Service category whose policy lists compartments.
pub const IDENTITY_SERVICE: &str = "identity";

/// Retry behavior for a single service request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Service category the policy was resolved for.
    pub service: String,
    /// Maximum number of retries before giving up.
    pub max_retries: u32,
    /// Initial backoff duration in milliseconds.
    pub initial_backoff_ms: u64,
    /// Maximum backoff duration in milliseconds.
    pub max_backoff_ms: u64,
    /// Whether to add jitter to backoff times.
    pub jitter: bool,
    /// Whether 404 responses are retried (eventual consistency).
    pub retry_not_found: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            service: IDENTITY_SERVICE.to_string(),
            max_retries: 8,
            initial_backoff_ms: 1000,
            max_backoff_ms: 30_000,
            jitter: true,
            retry_not_found: true,
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the policy for a service category.
    ///
    /// Every category shares the same backoff shape; only the name differs.
    pub fn for_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            ..Self::default()
        }
    }

    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self::default().with_max_retries(0)
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the initial backoff in milliseconds.
    pub fn with_initial_backoff_ms(mut self, initial_backoff_ms: u64) -> Self {
        self.initial_backoff_ms = initial_backoff_ms;
        self
    }

    /// Set the maximum backoff in milliseconds.
    pub fn with_max_backoff_ms(mut self, max_backoff_ms: u64) -> Self {
        self.max_backoff_ms = max_backoff_ms;
        self
    }

    /// Enable or disable jitter.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Enable or disable retries of 404 responses.
    pub fn with_not_found_retries(mut self, retry_not_found: bool) -> Self {
        self.retry_not_found = retry_not_found;
        self
    }

    /// Calculate the backoff duration for a given attempt.
    pub fn backoff_duration(&self, attempt: u32) -> Duration {
        let base_ms = self
            .initial_backoff_ms
            .saturating_mul(2u64.saturating_pow(attempt));
        let capped_ms = base_ms.min(self.max_backoff_ms);

        let final_ms = if self.jitter {
            let jitter_range = capped_ms / 4; // 25% jitter
            let jitter = rand::rng().random_range(0..=jitter_range);
            capped_ms.saturating_add(jitter)
        } else {
            capped_ms
        };

        Duration::from_millis(final_ms)
    }
}

/// Execute an async operation under a retry policy.
///
/// Transient errors are retried with backoff until the policy's retries run
/// out; permanent errors return immediately. The error returned is the last
/// one the operation produced, unchanged.
pub async fn with_retry<F, Fut, T>(
    policy: &RetryPolicy,
    operation_name: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut attempt = 0;

    loop {
        let error = match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };

        if classify_error(&error, policy.retry_not_found) == ErrorCategory::Permanent {
            warn!(
                service = %policy.service,
                operation = operation_name,
                attempt = attempt,
                error = %error,
                "Non-retryable error"
            );
            return Err(error);
        }

        if attempt >= policy.max_retries {
            warn!(
                service = %policy.service,
                operation = operation_name,
                attempts = attempt + 1,
                error = %error,
                "Retries exhausted"
            );
            return Err(error);
        }

        let backoff = policy.backoff_duration(attempt);
        warn!(
            service = %policy.service,
            operation = operation_name,
            attempt = attempt,
            error = %error,
            backoff_ms = backoff.as_millis(),
            "Retryable error, backing off"
        );
        sleep(backoff).await;
        attempt += 1;
    }
}
