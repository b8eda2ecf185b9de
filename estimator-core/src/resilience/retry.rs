use crate::error::EstimatorError;
use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

/// Bounded retry decisions for the outbound AI calls. Policies never retry
/// indefinitely; the adapter falls back to deterministic suggestions once a
/// policy gives up.
#[async_trait]
pub trait RetryPolicy: Send + Sync + Debug {
    async fn should_retry(&self, attempt: u32, error: &EstimatorError) -> bool;
    fn delay(&self, attempt: u32) -> Duration;
    fn max_attempts(&self) -> u32;
}

#[derive(Debug, Clone)]
pub struct ExponentialBackoffRetry {
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
}

impl ExponentialBackoffRetry {
    pub fn new(max_attempts: u32, initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            max_delay,
        }
    }
}

#[async_trait]
impl RetryPolicy for ExponentialBackoffRetry {
    async fn should_retry(&self, attempt: u32, error: &EstimatorError) -> bool {
        if attempt >= self.max_attempts {
            return false;
        }
        // Only transport-level failures are worth a second attempt
        matches!(
            error,
            EstimatorError::Network(_) | EstimatorError::Timeout(_)
        )
    }

    fn delay(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_secs_f64() * 2_f64.powi(attempt as i32);
        Duration::from_secs_f64(base.min(self.max_delay.as_secs_f64()))
    }

    fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

pub async fn retry_with_policy<F, Fut, T>(
    policy: &dyn RetryPolicy,
    mut f: F,
) -> Result<T, EstimatorError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, EstimatorError>>,
{
    let mut attempt = 0;
    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                attempt += 1;
                if !policy.should_retry(attempt, &e).await {
                    return Err(e);
                }
                let delay = policy.delay(attempt);
                tracing::debug!(attempt, ?delay, error = %e, "retrying after transport failure");
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn policy() -> ExponentialBackoffRetry {
        ExponentialBackoffRetry::new(2, Duration::from_millis(1), Duration::from_millis(4))
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_with_policy(&policy(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(EstimatorError::Timeout("upstream".to_string())) }
        })
        .await;
        assert!(result.is_err());
        // Initial call plus one retry
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_transport_errors_fail_fast() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_with_policy(&policy(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(EstimatorError::InvalidInput("bad prompt".to_string())) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let result = retry_with_policy(&policy(), || async { Ok(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }
}
