//! Rate-limit backoff coordinator
//!
//! The transport retries failures of the network itself. This layer re-runs
//! an operation that keeps answering 429 after an exponentially growing
//! sleep; every other failure passes straight through.

use crate::config::RetryConfig;
use crate::Result;
use std::future::Future;

/// Runs `operation`, retrying it while it fails with `RateLimited`
///
/// Attempt `n` (1-based) that is rate limited is followed by a sleep of
/// `backoff_base * 2^n` before attempt `n + 1`. Once
/// `max_rate_limit_attempts` attempts have been rate limited the last
/// `RateLimited` error is returned. Any other error is returned unchanged
/// on the attempt that produced it.
pub async fn with_backoff<T, F, Fut>(policy: &RetryConfig, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = policy.max_rate_limit_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Err(err) if err.is_rate_limited() && attempt < max_attempts => {
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    "Rate limited, retrying in {:?} (attempt {}/{})",
                    delay,
                    attempt,
                    max_attempts
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            outcome => return outcome,
        }
    }
}
