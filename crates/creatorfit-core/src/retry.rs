//! Retry with exponential back-off and jitter for the outbound clients.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries
//! while the error reports itself [`Transient`]. Permanent errors are
//! returned immediately so a bad request never burns upstream quota.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Upper bound on a single back-off sleep.
pub const MAX_DELAY_MS: u64 = 60_000;

/// Error classification consulted by [`retry_with_backoff`].
pub trait Transient {
    /// `true` when a later attempt could plausibly succeed.
    fn is_transient(&self) -> bool;

    /// Minimum wait the upstream asked for, if any.
    fn retry_after_ms(&self) -> Option<u64> {
        None
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 1_000`:
///
/// | Attempt | Sleep before next attempt        |
/// |---------|----------------------------------|
/// | 1       | 1 000 ms × 2⁰ ± 25 % jitter     |
/// | 2       | 1 000 ms × 2¹ ± 25 % jitter     |
///
/// An upstream retry hint waits at least that long. Delay is capped at
/// [`MAX_DELAY_MS`]. `upstream` names the service in log lines.
pub async fn retry_with_backoff<T, E, F, Fut>(
    upstream: &str,
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, E>
where
    E: Transient + Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_transient() || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms = backoff_delay_ms(&err, attempt, backoff_base_ms);
                tracing::warn!(
                    upstream,
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient upstream error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

/// Worst-case total sleep across `max_retries` back-offs, ignoring
/// upstream hints.
#[must_use]
pub fn max_total_backoff_ms(max_retries: u32, backoff_base_ms: u64) -> u64 {
    (1..=max_retries)
        .map(|attempt| {
            let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
            let capped = computed.min(MAX_DELAY_MS);
            // +25 % jitter ceiling.
            capped.saturating_add(capped.div_ceil(4)).min(MAX_DELAY_MS)
        })
        .fold(0, u64::saturating_add)
}

/// Delay before retry number `attempt` (1-based).
#[must_use]
pub fn backoff_delay_ms<E: Transient>(err: &E, attempt: u32, backoff_base_ms: u64) -> u64 {
    let computed = backoff_base_ms.saturating_mul(1u64 << attempt.saturating_sub(1).min(10));
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered =
        (computed.min(MAX_DELAY_MS) as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;

    let floor_ms = err.retry_after_ms().unwrap_or(0);
    jittered.max(floor_ms).min(MAX_DELAY_MS)
}
