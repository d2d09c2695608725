//! Retry with exponential backoff and jitter
//!
//! The first call is attempt 1. After failure number `n`, if `n` does not
//! exceed `max_retries`, the retrier waits `base_delay * 2^(n-1)` plus a random
//! jitter of up to `jitter_ratio` of that delay, then calls again. A permanently
//! failing operation is therefore invoked `max_retries + 1` times, and the last
//! error is returned.
//!
//! Every error counts as transient. There is no circuit breaking and no
//! per-error policy.

use docsift_domain::traits::AnalysisObserver;
use rand::Rng;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Backoff parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt
    pub max_retries: u32,

    /// Delay before the first retry
    pub base_delay: Duration,

    /// Maximum jitter as a fraction of the computed delay
    pub jitter_ratio: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            jitter_ratio: 0.1,
        }
    }
}

impl RetryPolicy {
    /// Policy with the default jitter ratio
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            ..Self::default()
        }
    }

    /// Set the jitter ratio (clamped to `[0.0, 1.0]`)
    pub fn with_jitter_ratio(mut self, jitter_ratio: f64) -> Self {
        self.jitter_ratio = jitter_ratio.max(0.0).min(1.0);
        self
    }

    /// Total invocations of a permanently failing operation
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before the retry that follows failure number `failure` (1-based), without jitter
    pub fn backoff_delay(&self, failure: u32) -> Duration {
        let exponent = failure.saturating_sub(1);
        let factor = 2u32.checked_pow(exponent).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Random jitter in `[0, jitter_ratio * delay]`
    pub fn jitter<R: Rng + ?Sized>(&self, delay: Duration, rng: &mut R) -> Duration {
        if self.jitter_ratio <= 0.0 || delay.is_zero() {
            return Duration::ZERO;
        }
        let ratio = rng.gen_range(0.0..=self.jitter_ratio);
        Duration::try_from_secs_f64(delay.as_secs_f64() * ratio)
            .unwrap_or(Duration::MAX)
    }

    /// Backoff plus jitter before the retry that follows failure number `failure`
    ///
    /// Saturates at [`Duration::MAX`] for very large base delays or failure counts.
    pub fn retry_delay<R: Rng + ?Sized>(&self, failure: u32, rng: &mut R) -> Duration {
        let delay = self.backoff_delay(failure);
        delay.saturating_add(self.jitter(delay, rng))
    }
}

/// The operation failed on every allowed attempt
#[derive(Debug)]
pub struct RetryExhausted<E> {
    /// Total invocations made
    pub attempts: u32,
    /// Error from the final attempt
    pub source: E,
}

impl<E> RetryExhausted<E> {
    /// The final attempt's error
    pub fn into_inner(self) -> E {
        self.source
    }
}

impl<E: fmt::Display> fmt::Display for RetryExhausted<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed after {} attempts: {}",
            self.attempts, self.source
        )
    }
}

impl<E> std::error::Error for RetryExhausted<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Runs fallible async operations under a [`RetryPolicy`]
pub struct Retrier<'a> {
    policy: RetryPolicy,
    observer: &'a dyn AnalysisObserver,
}

impl<'a> Retrier<'a> {
    /// Create a retrier reporting to `observer`
    pub fn new(policy: RetryPolicy, observer: &'a dyn AnalysisObserver) -> Self {
        Self { policy, observer }
    }

    /// The policy in effect
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Call `operation` until it succeeds or the retry budget is spent
    ///
    /// Each failed attempt that will be retried is reported through
    /// [`AnalysisObserver::attempt_failed`] with the delay about to be slept;
    /// the terminal failure through [`AnalysisObserver::retries_exhausted`].
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, RetryExhausted<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let mut failures: u32 = 0;

        loop {
            let error = match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            failures += 1;
            let message = error.to_string();
            if failures > self.policy.max_retries {
                self.observer.retries_exhausted(failures, &message);
                return Err(RetryExhausted {
                    attempts: failures,
                    source: error,
                });
            }

            let delay = self.policy.retry_delay(failures, &mut rand::thread_rng());
            self.observer.attempt_failed(failures, delay, &message);
            tokio::time::sleep(delay).await;
        }
    }
}
