//! Bounded retry for completion calls
//!
//! A call is attempted once and retried at most [`MAX_RETRIES_CAP`] times,
//! and only when the error reports itself as transient. Delays grow
//! exponentially with optional jitter, capped at `max_delay`.

use rand::Rng;
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Upper bound on retries regardless of configuration
pub const MAX_RETRIES_CAP: u32 = 1;

/// Configuration for retry behavior with exponential backoff
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retry attempts after the initial one, never above [`MAX_RETRIES_CAP`]
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES_CAP,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// No retries at all
    pub fn disabled() -> Self {
        Self::default().with_max_retries(0)
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.min(MAX_RETRIES_CAP);
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }
}

/// Trait for errors that can be classified as retryable or non-retryable
pub trait RetryableError {
    /// Returns true if the error is transient
    fn is_retryable(&self) -> bool;

    /// Short error category for logging
    fn error_type(&self) -> String;

    fn error_message(&self) -> String;
}

pub type BoxedAttempt<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'static>>;

/// Run `operation` until it succeeds, fails permanently, or retries run out.
/// The last error is returned unchanged.
pub async fn execute_with_retry<F, T, E>(config: &RetryConfig, operation: F) -> Result<T, E>
where
    F: Fn() -> BoxedAttempt<T, E> + Send + Sync,
    E: RetryableError + Send + 'static,
{
    let start_time = Instant::now();
    let max_retries = config.max_retries.min(MAX_RETRIES_CAP);
    let mut attempt = 0;

    loop {
        debug!(
            "Attempt {}/{} (elapsed: {:?})",
            attempt + 1,
            max_retries + 1,
            start_time.elapsed()
        );

        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    info!(
                        "Operation succeeded after {} retries ({:?})",
                        attempt,
                        start_time.elapsed()
                    );
                }
                return Ok(result);
            }
            Err(error) => {
                if attempt >= max_retries || !error.is_retryable() {
                    warn!(
                        error_type = %error.error_type(),
                        retryable = error.is_retryable(),
                        "Operation failed permanently: {} (attempt {}/{})",
                        error.error_message(),
                        attempt + 1,
                        max_retries + 1
                    );
                    return Err(error);
                }

                let delay = calculate_backoff_delay(config, attempt);
                warn!(
                    error_type = %error.error_type(),
                    "Operation failed, retrying in {:?}: {}",
                    delay,
                    error.error_message()
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// Calculate backoff delay with exponential growth and optional ±10% jitter
fn calculate_backoff_delay(config: &RetryConfig, attempt: u32) -> Duration {
    let base_delay = config.initial_delay.as_millis() as f64;
    let exponential_delay = base_delay * config.backoff_multiplier.powi(attempt as i32);

    let mut delay =
        Duration::from_millis(exponential_delay.min(config.max_delay.as_millis() as f64) as u64);

    if config.jitter {
        let jitter_range = delay.as_millis() as f64 * 0.1;
        if jitter_range > 0.0 {
            let jitter = rand::thread_rng().gen_range(-jitter_range..jitter_range);
            delay = Duration::from_millis((delay.as_millis() as f64 + jitter).max(0.0) as u64);
        }
    }

    delay
}
