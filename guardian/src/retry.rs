//! Retry with exponential backoff for RPC calls.

use crate::config::GuardianConfig;
use crate::error::{GuardianError, Result};
use backoff::{backoff::Backoff, ExponentialBackoff, ExponentialBackoffBuilder};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry strategy configuration
#[derive(Debug, Clone)]
pub struct RetryStrategy {
    /// Maximum number of retries
    pub max_retries: usize,
    /// Initial retry delay
    pub initial_delay: Duration,
    /// Maximum retry delay
    pub max_delay: Duration,
    /// Backoff multiplier
    pub multiplier: f64,
}

impl RetryStrategy {
    pub fn from_config(config: &GuardianConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_delay: Duration::from_millis(config.retry_initial_delay_ms),
            max_delay: Duration::from_millis(config.retry_max_delay_ms),
            multiplier: config.retry_multiplier,
        }
    }

    fn create_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(self.initial_delay)
            .with_max_interval(self.max_delay)
            .with_multiplier(self.multiplier)
            .with_max_elapsed_time(None)
            .build()
    }

    /// Transport failures, throttling and 5xx responses are retried.
    /// Contract rejections and malformed requests are not.
    pub fn is_retryable(error: &GuardianError) -> bool {
        match error {
            GuardianError::NetworkError(_) => true,
            GuardianError::RateLimitExceeded(_) => true,
            GuardianError::SorobanRpcError(msg) => {
                msg.contains("500") || msg.contains("502") || msg.contains("503")
            }
            GuardianError::InvalidResponse(_) => true,
            _ => false,
        }
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error, or
    /// `max_retries` is exhausted.
    pub async fn retry<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut backoff = self.create_backoff();
        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!(attempt = attempts, max = self.max_retries + 1, "rpc attempt");

            match operation().await {
                Ok(result) => {
                    if attempts > 1 {
                        debug!("Operation succeeded after {} attempts", attempts);
                    }
                    return Ok(result);
                }
                Err(error) => {
                    if !Self::is_retryable(&error) {
                        warn!("Non-retryable error: {:?}", error);
                        return Err(error);
                    }

                    if attempts > self.max_retries {
                        warn!(
                            "Max retries ({}) exceeded. Last error: {:?}",
                            self.max_retries, error
                        );
                        return Err(GuardianError::MaxRetriesExceeded(self.max_retries));
                    }

                    let delay = match &error {
                        GuardianError::RateLimitExceeded(secs) => Duration::from_secs(*secs),
                        _ => match backoff.next_backoff() {
                            Some(d) => d,
                            None => {
                                warn!("Backoff exhausted");
                                return Err(GuardianError::MaxRetriesExceeded(self.max_retries));
                            }
                        },
                    };

                    warn!(
                        "Attempt {} failed: {:?}. Retrying in {:?}",
                        attempts, error, delay
                    );

                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
