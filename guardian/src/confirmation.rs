//! Waits for submitted transactions to land.

use crate::config::GuardianConfig;
use crate::error::{GuardianError, Result};
use crate::rpc::SorobanRpcClient;
use crate::types::{TransactionInfo, TransactionStatus};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Polling options
#[derive(Debug, Clone)]
pub struct ConfirmationOptions {
    /// Poll interval (in milliseconds)
    pub poll_interval_ms: u64,
    /// Timeout (in seconds)
    pub timeout_secs: u64,
}

impl ConfirmationOptions {
    pub fn from_config(config: &GuardianConfig) -> Self {
        Self {
            poll_interval_ms: config.tx_poll_interval_ms,
            timeout_secs: config.tx_timeout_secs,
        }
    }

    pub fn with_poll_interval(mut self, interval_ms: u64) -> Self {
        self.poll_interval_ms = interval_ms;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Final state of a watched transaction
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmation {
    /// Applied successfully
    Confirmed(TransactionInfo),
    /// Applied but failed
    Failed(TransactionInfo),
    /// Still unknown when the timeout elapsed
    Timeout,
}

/// Polls `getTransaction` until a transaction succeeds, fails or times out
#[derive(Clone)]
pub struct TransactionConfirmer {
    rpc: SorobanRpcClient,
    options: ConfirmationOptions,
}

impl TransactionConfirmer {
    pub fn new(rpc: SorobanRpcClient, options: ConfirmationOptions) -> Self {
        Self { rpc, options }
    }

    pub fn options(&self) -> &ConfirmationOptions {
        &self.options
    }

    pub async fn wait(&self, tx_hash: &str) -> Result<Confirmation> {
        info!(
            hash = tx_hash,
            timeout_secs = self.options.timeout_secs,
            "waiting for confirmation"
        );

        let start = Instant::now();
        let timeout = Duration::from_secs(self.options.timeout_secs);
        let poll_interval = Duration::from_millis(self.options.poll_interval_ms);

        loop {
            if start.elapsed() >= timeout {
                warn!(hash = tx_hash, "confirmation timed out");
                return Ok(Confirmation::Timeout);
            }

            match self.rpc.get_transaction(tx_hash).await {
                Ok(info) => match info.status {
                    TransactionStatus::Success => {
                        info!(hash = tx_hash, ledger = info.ledger, "transaction confirmed");
                        return Ok(Confirmation::Confirmed(info));
                    }
                    TransactionStatus::Failed => {
                        warn!(hash = tx_hash, ledger = info.ledger, "transaction failed");
                        return Ok(Confirmation::Failed(info));
                    }
                    TransactionStatus::Pending | TransactionStatus::NotFound => {
                        debug!(hash = tx_hash, "transaction pending");
                    }
                },
                Err(GuardianError::TransactionNotFound(_)) => {
                    debug!(hash = tx_hash, "transaction not yet in ledger");
                }
                Err(e) if crate::retry::RetryStrategy::is_retryable(&e) => {
                    debug!(hash = tx_hash, "error fetching transaction: {:?}", e);
                }
                Err(e) => return Err(e),
            }

            sleep(poll_interval).await;
        }
    }
}
