//! Guardian monitor: sweeps tracked positions and flash-repays the unhealthy ones.
//!
//! A sweep reads every tracked account, skips positions without debt or at/above
//! the minimum health factor, and repays the full outstanding debt of any
//! position below it. Failures are recorded per account; one bad account never
//! aborts the sweep.

use crate::config::GuardianConfig;
use crate::confirmation::{Confirmation, ConfirmationOptions, TransactionConfirmer};
use crate::error::Result;
use crate::gateway::VaultGateway;
use crate::rpc::SorobanRpcClient;
use crate::types::{AccountAddress, TransactionHash};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

/// What happened to one account during a sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SweepOutcome {
    /// No outstanding debt
    NoDebt { account: AccountAddress },
    /// Debt present but at or above the threshold
    Healthy {
        account: AccountAddress,
        health_factor: i128,
    },
    /// Full debt flash-repaid and confirmed
    Repaid {
        account: AccountAddress,
        amount: i128,
        tx_hash: TransactionHash,
    },
    /// The repay transaction was applied but failed on chain
    RepayFailed {
        account: AccountAddress,
        tx_hash: TransactionHash,
    },
    /// The repay transaction did not confirm within the timeout
    RepayTimedOut {
        account: AccountAddress,
        tx_hash: TransactionHash,
    },
    /// Reading or repaying the position errored
    Error {
        account: AccountAddress,
        error: String,
    },
}

impl SweepOutcome {
    pub fn account(&self) -> &str {
        match self {
            SweepOutcome::NoDebt { account }
            | SweepOutcome::Healthy { account, .. }
            | SweepOutcome::Repaid { account, .. }
            | SweepOutcome::RepayFailed { account, .. }
            | SweepOutcome::RepayTimedOut { account, .. }
            | SweepOutcome::Error { account, .. } => account,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            SweepOutcome::RepayFailed { .. }
                | SweepOutcome::RepayTimedOut { .. }
                | SweepOutcome::Error { .. }
        )
    }
}

/// Outcomes of one sweep, in tracked-account order
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<SweepOutcome>,
}

impl SweepReport {
    pub fn repaid(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SweepOutcome::Repaid { .. }))
            .count()
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }
}

pub struct GuardianMonitor<G> {
    gateway: Arc<G>,
    confirmer: TransactionConfirmer,
    config: Arc<GuardianConfig>,
}

impl<G: VaultGateway> GuardianMonitor<G> {
    pub fn new(config: Arc<GuardianConfig>, gateway: Arc<G>) -> Result<Self> {
        config.validate()?;

        info!(
            network = ?config.network,
            vault = %config.vault_contract_id,
            accounts = config.tracked_accounts.len(),
            "initializing guardian monitor"
        );

        let rpc = SorobanRpcClient::new(config.clone())?;
        let confirmer = TransactionConfirmer::new(rpc, ConfirmationOptions::from_config(&config));

        Ok(Self {
            gateway,
            confirmer,
            config,
        })
    }

    pub fn config(&self) -> &GuardianConfig {
        &self.config
    }

    /// Evaluate one account and repay it if needed
    pub async fn check_account(&self, account: &str) -> SweepOutcome {
        let min_health_factor = self.config.min_health_factor_fixed();

        let position = match self.gateway.position(account).await {
            Ok(position) => position,
            Err(e) => {
                error!(account, "failed to read position: {}", e);
                return SweepOutcome::Error {
                    account: account.to_string(),
                    error: e.to_string(),
                };
            }
        };

        if !position.has_debt() {
            debug!(account, "no debt");
            return SweepOutcome::NoDebt {
                account: account.to_string(),
            };
        }
        if !position.needs_repay(min_health_factor) {
            debug!(account, health_factor = %position.health_factor, "healthy");
            return SweepOutcome::Healthy {
                account: account.to_string(),
                health_factor: position.health_factor,
            };
        }

        warn!(
            account,
            health_factor = %position.health_factor,
            debt = %position.debt,
            "position below minimum, flash-repaying full debt"
        );

        let tx_hash = match self.gateway.flash_repay(account, position.debt).await {
            Ok(hash) => hash,
            Err(e) => {
                error!(account, "flash-repay submission failed: {}", e);
                return SweepOutcome::Error {
                    account: account.to_string(),
                    error: e.to_string(),
                };
            }
        };

        match self.confirmer.wait(&tx_hash).await {
            Ok(Confirmation::Confirmed(_)) => {
                info!(account, hash = %tx_hash, amount = %position.debt, "flash-repay confirmed");
                SweepOutcome::Repaid {
                    account: account.to_string(),
                    amount: position.debt,
                    tx_hash,
                }
            }
            Ok(Confirmation::Failed(_)) => SweepOutcome::RepayFailed {
                account: account.to_string(),
                tx_hash,
            },
            Ok(Confirmation::Timeout) => SweepOutcome::RepayTimedOut {
                account: account.to_string(),
                tx_hash,
            },
            Err(e) => {
                error!(account, hash = %tx_hash, "confirmation failed: {}", e);
                SweepOutcome::Error {
                    account: account.to_string(),
                    error: e.to_string(),
                }
            }
        }
    }

    /// Evaluate every tracked account once
    pub async fn sweep(&self) -> SweepReport {
        let started_at = Utc::now();

        let outcomes: Vec<SweepOutcome> = stream::iter(self.config.tracked_accounts.iter())
            .map(|account| self.check_account(account))
            .buffered(self.config.sweep_concurrency)
            .collect()
            .await;

        let report = SweepReport {
            started_at,
            finished_at: Utc::now(),
            outcomes,
        };
        info!(
            accounts = report.outcomes.len(),
            repaid = report.repaid(),
            failures = report.failures(),
            "sweep finished"
        );
        if let Ok(json) = serde_json::to_string(&report) {
            debug!(report = %json, "sweep report");
        }
        report
    }

    /// Sweep on every poll interval until `shutdown` resolves
    pub async fn run<S>(&self, shutdown: S) -> Result<()>
    where
        S: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval(self.config.poll_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!(
            interval_ms = self.config.poll_interval_ms,
            "guardian monitor started"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("guardian monitor stopping");
                    return Ok(());
                }
                _ = interval.tick() => {
                    self.sweep().await;
                }
            }
        }
    }
}
