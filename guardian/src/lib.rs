//! Aegis Guardian
//!
//! Off-chain risk monitor for the Aegis Vault contract. The guardian account is the
//! only address allowed to call the vault's `flash_repay`; this crate watches a set
//! of positions and, whenever one falls below the vault's 150% minimum health
//! factor, repays its full debt and waits for the transaction to confirm.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use aegis_guardian::{GuardianConfig, GuardianMonitor, PositionSnapshot, Result, VaultGateway};
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct MyGateway;
//!
//! #[async_trait]
//! impl VaultGateway for MyGateway {
//!     async fn position(&self, account: &str) -> Result<PositionSnapshot> {
//!         unimplemented!()
//!     }
//!     async fn flash_repay(&self, account: &str, amount: i128) -> Result<String> {
//!         unimplemented!()
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Arc::new(GuardianConfig::load(None)?);
//!     let monitor = GuardianMonitor::new(config, Arc::new(MyGateway))?;
//!     monitor.run(async { tokio::signal::ctrl_c().await.ok(); }).await
//! }
//! ```

#![warn(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod confirmation;
pub mod error;
pub mod gateway;
pub mod monitor;
pub mod reader;
pub mod retry;
pub mod rpc;
pub mod types;

pub use config::{GuardianConfig, Network, DEFAULT_MIN_HEALTH_FACTOR};
pub use confirmation::{Confirmation, ConfirmationOptions, TransactionConfirmer};
pub use error::{GuardianError, Result};
pub use gateway::VaultGateway;
pub use monitor::{GuardianMonitor, SweepOutcome, SweepReport};
pub use reader::RpcVaultReader;
pub use retry::RetryStrategy;
pub use rpc::SorobanRpcClient;
pub use types::{
    AccountAddress, LatestLedger, PositionSnapshot, RpcHealth, SimulateTransactionResult,
    TransactionHash, TransactionInfo, TransactionStatus,
};
