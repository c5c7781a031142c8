//! Data types shared by the RPC client, gateway and monitor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction hash type
pub type TransactionHash = String;

/// Account or contract strkey
pub type AccountAddress = String;

/// Transaction status enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Transaction is pending
    Pending,
    /// Transaction was successful
    Success,
    /// Transaction failed
    Failed,
    /// Transaction not found
    NotFound,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "PENDING"),
            TransactionStatus::Success => write!(f, "SUCCESS"),
            TransactionStatus::Failed => write!(f, "FAILED"),
            TransactionStatus::NotFound => write!(f, "NOT_FOUND"),
        }
    }
}

/// Result of `getTransaction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionInfo {
    /// Transaction hash
    pub hash: TransactionHash,
    /// Current status
    pub status: TransactionStatus,
    /// Ledger the transaction was applied in (0 while pending)
    pub ledger: u64,
    /// Result XDR
    pub result_xdr: Option<String>,
}

/// Result of `getHealth`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcHealth {
    /// `"healthy"` when the node is in sync
    pub status: String,
    #[serde(default)]
    pub latest_ledger: u64,
    #[serde(default)]
    pub oldest_ledger: u64,
    #[serde(default)]
    pub ledger_retention_window: u64,
}

impl RpcHealth {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Result of `getLatestLedger`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestLedger {
    /// Ledger hash
    pub id: String,
    pub protocol_version: u32,
    /// Ledger sequence number
    pub sequence: u64,
}

/// Result of `simulateTransaction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateTransactionResult {
    /// Base64 `ScVal` returned by the invoked function
    pub result_xdr: Option<String>,
    /// Base64 `SorobanTransactionData` footprint
    pub transaction_data: Option<String>,
    /// Minimum resource fee in stroops
    pub min_resource_fee: String,
    pub latest_ledger: u64,
    /// Host error when the invocation failed
    pub error: Option<String>,
}

impl SimulateTransactionResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Position as read from the vault's `get_position` view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub account: AccountAddress,
    pub collateral: i128,
    pub debt: i128,
    /// 18-decimal fixed point, `i128::MAX` when debt is zero
    pub health_factor: i128,
}

impl PositionSnapshot {
    pub fn has_debt(&self) -> bool {
        self.debt > 0
    }

    /// True when the position has debt and sits strictly below `min_health_factor`
    pub fn needs_repay(&self, min_health_factor: i128) -> bool {
        self.has_debt() && self.health_factor < min_health_factor
    }
}
