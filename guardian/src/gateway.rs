//! Boundary between the monitor and the vault contract.
//!
//! Reading a position is a contract simulation; flash-repaying is a signed
//! transaction from the guardian account. [`RpcVaultReader`](crate::reader::RpcVaultReader)
//! covers the read side; signing implementations plug in behind the same trait.

use crate::error::Result;
use crate::types::{PositionSnapshot, TransactionHash};
use async_trait::async_trait;

#[async_trait]
pub trait VaultGateway: Send + Sync {
    /// Read `account`'s position via the vault's `get_position` view
    async fn position(&self, account: &str) -> Result<PositionSnapshot>;

    /// Submit `flash_repay(guardian, account, amount)` and return the transaction hash
    /// once the network accepted it for inclusion.
    async fn flash_repay(&self, account: &str, amount: i128) -> Result<TransactionHash>;
}
