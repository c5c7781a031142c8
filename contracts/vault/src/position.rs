//! # Position Ledger
//!
//! Per-account `(collateral, debt)` records plus the protocol-wide totals that
//! mirror their sums. Every mutation of a position goes through this module so
//! that the totals move in the same step as the position they summarize.

use soroban_sdk::{contracttype, Address, Env};

use crate::errors::VaultError;
use crate::health;
use crate::storage::{self, VaultDataKey, POSITION_BUMP_AMOUNT, POSITION_LIFETIME_THRESHOLD};

/// Collateral and debt held by one account, both in 18-decimal units.
#[contracttype]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Position {
    /// Deposited collateral
    pub collateral: i128,
    /// Outstanding debt
    pub debt: i128,
}

impl Position {
    pub fn is_empty(&self) -> bool {
        self.collateral == 0 && self.debt == 0
    }

    pub fn health_factor(&self, env: &Env) -> i128 {
        health::health_factor(env, self.collateral, self.debt)
    }

    pub fn is_healthy(&self, env: &Env) -> bool {
        health::is_healthy(env, self.collateral, self.debt)
    }
}

/// Loads the position of `account`. Accounts that never deposited, or whose
/// position returned to zero, read as `Position::default()`.
pub fn load_position(env: &Env, account: &Address) -> Position {
    env.storage()
        .persistent()
        .get(&VaultDataKey::Position(account.clone()))
        .unwrap_or_default()
}

/// Persists `position`, dropping the entry once it is fully zeroed.
pub fn save_position(env: &Env, account: &Address, position: &Position) {
    let key = VaultDataKey::Position(account.clone());
    if position.is_empty() {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, POSITION_LIFETIME_THRESHOLD, POSITION_BUMP_AMOUNT);
}

pub fn add_total_collateral(env: &Env, amount: i128) -> Result<i128, VaultError> {
    let total = storage::total_collateral(env)
        .checked_add(amount)
        .ok_or(VaultError::Overflow)?;
    storage::set_total_collateral(env, total);
    Ok(total)
}

pub fn sub_total_collateral(env: &Env, amount: i128) -> Result<i128, VaultError> {
    let total = storage::total_collateral(env)
        .checked_sub(amount)
        .filter(|t| *t >= 0)
        .ok_or(VaultError::Overflow)?;
    storage::set_total_collateral(env, total);
    Ok(total)
}

pub fn add_total_debt(env: &Env, amount: i128) -> Result<i128, VaultError> {
    let total = storage::total_debt(env)
        .checked_add(amount)
        .ok_or(VaultError::Overflow)?;
    storage::set_total_debt(env, total);
    Ok(total)
}

pub fn sub_total_debt(env: &Env, amount: i128) -> Result<i128, VaultError> {
    let total = storage::total_debt(env)
        .checked_sub(amount)
        .filter(|t| *t >= 0)
        .ok_or(VaultError::Overflow)?;
    storage::set_total_debt(env, total);
    Ok(total)
}
