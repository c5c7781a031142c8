//! Storage layout for the vault.
//!
//! Configuration and protocol totals live in instance storage; per-account
//! positions live in persistent storage keyed by account.

use soroban_sdk::{contracttype, Address, Env};

use crate::errors::VaultError;

pub(crate) const DAY_IN_LEDGERS: u32 = 17280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
pub(crate) const POSITION_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const POSITION_LIFETIME_THRESHOLD: u32 = POSITION_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Storage keys for vault data
#[contracttype]
#[derive(Clone)]
pub enum VaultDataKey {
    /// Token contract holding deposited collateral
    CollateralAsset,
    /// Current guardian
    Guardian,
    /// Bound debt asset, unset until `set_stablecoin`
    Stablecoin,
    /// Sum of all positions' collateral
    TotalCollateral,
    /// Sum of all positions' debt
    TotalDebt,
    /// Per-account position
    Position(Address),
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn collateral_asset(env: &Env) -> Result<Address, VaultError> {
    env.storage()
        .instance()
        .get(&VaultDataKey::CollateralAsset)
        .ok_or(VaultError::NotInitialized)
}

pub fn set_collateral_asset(env: &Env, asset: &Address) {
    env.storage()
        .instance()
        .set(&VaultDataKey::CollateralAsset, asset);
}

pub fn guardian(env: &Env) -> Option<Address> {
    env.storage().instance().get(&VaultDataKey::Guardian)
}

pub fn set_guardian(env: &Env, guardian: &Address) {
    env.storage().instance().set(&VaultDataKey::Guardian, guardian);
}

pub fn stablecoin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&VaultDataKey::Stablecoin)
}

pub fn set_stablecoin(env: &Env, token: &Address) {
    env.storage().instance().set(&VaultDataKey::Stablecoin, token);
}

pub fn total_collateral(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&VaultDataKey::TotalCollateral)
        .unwrap_or(0)
}

pub fn set_total_collateral(env: &Env, amount: i128) {
    env.storage()
        .instance()
        .set(&VaultDataKey::TotalCollateral, &amount);
}

pub fn total_debt(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&VaultDataKey::TotalDebt)
        .unwrap_or(0)
}

pub fn set_total_debt(env: &Env, amount: i128) {
    env.storage().instance().set(&VaultDataKey::TotalDebt, &amount);
}
