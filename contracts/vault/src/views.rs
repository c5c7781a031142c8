//! # Views: read-only position and protocol queries
//!
//! None of these functions modify state. `get_health_factor` is the read the
//! off-chain guardian polls, so it stays a single storage lookup plus the
//! ratio computation.

use soroban_sdk::{contracttype, Address, Env};

use crate::health::MIN_HEALTH_FACTOR;
use crate::position::load_position;
use crate::stablecoin::DebtAssetBinding;
use crate::storage;

/// Position snapshot for frontends and the guardian monitor.
#[contracttype]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionSummary {
    /// Deposited collateral
    pub collateral: i128,
    /// Outstanding debt
    pub debt: i128,
    /// Health factor in 18-decimal fixed point; `i128::MAX` when debt is zero
    pub health_factor: i128,
    /// Whether the position meets the 150% minimum
    pub healthy: bool,
}

pub fn get_collateral(env: &Env, user: &Address) -> i128 {
    load_position(env, user).collateral
}

pub fn get_debt(env: &Env, user: &Address) -> i128 {
    load_position(env, user).debt
}

pub fn get_health_factor(env: &Env, user: &Address) -> i128 {
    load_position(env, user).health_factor(env)
}

pub fn get_position(env: &Env, user: &Address) -> PositionSummary {
    let position = load_position(env, user);
    PositionSummary {
        collateral: position.collateral,
        debt: position.debt,
        health_factor: position.health_factor(env),
        healthy: position.is_healthy(env),
    }
}

pub fn total_collateral(env: &Env) -> i128 {
    storage::total_collateral(env)
}

pub fn total_debt(env: &Env) -> i128 {
    storage::total_debt(env)
}

pub fn guardian(env: &Env) -> Option<Address> {
    storage::guardian(env)
}

pub fn stablecoin(env: &Env) -> Option<Address> {
    match DebtAssetBinding::load(env) {
        DebtAssetBinding::Token(token) => Some(token),
        DebtAssetBinding::Internal => None,
    }
}

pub fn min_health_factor() -> i128 {
    MIN_HEALTH_FACTOR
}
