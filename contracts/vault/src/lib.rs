//! # Aegis Vault
//!
//! Single-collateral vault: users deposit the collateral asset, mint debt
//! against it, repay and withdraw. A guardian address may force-repay
//! (flash-repay) any position, which lets an off-chain monitor pull unhealthy
//! positions back above the safety threshold.
//!
//! Collateral and debt are valued 1:1. Every debt-increasing or
//! collateral-decreasing operation must leave the position at a health factor
//! of at least 150%; positions without debt are unconstrained.
//!
//! Debt lives in the vault's own ledger. A debt token can be bound once, while
//! no debt exists, after which mint/repay/flash-repay also mint and burn it.

#![no_std]
use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Env};

mod deposit;
mod errors;
mod events;
mod guardian;
mod health;
mod mint;
mod position;
mod reentrancy;
mod repay;
mod stablecoin;
mod storage;
mod views;
mod withdraw;

pub use errors::VaultError;
pub use health::{HEALTH_FACTOR_NO_DEBT, MIN_HEALTH_FACTOR, SCALE};
pub use position::Position;
pub use stablecoin::{DebtAsset, DebtAssetBinding};
pub use views::PositionSummary;

#[cfg(test)]
mod test_helpers;

#[cfg(test)]
mod deposit_test;








#[cfg(test)]
mod events_test;

#[contract]
pub struct AegisVault;

#[contractimpl]
impl AegisVault {
    /// Register the vault against its collateral asset
    ///
    /// # Arguments
    /// * `collateral_asset` - Token contract of the collateral (the native asset contract in production)
    pub fn __constructor(env: Env, collateral_asset: Address) {
        if guardian::is_zero_address(&env, &collateral_asset) {
            panic_with_error!(&env, VaultError::ZeroAddress);
        }
        storage::set_collateral_asset(&env, &collateral_asset);
        storage::extend_instance_ttl(&env);
    }

    /// Deposit collateral
    ///
    /// Pulls `amount` of the collateral asset from `user` and credits it to
    /// their position.
    ///
    /// # Arguments
    /// * `user` - The depositor's address (must authorize)
    /// * `amount` - The amount to deposit
    ///
    /// # Returns
    /// The user's collateral after the deposit
    ///
    /// # Errors
    /// - `ZeroAmount` - Amount is zero or negative
    /// - `TransferFailed` - The collateral transfer failed
    pub fn deposit(env: Env, user: Address, amount: i128) -> Result<i128, VaultError> {
        storage::extend_instance_ttl(&env);
        deposit::deposit(&env, user, amount)
    }

    /// Withdraw collateral
    ///
    /// # Arguments
    /// * `user` - The withdrawer's address (must authorize)
    /// * `amount` - The amount to withdraw
    ///
    /// # Returns
    /// The user's remaining collateral
    ///
    /// # Errors
    /// - `ZeroAmount` - Amount is zero or negative
    /// - `InsufficientCollateral` - Amount exceeds deposited collateral
    /// - `UnhealthyPosition` - Position would fall below 150% while in debt
    /// - `TransferFailed` - The collateral transfer failed
    pub fn withdraw(env: Env, user: Address, amount: i128) -> Result<i128, VaultError> {
        storage::extend_instance_ttl(&env);
        withdraw::withdraw(&env, user, amount)
    }

    /// Mint debt against collateral
    ///
    /// # Arguments
    /// * `user` - The borrower's address (must authorize)
    /// * `amount` - The amount of debt to mint
    ///
    /// # Returns
    /// The user's debt after minting
    ///
    /// # Errors
    /// - `ZeroAmount` - Amount is zero or negative
    /// - `UnhealthyPosition` - Position would fall below 150%
    /// - `TransferFailed` - The bound debt token could not be minted
    pub fn mint(env: Env, user: Address, amount: i128) -> Result<i128, VaultError> {
        storage::extend_instance_ttl(&env);
        mint::mint(&env, user, amount)
    }

    /// Repay debt, capped at the outstanding amount
    ///
    /// # Arguments
    /// * `user` - The borrower's address (must authorize)
    /// * `amount` - The amount to repay
    ///
    /// # Returns
    /// The user's remaining debt
    ///
    /// # Errors
    /// - `ZeroAmount` - Amount is zero or negative
    /// - `InsufficientDebt` - User has no debt
    /// - `TransferFailed` - The bound debt token could not be burned
    pub fn repay(env: Env, user: Address, amount: i128) -> Result<i128, VaultError> {
        storage::extend_instance_ttl(&env);
        repay::repay(&env, user, amount)
    }

    /// Force-repay a user's debt (guardian only)
    ///
    /// # Arguments
    /// * `caller` - The guardian (must authorize)
    /// * `user` - The account whose debt is repaid
    /// * `amount` - The amount to repay, capped at the user's debt
    ///
    /// # Returns
    /// The user's remaining debt
    ///
    /// # Errors
    /// - `OnlyGuardian` - Caller is not the guardian
    /// - `ZeroAddress` - `user` is the zero address
    /// - `ZeroAmount` - Amount is zero or negative
    /// - `InsufficientDebt` - User has no debt
    pub fn flash_repay(
        env: Env,
        caller: Address,
        user: Address,
        amount: i128,
    ) -> Result<i128, VaultError> {
        storage::extend_instance_ttl(&env);
        repay::flash_repay(&env, caller, user, amount)
    }

    /// Set the initial guardian (once)
    ///
    /// # Errors
    /// - `GuardianAlreadySet` - A guardian already exists
    /// - `ZeroAddress` - `guardian` is the zero address
    pub fn initialize_guardian(env: Env, guardian: Address) -> Result<(), VaultError> {
        storage::extend_instance_ttl(&env);
        guardian::initialize_guardian(&env, guardian)
    }

    /// Rotate the guardian (guardian only)
    ///
    /// # Errors
    /// - `OnlyGuardian` - Caller is not the guardian
    /// - `ZeroAddress` - `new_guardian` is the zero address
    pub fn set_guardian(env: Env, caller: Address, new_guardian: Address) -> Result<(), VaultError> {
        storage::extend_instance_ttl(&env);
        guardian::set_guardian(&env, caller, new_guardian)
    }

    /// Bind the debt token (guardian only, once, while total debt is zero)
    ///
    /// # Errors
    /// - `OnlyGuardian` - Caller is not the guardian
    /// - `ZeroAddress` - `token` is the zero address
    /// - `StablecoinAlreadySet` - A debt token is already bound
    /// - `DebtMustBeZeroToSetStablecoin` - Some debt is outstanding
    pub fn set_stablecoin(env: Env, caller: Address, token: Address) -> Result<(), VaultError> {
        storage::extend_instance_ttl(&env);
        stablecoin::set_stablecoin(&env, caller, token)
    }

    pub fn get_collateral(env: Env, user: Address) -> i128 {
        views::get_collateral(&env, &user)
    }

    pub fn get_debt(env: Env, user: Address) -> i128 {
        views::get_debt(&env, &user)
    }

    /// Health factor in 18-decimal fixed point (1.5e18 = 150%)
    ///
    /// Returns `i128::MAX` for positions without debt.
    pub fn get_health_factor(env: Env, user: Address) -> i128 {
        views::get_health_factor(&env, &user)
    }

    /// Collateral, debt and health of a position in one call
    pub fn get_position(env: Env, user: Address) -> PositionSummary {
        views::get_position(&env, &user)
    }

    pub fn total_collateral(env: Env) -> i128 {
        views::total_collateral(&env)
    }

    pub fn total_debt(env: Env) -> i128 {
        views::total_debt(&env)
    }

    pub fn guardian(env: Env) -> Option<Address> {
        views::guardian(&env)
    }

    pub fn stablecoin(env: Env) -> Option<Address> {
        views::stablecoin(&env)
    }

    pub fn collateral_asset(env: Env) -> Result<Address, VaultError> {
        storage::collateral_asset(&env)
    }

    pub fn min_health_factor(_env: Env) -> i128 {
        views::min_health_factor()
    }
}
