use soroban_sdk::{Address, Env};

use crate::errors::VaultError;
use crate::events::Minted;
use crate::position::{add_total_debt, load_position, save_position};
use crate::reentrancy::ReentrancyGuard;
use crate::stablecoin::{DebtAsset, DebtAssetBinding};

/// Mint debt against deposited collateral
///
/// # Arguments
/// * `env` - The contract environment
/// * `user` - The borrower's address (must authorize)
/// * `amount` - The amount of debt to mint
///
/// # Returns
/// Returns the user's updated debt
///
/// # Errors
/// * `ZeroAmount` - Amount is zero or negative
/// * `UnhealthyPosition` - Resulting health factor would be below 150%
/// * `TransferFailed` - The bound debt asset refused to mint
/// * `Reentrancy` - Called from inside another vault operation
pub fn mint(env: &Env, user: Address, amount: i128) -> Result<i128, VaultError> {
    user.require_auth();
    let _guard = ReentrancyGuard::enter(env)?;

    if amount <= 0 {
        return Err(VaultError::ZeroAmount);
    }

    let mut position = load_position(env, &user);
    position.debt = position
        .debt
        .checked_add(amount)
        .ok_or(VaultError::Overflow)?;

    if !position.is_healthy(env) {
        return Err(VaultError::UnhealthyPosition);
    }

    save_position(env, &user, &position);
    add_total_debt(env, amount)?;

    DebtAssetBinding::load(env).mint(env, &user, amount)?;

    Minted {
        user,
        amount,
        debt: position.debt,
        health_factor: position.health_factor(env),
    }
    .publish(env);

    Ok(position.debt)
}
