use soroban_sdk::{token::TokenClient, Address, Env};

use crate::errors::VaultError;
use crate::events::Withdrawn;
use crate::position::{load_position, save_position, sub_total_collateral};
use crate::reentrancy::ReentrancyGuard;
use crate::storage;

/// Withdraw collateral from the vault
///
/// The ledger is updated before the collateral leaves the vault, and the
/// outbound transfer is the last step. A failed transfer aborts the whole
/// invocation, which rolls the ledger update back.
///
/// Positions without debt may withdraw everything; otherwise the remaining
/// collateral must keep the health factor at or above 150%.
///
/// # Arguments
/// * `env` - The contract environment
/// * `user` - The withdrawer's address (must authorize)
/// * `amount` - The amount of collateral to withdraw
///
/// # Returns
/// Returns the remaining collateral balance
///
/// # Errors
/// * `ZeroAmount` - Amount is zero or negative
/// * `InsufficientCollateral` - Amount exceeds deposited collateral
/// * `UnhealthyPosition` - Remaining collateral would not cover the debt at 150%
/// * `TransferFailed` - The outbound collateral transfer failed
/// * `Reentrancy` - Called from inside another vault operation
pub fn withdraw(env: &Env, user: Address, amount: i128) -> Result<i128, VaultError> {
    user.require_auth();
    let _guard = ReentrancyGuard::enter(env)?;

    if amount <= 0 {
        return Err(VaultError::ZeroAmount);
    }

    let mut position = load_position(env, &user);
    if amount > position.collateral {
        return Err(VaultError::InsufficientCollateral);
    }

    position.collateral -= amount;
    if position.debt > 0 && !position.is_healthy(env) {
        return Err(VaultError::UnhealthyPosition);
    }

    let asset = storage::collateral_asset(env)?;

    save_position(env, &user, &position);
    sub_total_collateral(env, amount)?;

    let vault = env.current_contract_address();
    match TokenClient::new(env, &asset).try_transfer(&vault, &user, &amount) {
        Ok(Ok(())) => {}
        _ => return Err(VaultError::TransferFailed),
    }

    Withdrawn {
        user,
        amount,
        collateral: position.collateral,
    }
    .publish(env);

    Ok(position.collateral)
}
