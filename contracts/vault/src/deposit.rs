use soroban_sdk::{token::TokenClient, Address, Env};

use crate::errors::VaultError;
use crate::events::Deposited;
use crate::position::{add_total_collateral, load_position, save_position};
use crate::reentrancy::ReentrancyGuard;
use crate::storage;

/// Deposit collateral into the vault
///
/// Credits `amount` to the user's collateral and pulls the same amount of the
/// collateral asset from the user. Adding collateral can only improve health,
/// so no solvency check is made.
///
/// # Arguments
/// * `env` - The contract environment
/// * `user` - The depositor's address (must authorize)
/// * `amount` - The amount of collateral to deposit
///
/// # Returns
/// Returns the user's updated collateral balance
///
/// # Errors
/// * `ZeroAmount` - Amount is zero or negative
/// * `TransferFailed` - The inbound collateral transfer failed
/// * `Reentrancy` - Called from inside another vault operation
pub fn deposit(env: &Env, user: Address, amount: i128) -> Result<i128, VaultError> {
    user.require_auth();
    let _guard = ReentrancyGuard::enter(env)?;

    if amount <= 0 {
        return Err(VaultError::ZeroAmount);
    }

    let asset = storage::collateral_asset(env)?;

    let mut position = load_position(env, &user);
    position.collateral = position
        .collateral
        .checked_add(amount)
        .ok_or(VaultError::Overflow)?;

    save_position(env, &user, &position);
    add_total_collateral(env, amount)?;

    let vault = env.current_contract_address();
    match TokenClient::new(env, &asset).try_transfer(&user, &vault, &amount) {
        Ok(Ok(())) => {}
        _ => return Err(VaultError::TransferFailed),
    }

    Deposited {
        user,
        amount,
        collateral: position.collateral,
    }
    .publish(env);

    Ok(position.collateral)
}
