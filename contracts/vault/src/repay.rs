//! # Repay and Flash-Repay
//!
//! Both paths share the same capped settlement: the amount actually repaid is
//! `min(requested, outstanding debt)`, so debt never goes below zero and the
//! caller is never charged more than is owed. Collateral is untouched.
//!
//! `flash_repay` is the guardian's risk-response primitive. An off-chain
//! monitor calls it for positions that fell below the safety threshold.

use soroban_sdk::{Address, Env};

use crate::errors::VaultError;
use crate::events::{FlashRepaid, Repaid};
use crate::guardian::{require_guardian, require_non_zero};
use crate::position::{load_position, save_position, sub_total_debt};
use crate::reentrancy::ReentrancyGuard;
use crate::stablecoin::{DebtAsset, DebtAssetBinding};

/// Outcome of a settlement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Settlement {
    repaid: i128,
    remaining: i128,
}

fn settle_debt(env: &Env, user: &Address, amount: i128) -> Result<Settlement, VaultError> {
    if amount <= 0 {
        return Err(VaultError::ZeroAmount);
    }

    let mut position = load_position(env, user);
    if position.debt <= 0 {
        return Err(VaultError::InsufficientDebt);
    }

    let repaid = amount.min(position.debt);
    position.debt -= repaid;

    save_position(env, user, &position);
    sub_total_debt(env, repaid)?;

    DebtAssetBinding::load(env).burn(env, user, repaid)?;

    Ok(Settlement {
        repaid,
        remaining: position.debt,
    })
}

/// Repay the caller's own debt
///
/// # Arguments
/// * `env` - The contract environment
/// * `user` - The borrower's address (must authorize)
/// * `amount` - Requested repayment, capped at the outstanding debt
///
/// # Returns
/// Returns the remaining debt
///
/// # Errors
/// * `ZeroAmount` - Amount is zero or negative
/// * `InsufficientDebt` - User has no debt
/// * `TransferFailed` - Burning the bound debt asset failed (missing allowance or balance)
/// * `Reentrancy` - Called from inside another vault operation
pub fn repay(env: &Env, user: Address, amount: i128) -> Result<i128, VaultError> {
    user.require_auth();
    let _guard = ReentrancyGuard::enter(env)?;

    let settlement = settle_debt(env, &user, amount)?;

    Repaid {
        user,
        amount: settlement.repaid,
        debt: settlement.remaining,
    }
    .publish(env);

    Ok(settlement.remaining)
}

/// Force-repay a user's debt (guardian only)
///
/// # Arguments
/// * `env` - The contract environment
/// * `caller` - Must be the current guardian (must authorize)
/// * `user` - The account whose debt is reduced
/// * `amount` - Requested repayment, capped at the outstanding debt
///
/// # Returns
/// Returns the user's remaining debt
///
/// # Errors
/// * `OnlyGuardian` - Caller is not the guardian
/// * `ZeroAddress` - `user` is the zero address
/// * `ZeroAmount` - Amount is zero or negative
/// * `InsufficientDebt` - User has no debt
/// * `TransferFailed` - Burning the bound debt asset failed
/// * `Reentrancy` - Called from inside another vault operation
pub fn flash_repay(
    env: &Env,
    caller: Address,
    user: Address,
    amount: i128,
) -> Result<i128, VaultError> {
    require_guardian(env, &caller)?;
    let _guard = ReentrancyGuard::enter(env)?;
    require_non_zero(env, &user)?;

    let settlement = settle_debt(env, &user, amount)?;

    FlashRepaid {
        guardian: caller,
        user,
        amount: settlement.repaid,
        debt: settlement.remaining,
    }
    .publish(env);

    Ok(settlement.remaining)
}
