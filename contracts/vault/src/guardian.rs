//! # Guardian Access Control
//!
//! A single privileged address gates `flash_repay`, guardian rotation and the
//! debt-asset binding. The guardian is set once through
//! [`initialize_guardian`] and afterwards can only be replaced by itself.
//! Rotation takes effect immediately: the previous guardian keeps no capability.

use soroban_sdk::{Address, Env};

use crate::errors::VaultError;
use crate::events::GuardianUpdated;
use crate::storage;

/// Strkey of the all-zero ed25519 account.
const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";
/// Strkey of the all-zero contract id.
const ZERO_CONTRACT: &str = "CAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAABSC4";

/// True for the null identities that stand in for "no address".
pub fn is_zero_address(env: &Env, address: &Address) -> bool {
    *address == Address::from_str(env, ZERO_ACCOUNT)
        || *address == Address::from_str(env, ZERO_CONTRACT)
}

pub fn require_non_zero(env: &Env, address: &Address) -> Result<(), VaultError> {
    if is_zero_address(env, address) {
        return Err(VaultError::ZeroAddress);
    }
    Ok(())
}

/// Fails with `OnlyGuardian` unless `caller` is the current guardian.
/// An uninitialized guardian rejects everyone.
pub fn require_guardian(env: &Env, caller: &Address) -> Result<(), VaultError> {
    caller.require_auth();
    match storage::guardian(env) {
        Some(guardian) if guardian == *caller => Ok(()),
        _ => Err(VaultError::OnlyGuardian),
    }
}

/// One-time guardian initialization. Callable by anyone while no guardian is set.
pub fn initialize_guardian(env: &Env, guardian: Address) -> Result<(), VaultError> {
    if storage::guardian(env).is_some() {
        return Err(VaultError::GuardianAlreadySet);
    }
    require_non_zero(env, &guardian)?;

    storage::set_guardian(env, &guardian);
    GuardianUpdated {
        previous: None,
        guardian,
    }
    .publish(env);

    Ok(())
}

/// Replace the guardian. Only the current guardian may rotate.
pub fn set_guardian(env: &Env, caller: Address, new_guardian: Address) -> Result<(), VaultError> {
    require_guardian(env, &caller)?;
    require_non_zero(env, &new_guardian)?;

    storage::set_guardian(env, &new_guardian);
    GuardianUpdated {
        previous: Some(caller),
        guardian: new_guardian,
    }
    .publish(env);

    Ok(())
}
