//! # Debt Asset Adapter
//!
//! Debt is always tracked in the position ledger. Once a token is bound with
//! [`set_stablecoin`], every debt increase also mints that token to the user
//! and every debt decrease burns it back, 1:1. Before binding, debt is an
//! internal counter only.
//!
//! The binding is write-once and only accepted while no debt exists anywhere,
//! so token supply and ledger debt can never disagree.
//!
//! The vault must be the admin of the bound Stellar Asset Contract to mint.
//! Burns use `burn_from`, so users approve the vault for the amount they repay.

use soroban_sdk::{
    token::{StellarAssetClient, TokenClient},
    Address, Env,
};

use crate::errors::VaultError;
use crate::events::StablecoinSet;
use crate::guardian::{require_guardian, require_non_zero};
use crate::storage;

/// Mint/burn capability the ledger drives on debt changes.
pub trait DebtAsset {
    fn mint(&self, env: &Env, to: &Address, amount: i128) -> Result<(), VaultError>;
    fn burn(&self, env: &Env, from: &Address, amount: i128) -> Result<(), VaultError>;
}

/// Current debt representation.
#[derive(Clone, Debug, PartialEq)]
pub enum DebtAssetBinding {
    /// No token bound; debt only moves the internal counters.
    Internal,
    /// Debt mirrored by the token at this address.
    Token(Address),
}

impl DebtAssetBinding {
    pub fn load(env: &Env) -> Self {
        match storage::stablecoin(env) {
            Some(token) => DebtAssetBinding::Token(token),
            None => DebtAssetBinding::Internal,
        }
    }
}

impl DebtAsset for DebtAssetBinding {
    fn mint(&self, env: &Env, to: &Address, amount: i128) -> Result<(), VaultError> {
        match self {
            DebtAssetBinding::Internal => Ok(()),
            DebtAssetBinding::Token(token) => {
                match StellarAssetClient::new(env, token).try_mint(to, &amount) {
                    Ok(Ok(())) => Ok(()),
                    _ => Err(VaultError::TransferFailed),
                }
            }
        }
    }

    fn burn(&self, env: &Env, from: &Address, amount: i128) -> Result<(), VaultError> {
        match self {
            DebtAssetBinding::Internal => Ok(()),
            DebtAssetBinding::Token(token) => {
                let spender = env.current_contract_address();
                match TokenClient::new(env, token).try_burn_from(&spender, from, &amount) {
                    Ok(Ok(())) => Ok(()),
                    _ => Err(VaultError::TransferFailed),
                }
            }
        }
    }
}

/// Bind the debt asset (guardian only, write-once, requires zero total debt)
pub fn set_stablecoin(env: &Env, caller: Address, token: Address) -> Result<(), VaultError> {
    require_guardian(env, &caller)?;
    require_non_zero(env, &token)?;

    if storage::stablecoin(env).is_some() {
        return Err(VaultError::StablecoinAlreadySet);
    }
    if storage::total_debt(env) != 0 {
        return Err(VaultError::DebtMustBeZeroToSetStablecoin);
    }

    storage::set_stablecoin(env, &token);
    StablecoinSet { token }.publish(env);

    Ok(())
}
