//! Shared fixtures for vault tests. `VaultFixture::new()` registers a Stellar
//! Asset Contract as collateral, the vault against it, and a guardian.

use crate::{AegisVault, AegisVaultClient};
use soroban_sdk::{
    testutils::Address as _,
    token::{StellarAssetClient, TokenClient},
    Address, Env,
};

/// One whole token in 18-decimal units
pub const UNIT: i128 = 1_000_000_000_000_000_000;

pub struct VaultFixture {
    pub env: Env,
    pub vault: AegisVaultClient<'static>,
    pub collateral: TokenClient<'static>,
    pub guardian: Address,
}

impl VaultFixture {
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let issuer = Address::generate(&env);
        let collateral_id = env.register_stellar_asset_contract_v2(issuer).address();

        let vault_id = env.register(AegisVault, (collateral_id.clone(),));
        let vault = AegisVaultClient::new(&env, &vault_id);

        let guardian = Address::generate(&env);
        vault.initialize_guardian(&guardian);

        let collateral = TokenClient::new(&env, &collateral_id);

        Self {
            env,
            vault,
            collateral,
            guardian,
        }
    }

    /// New account holding `balance` of the collateral asset
    pub fn funded_user(&self, balance: i128) -> Address {
        let user = Address::generate(&self.env);
        StellarAssetClient::new(&self.env, &self.collateral.address).mint(&user, &balance);
        user
    }

    /// New account that deposited `collateral` and minted `debt`
    pub fn open_position(&self, collateral: i128, debt: i128) -> Address {
        let user = self.funded_user(collateral);
        self.vault.deposit(&user, &collateral);
        if debt > 0 {
            self.vault.mint(&user, &debt);
        }
        user
    }

    /// Register a Stellar Asset Contract administered by the vault and bind it
    /// as the debt token.
    pub fn bind_stablecoin(&self) -> TokenClient<'static> {
        let token = self.new_vault_admin_token();
        self.vault.set_stablecoin(&self.guardian, &token.address);
        token
    }

    pub fn new_vault_admin_token(&self) -> TokenClient<'static> {
        let issuer = Address::generate(&self.env);
        let token_id = self.env.register_stellar_asset_contract_v2(issuer).address();
        StellarAssetClient::new(&self.env, &token_id).set_admin(&self.vault.address);
        TokenClient::new(&self.env, &token_id)
    }

    /// Allow the vault to burn `amount` of `token` from `user`
    pub fn approve_vault(&self, token: &TokenClient, user: &Address, amount: i128) {
        token.approve(
            user,
            &self.vault.address,
            &amount,
            &(self.env.ledger().sequence() + 100),
        );
    }
}

/// The all-zero account, the null identity on Stellar
pub fn zero_address(env: &Env) -> Address {
    Address::from_str(
        env,
        "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF",
    )
}
