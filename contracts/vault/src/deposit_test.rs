use super::*;
use crate::test_helpers::{VaultFixture, UNIT};
use soroban_sdk::{contract, contractimpl, testutils::Address as _, Address, Env};

#[contract]
pub struct RejectingToken;

#[contractimpl]
impl RejectingToken {
    pub fn transfer(_env: Env, _from: Address, _to: Address, _amount: i128) {
        panic!("transfer rejected");
    }
}

#[test]
fn test_deposit_success() {
    let t = VaultFixture::new();
    let user = t.funded_user(100 * UNIT);

    let balance = t.vault.deposit(&user, &(100 * UNIT));
    assert_eq!(balance, 100 * UNIT);

    assert_eq!(t.vault.get_collateral(&user), 100 * UNIT);
    assert_eq!(t.vault.total_collateral(), 100 * UNIT);
    assert_eq!(t.collateral.balance(&user), 0);
    assert_eq!(t.collateral.balance(&t.vault.address), 100 * UNIT);
}

#[test]
fn test_deposit_multiple_times() {
    let t = VaultFixture::new();
    let user = t.funded_user(15 * UNIT);

    assert_eq!(t.vault.deposit(&user, &(10 * UNIT)), 10 * UNIT);
    assert_eq!(t.vault.deposit(&user, &(5 * UNIT)), 15 * UNIT);
    assert_eq!(t.vault.total_collateral(), 15 * UNIT);
}

#[test]
fn test_deposit_zero_amount() {
    let t = VaultFixture::new();
    let user = t.funded_user(UNIT);

    let result = t.vault.try_deposit(&user, &0);
    assert_eq!(result, Err(Ok(VaultError::ZeroAmount)));
    assert_eq!(t.vault.total_collateral(), 0);
}

#[test]
fn test_deposit_negative_amount() {
    let t = VaultFixture::new();
    let user = t.funded_user(UNIT);

    let result = t.vault.try_deposit(&user, &-500);
    assert_eq!(result, Err(Ok(VaultError::ZeroAmount)));
}

#[test]
fn test_deposit_without_balance_fails() {
    let t = VaultFixture::new();
    let user = t.funded_user(UNIT);

    let result = t.vault.try_deposit(&user, &(2 * UNIT));
    assert_eq!(result, Err(Ok(VaultError::TransferFailed)));
    assert_eq!(t.vault.get_collateral(&user), 0);
    assert_eq!(t.vault.total_collateral(), 0);
}

#[test]
fn test_deposit_rejected_transfer_rolls_back() {
    let env = Env::default();
    env.mock_all_auths();

    let token_id = env.register(RejectingToken, ());
    let vault_id = env.register(AegisVault, (token_id,));
    let vault = AegisVaultClient::new(&env, &vault_id);
    let user = Address::generate(&env);

    let result = vault.try_deposit(&user, &UNIT);
    assert_eq!(result, Err(Ok(VaultError::TransferFailed)));
    assert_eq!(vault.get_collateral(&user), 0);
    assert_eq!(vault.total_collateral(), 0);
}

#[test]
fn test_deposit_separate_users() {
    let t = VaultFixture::new();
    let user1 = t.funded_user(10 * UNIT);
    let user2 = t.funded_user(20 * UNIT);

    t.vault.deposit(&user1, &(10 * UNIT));
    t.vault.deposit(&user2, &(20 * UNIT));

    assert_eq!(t.vault.get_collateral(&user1), 10 * UNIT);
    assert_eq!(t.vault.get_collateral(&user2), 20 * UNIT);
    assert_eq!(t.vault.total_collateral(), 30 * UNIT);
}

#[test]
fn test_deposit_does_not_create_debt() {
    let t = VaultFixture::new();
    let user = t.open_position(10 * UNIT, 0);

    let position = t.vault.get_position(&user);
    assert_eq!(position.collateral, 10 * UNIT);
    assert_eq!(position.debt, 0);
    assert_eq!(position.health_factor, HEALTH_FACTOR_NO_DEBT);
    assert!(position.healthy);
}
