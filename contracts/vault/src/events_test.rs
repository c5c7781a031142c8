//! Events read back from `env.events().all()`.
//!
//! Each vault event publishes its struct name in snake case as the only topic
//! and its fields as a map, so the mirror types below decode the data payload.

use super::*;
use crate::test_helpers::{VaultFixture, UNIT};
use soroban_sdk::{
    contracttype,
    testutils::{Address as _, Events},
    Address, Env, Symbol, TryFromVal, Val,
};

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct DepositedData {
    pub user: Address,
    pub amount: i128,
    pub collateral: i128,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct WithdrawnData {
    pub user: Address,
    pub amount: i128,
    pub collateral: i128,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct MintedData {
    pub user: Address,
    pub amount: i128,
    pub debt: i128,
    pub health_factor: i128,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct RepaidData {
    pub user: Address,
    pub amount: i128,
    pub debt: i128,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct FlashRepaidData {
    pub guardian: Address,
    pub user: Address,
    pub amount: i128,
    pub debt: i128,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct GuardianUpdatedData {
    pub previous: Option<Address>,
    pub guardian: Address,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct StablecoinSetData {
    pub token: Address,
}

/// Most recent event named `name` published by `vault`, decoded as `T`
fn last_event<T>(env: &Env, vault: &Address, name: &str) -> Option<T>
where
    T: TryFromVal<Env, Val>,
{
    let topic = Symbol::new(env, name);
    env.events()
        .all()
        .iter()
        .filter_map(|(contract, topics, data)| {
            if contract != *vault {
                return None;
            }
            let first = Symbol::try_from_val(env, &topics.get(0)?).ok()?;
            if first != topic {
                return None;
            }
            T::try_from_val(env, &data).ok()
        })
        .last()
}

#[test]
fn test_deposit_event() {
    let t = VaultFixture::new();
    let user = t.funded_user(100 * UNIT);
    t.vault.deposit(&user, &(100 * UNIT));

    let event: DepositedData = last_event(&t.env, &t.vault.address, "deposited").unwrap();
    assert_eq!(
        event,
        DepositedData {
            user,
            amount: 100 * UNIT,
            collateral: 100 * UNIT,
        }
    );
}

#[test]
fn test_withdraw_event_reports_remaining_collateral() {
    let t = VaultFixture::new();
    let user = t.open_position(100 * UNIT, 0);
    t.vault.withdraw(&user, &(40 * UNIT));

    let event: WithdrawnData = last_event(&t.env, &t.vault.address, "withdrawn").unwrap();
    assert_eq!(event.user, user);
    assert_eq!(event.amount, 40 * UNIT);
    assert_eq!(event.collateral, 60 * UNIT);
}

#[test]
fn test_mint_event_carries_health_factor() {
    let t = VaultFixture::new();
    let user = t.open_position(100 * UNIT, 50 * UNIT);

    let event: MintedData = last_event(&t.env, &t.vault.address, "minted").unwrap();
    assert_eq!(event.user, user);
    assert_eq!(event.amount, 50 * UNIT);
    assert_eq!(event.debt, 50 * UNIT);
    assert_eq!(event.health_factor, 2 * SCALE);
}

#[test]
fn test_repay_event_reports_capped_amount() {
    let t = VaultFixture::new();
    let user = t.open_position(300 * UNIT, 100 * UNIT);
    t.vault.repay(&user, &(150 * UNIT));

    let event: RepaidData = last_event(&t.env, &t.vault.address, "repaid").unwrap();
    assert_eq!(event.user, user);
    assert_eq!(event.amount, 100 * UNIT);
    assert_eq!(event.debt, 0);
}

#[test]
fn test_partial_repay_event() {
    let t = VaultFixture::new();
    let user = t.open_position(100 * UNIT, 50 * UNIT);
    t.vault.repay(&user, &(20 * UNIT));

    let event: RepaidData = last_event(&t.env, &t.vault.address, "repaid").unwrap();
    assert_eq!(event.amount, 20 * UNIT);
    assert_eq!(event.debt, 30 * UNIT);
}

#[test]
fn test_flash_repay_event_reports_capped_amount() {
    let t = VaultFixture::new();
    let user = t.open_position(100 * UNIT, 50 * UNIT);
    t.vault.flash_repay(&t.guardian, &user, &(500 * UNIT));

    let event: FlashRepaidData =
        last_event(&t.env, &t.vault.address, "flash_repaid").unwrap();
    assert_eq!(
        event,
        FlashRepaidData {
            guardian: t.guardian.clone(),
            user,
            amount: 50 * UNIT,
            debt: 0,
        }
    );
}

#[test]
fn test_rejected_repay_publishes_nothing() {
    let t = VaultFixture::new();
    let user = t.open_position(100 * UNIT, 0);

    assert_eq!(
        t.vault.try_repay(&user, &(10 * UNIT)),
        Err(Ok(VaultError::InsufficientDebt))
    );
    assert_eq!(
        last_event::<RepaidData>(&t.env, &t.vault.address, "repaid"),
        None
    );
}

#[test]
fn test_initialize_guardian_event_has_no_previous() {
    let t = VaultFixture::new();

    let event: GuardianUpdatedData =
        last_event(&t.env, &t.vault.address, "guardian_updated").unwrap();
    assert_eq!(event.previous, None);
    assert_eq!(event.guardian, t.guardian);
}

#[test]
fn test_set_guardian_event_names_previous() {
    let t = VaultFixture::new();
    let next = Address::generate(&t.env);
    t.vault.set_guardian(&t.guardian, &next);

    let event: GuardianUpdatedData =
        last_event(&t.env, &t.vault.address, "guardian_updated").unwrap();
    assert_eq!(event.previous, Some(t.guardian.clone()));
    assert_eq!(event.guardian, next);
}

#[test]
fn test_stablecoin_set_event() {
    let t = VaultFixture::new();
    let token = t.bind_stablecoin();

    let event: StablecoinSetData =
        last_event(&t.env, &t.vault.address, "stablecoin_set").unwrap();
    assert_eq!(event.token, token.address);
}
