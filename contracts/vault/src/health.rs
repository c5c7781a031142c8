//! # Health Factor
//!
//! Solvency ratio of a position, in 18-decimal fixed point:
//! `health_factor = floor(collateral * SCALE / debt)`.
//!
//! Collateral and debt are valued 1:1, so a health factor of `SCALE` means the
//! position holds exactly as much collateral as it owes. Positions must stay at
//! or above [`MIN_HEALTH_FACTOR`] (150%) after any debt-increasing or
//! collateral-decreasing operation.

use soroban_sdk::{Env, U256};

/// Fixed-point unit (1.0 with 18 decimals)
pub const SCALE: i128 = 1_000_000_000_000_000_000;

/// Minimum health factor (150%)
pub const MIN_HEALTH_FACTOR: i128 = SCALE * 3 / 2;

/// Reported health factor for a position without debt.
pub const HEALTH_FACTOR_NO_DEBT: i128 = i128::MAX;

/// Computes the health factor of `(collateral, debt)`.
///
/// Returns [`HEALTH_FACTOR_NO_DEBT`] when `debt` is zero. The result is floored,
/// never rounded up. When `collateral * SCALE` does not fit in `i128` the
/// product is taken in 256 bits; a quotient that still does not fit saturates
/// to [`HEALTH_FACTOR_NO_DEBT`].
pub fn health_factor(env: &Env, collateral: i128, debt: i128) -> i128 {
    if debt <= 0 {
        return HEALTH_FACTOR_NO_DEBT;
    }
    if collateral <= 0 {
        return 0;
    }

    if let Some(scaled) = collateral.checked_mul(SCALE) {
        return scaled / debt;
    }

    let ratio = U256::from_u128(env, collateral as u128)
        .mul(&U256::from_u128(env, SCALE as u128))
        .div(&U256::from_u128(env, debt as u128));

    ratio
        .to_u128()
        .and_then(|r| i128::try_from(r).ok())
        .unwrap_or(HEALTH_FACTOR_NO_DEBT)
}

/// True when the position satisfies the minimum ratio. Debt-free positions are
/// always healthy.
pub fn is_healthy(env: &Env, collateral: i128, debt: i128) -> bool {
    debt <= 0 || health_factor(env, collateral, debt) >= MIN_HEALTH_FACTOR
}
