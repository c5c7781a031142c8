use soroban_sdk::contracterror;

/// Errors returned by every vault entry point.
///
/// Any error aborts the invocation, so storage writes made before the error
/// are rolled back by the host.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    /// Amount is zero or negative
    ZeroAmount = 1,
    /// Address argument is the all-zero account or contract
    ZeroAddress = 2,
    /// Operation would leave the health factor below 150%
    UnhealthyPosition = 3,
    /// Caller is not the current guardian
    OnlyGuardian = 4,
    /// Repay attempted against zero outstanding debt
    InsufficientDebt = 5,
    /// Withdraw amount exceeds the deposited collateral
    InsufficientCollateral = 6,
    /// Collateral transfer or debt-asset mint/burn failed
    TransferFailed = 7,
    /// Debt asset has already been bound
    StablecoinAlreadySet = 8,
    /// Debt asset can only be bound while total debt is zero
    DebtMustBeZeroToSetStablecoin = 9,
    /// A guarded operation was re-entered
    Reentrancy = 10,
    /// `initialize_guardian` was already called
    GuardianAlreadySet = 11,
    /// Arithmetic overflow
    Overflow = 12,
    /// Contract was registered without a collateral asset
    NotInitialized = 13,
}
