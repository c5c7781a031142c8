use soroban_sdk::{contractevent, Address};

/// Collateral deposited
#[contractevent]
#[derive(Clone, Debug)]
pub struct Deposited {
    pub user: Address,
    pub amount: i128,
    pub collateral: i128,
}

/// Collateral withdrawn and sent back to the user
#[contractevent]
#[derive(Clone, Debug)]
pub struct Withdrawn {
    pub user: Address,
    pub amount: i128,
    pub collateral: i128,
}

/// Debt minted against collateral
#[contractevent]
#[derive(Clone, Debug)]
pub struct Minted {
    pub user: Address,
    pub amount: i128,
    pub debt: i128,
    pub health_factor: i128,
}

/// Debt repaid by its owner. `amount` is the capped amount actually repaid.
#[contractevent]
#[derive(Clone, Debug)]
pub struct Repaid {
    pub user: Address,
    pub amount: i128,
    pub debt: i128,
}

/// Debt force-repaid by the guardian
#[contractevent]
#[derive(Clone, Debug)]
pub struct FlashRepaid {
    pub guardian: Address,
    pub user: Address,
    pub amount: i128,
    pub debt: i128,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct GuardianUpdated {
    pub previous: Option<Address>,
    pub guardian: Address,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct StablecoinSet {
    pub token: Address,
}
