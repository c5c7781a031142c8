//! Read-only vault gateway backed by `simulateTransaction`.
//!
//! Positions are read by simulating an unsigned `get_position(account)`
//! invocation sourced from the guardian account and decoding the returned
//! `PositionSummary` map. Simulation needs no signature, so this gateway holds
//! no keys and refuses to submit `flash_repay`.

use crate::config::GuardianConfig;
use crate::error::{GuardianError, Result};
use crate::gateway::VaultGateway;
use crate::rpc::SorobanRpcClient;
use crate::types::{PositionSnapshot, TransactionHash};
use async_trait::async_trait;
use soroban_sdk::xdr::{
    HostFunction, Int128Parts, InvokeContractArgs, InvokeHostFunctionOp, Limits, Memo,
    MuxedAccount, Operation, OperationBody, Preconditions, ReadXdr, ScAddress, ScMap, ScSymbol,
    ScVal, SequenceNumber, StringM, Transaction, TransactionEnvelope, TransactionExt,
    TransactionV1Envelope, VecM, WriteXdr,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

const POSITION_VIEW: &str = "get_position";
const BASE_FEE: u32 = 100;

/// Base64 envelope simulating `get_position(account)` on the configured vault
pub fn position_query(config: &GuardianConfig, account: &str) -> Result<String> {
    let invoke = InvokeContractArgs {
        contract_address: ScAddress::from_str(&config.vault_contract_id)?,
        function_name: ScSymbol(StringM::try_from(POSITION_VIEW)?),
        args: vec![ScVal::Address(ScAddress::from_str(account)?)].try_into()?,
    };
    let operation = Operation {
        source_account: None,
        body: OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
            host_function: HostFunction::InvokeContract(invoke),
            auth: VecM::default(),
        }),
    };

    // Simulation ignores the sequence number
    let tx = Transaction {
        source_account: MuxedAccount::from_str(&config.guardian_account)?,
        fee: BASE_FEE,
        seq_num: SequenceNumber(0),
        cond: Preconditions::None,
        memo: Memo::None,
        operations: vec![operation].try_into()?,
        ext: TransactionExt::V0,
    };

    let envelope = TransactionEnvelope::Tx(TransactionV1Envelope {
        tx,
        signatures: VecM::default(),
    });
    Ok(envelope.to_xdr_base64(Limits::none())?)
}

/// Decode the base64 `PositionSummary` returned by `get_position`
pub fn decode_position(account: &str, result_xdr: &str) -> Result<PositionSnapshot> {
    let map = match ScVal::from_xdr_base64(result_xdr, Limits::none())? {
        ScVal::Map(Some(map)) => map,
        other => {
            return Err(GuardianError::InvalidResponse(format!(
                "get_position returned {:?}",
                other
            )))
        }
    };

    Ok(PositionSnapshot {
        account: account.to_string(),
        collateral: i128_field(&map, "collateral")?,
        debt: i128_field(&map, "debt")?,
        health_factor: i128_field(&map, "health_factor")?,
    })
}

fn i128_field(map: &ScMap, name: &str) -> Result<i128> {
    let key = ScVal::Symbol(ScSymbol(StringM::try_from(name)?));
    let entry = map
        .0
        .iter()
        .find(|entry| entry.key == key)
        .ok_or_else(|| GuardianError::InvalidResponse(format!("position is missing `{}`", name)))?;

    match &entry.val {
        ScVal::I128(Int128Parts { hi, lo }) => Ok(((*hi as i128) << 64) | (*lo as i128)),
        other => Err(GuardianError::InvalidResponse(format!(
            "position field `{}` is {:?}, expected i128",
            name, other
        ))),
    }
}

/// Gateway that reads positions through simulation and never signs
pub struct RpcVaultReader {
    rpc: SorobanRpcClient,
    config: Arc<GuardianConfig>,
}

impl RpcVaultReader {
    pub fn new(config: Arc<GuardianConfig>) -> Result<Self> {
        let rpc = SorobanRpcClient::new(config.clone())?;
        Ok(Self { rpc, config })
    }
}

#[async_trait]
impl VaultGateway for RpcVaultReader {
    async fn position(&self, account: &str) -> Result<PositionSnapshot> {
        let query = position_query(&self.config, account)?;
        let simulation = self.rpc.simulate_transaction(&query).await?;

        if let Some(error) = &simulation.error {
            return Err(GuardianError::from_simulation_error(error));
        }
        let result_xdr = simulation.result_xdr.as_deref().ok_or_else(|| {
            GuardianError::InvalidResponse("simulation returned no result".to_string())
        })?;

        let position = decode_position(account, result_xdr)?;
        debug!(
            account,
            collateral = %position.collateral,
            debt = %position.debt,
            ledger = simulation.latest_ledger,
            "position read"
        );
        Ok(position)
    }

    async fn flash_repay(&self, account: &str, amount: i128) -> Result<TransactionHash> {
        Err(GuardianError::GatewayError(format!(
            "read-only gateway cannot flash-repay {} for {}",
            amount, account
        )))
    }
}
