//! Example: check the configured Soroban RPC endpoint and run one guardian sweep
//!
//! Reads `guardian.toml` (if present) plus `AEGIS_GUARDIAN__*` overrides, reports
//! node health, then sweeps the tracked accounts with the read-only gateway.
//! Positions come from simulating `get_position`; repays are reported, not sent.
//!
//! ```sh
//! AEGIS_GUARDIAN__VAULT_CONTRACT_ID=C... AEGIS_GUARDIAN__GUARDIAN_ACCOUNT=G... \
//!   RUST_LOG=aegis_guardian=debug cargo run --example check_rpc
//! ```

use aegis_guardian::{
    GuardianConfig, GuardianMonitor, RpcVaultReader, SorobanRpcClient, SweepOutcome,
};
use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("aegis_guardian=info")),
        )
        .init();

    let file = Path::new("guardian.toml");
    let config = GuardianConfig::load(file.exists().then_some(file))
        .context("loading guardian configuration")?;
    let config = Arc::new(config);

    let rpc = SorobanRpcClient::new(config.clone())?;
    let health = rpc.get_health().await.context("querying getHealth")?;
    let ledger = rpc.get_latest_ledger().await?;
    println!(
        "RPC {} is {} at ledger {} (protocol {})",
        config.soroban_rpc_url, health.status, ledger.sequence, ledger.protocol_version
    );

    let monitor = GuardianMonitor::new(config.clone(), Arc::new(RpcVaultReader::new(config)?))?;
    let report = monitor.sweep().await;
    for outcome in &report.outcomes {
        match outcome {
            SweepOutcome::Error { account, error } => println!("{}: {}", account, error),
            other => println!("{}: {:?}", other.account(), other),
        }
    }
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
