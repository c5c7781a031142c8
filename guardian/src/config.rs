//! Guardian configuration: network endpoints, the vault being watched, and
//! polling/retry behaviour.
//!
//! Configuration can be built in code, read from a TOML file, or layered with
//! `AEGIS_GUARDIAN__*` environment variables on top of a file via [`GuardianConfig::load`].

use crate::error::{GuardianError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Minimum health factor the vault enforces, 150% in 18-decimal fixed point
pub const DEFAULT_MIN_HEALTH_FACTOR: u64 = 1_500_000_000_000_000_000;

/// Prefix for environment overrides, e.g. `AEGIS_GUARDIAN__POLL_INTERVAL_MS=5000`
pub const ENV_PREFIX: &str = "AEGIS_GUARDIAN";

const STRKEY_LEN: usize = 56;

/// Network type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Stellar testnet
    Testnet,
    /// Stellar mainnet (public network)
    Mainnet,
    /// Stellar futurenet
    Futurenet,
    /// Custom network with user-defined endpoints
    Custom,
}

impl Network {
    /// Get the network passphrase
    pub fn passphrase(&self) -> &'static str {
        match self {
            Network::Testnet => "Test SDF Network ; September 2015",
            Network::Mainnet => "Public Global Stellar Network ; September 2015",
            Network::Futurenet => "Test SDF Future Network ; October 2022",
            Network::Custom => "",
        }
    }

    /// Get the default Soroban RPC URL for this network
    pub fn default_soroban_rpc_url(&self) -> &'static str {
        match self {
            Network::Testnet => "https://soroban-testnet.stellar.org",
            Network::Mainnet => "https://soroban-mainnet.stellar.org",
            Network::Futurenet => "https://rpc-futurenet.stellar.org",
            Network::Custom => "",
        }
    }
}

/// Configuration for the guardian monitor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardianConfig {
    /// Network to connect to
    pub network: Network,

    /// Soroban RPC endpoint URL
    pub soroban_rpc_url: String,

    /// Network passphrase
    pub network_passphrase: String,

    /// Vault contract id (`C...` strkey)
    pub vault_contract_id: String,

    /// Guardian account that signs flash-repays (`G...` strkey)
    pub guardian_account: String,

    /// Accounts whose positions are checked on every sweep
    #[serde(default)]
    pub tracked_accounts: Vec<String>,

    /// Positions strictly below this health factor are repaid
    pub min_health_factor: u64,

    /// Delay between sweeps (in milliseconds)
    pub poll_interval_ms: u64,

    /// Accounts evaluated concurrently within one sweep
    pub sweep_concurrency: usize,

    /// HTTP request timeout (in seconds)
    pub request_timeout_secs: u64,

    /// Maximum number of retries for failed requests
    pub max_retries: usize,

    /// Initial retry delay (in milliseconds)
    pub retry_initial_delay_ms: u64,

    /// Maximum retry delay (in milliseconds)
    pub retry_max_delay_ms: u64,

    /// Retry backoff multiplier
    pub retry_multiplier: f64,

    /// Transaction polling interval (in milliseconds)
    pub tx_poll_interval_ms: u64,

    /// Transaction confirmation timeout (in seconds)
    pub tx_timeout_secs: u64,
}

impl GuardianConfig {
    /// Create a new configuration for the specified network
    pub fn new(network: Network, vault_contract_id: String, guardian_account: String) -> Self {
        Self {
            network,
            soroban_rpc_url: network.default_soroban_rpc_url().to_string(),
            network_passphrase: network.passphrase().to_string(),
            vault_contract_id,
            guardian_account,
            tracked_accounts: Vec::new(),
            min_health_factor: DEFAULT_MIN_HEALTH_FACTOR,
            poll_interval_ms: 10_000,
            sweep_concurrency: 4,
            request_timeout_secs: 30,
            max_retries: 3,
            retry_initial_delay_ms: 100,
            retry_max_delay_ms: 5000,
            retry_multiplier: 2.0,
            tx_poll_interval_ms: 1000,
            tx_timeout_secs: 60,
        }
    }

    /// Create configuration for testnet
    pub fn testnet(vault_contract_id: String, guardian_account: String) -> Self {
        Self::new(Network::Testnet, vault_contract_id, guardian_account)
    }

    /// Create configuration for mainnet
    pub fn mainnet(vault_contract_id: String, guardian_account: String) -> Self {
        Self::new(Network::Mainnet, vault_contract_id, guardian_account)
    }

    /// Create a configuration against a custom RPC endpoint
    pub fn custom(
        soroban_rpc_url: String,
        network_passphrase: String,
        vault_contract_id: String,
        guardian_account: String,
    ) -> Result<Self> {
        if soroban_rpc_url.is_empty() {
            return Err(GuardianError::ConfigError(
                "Soroban RPC URL cannot be empty".to_string(),
            ));
        }
        if network_passphrase.is_empty() {
            return Err(GuardianError::ConfigError(
                "Network passphrase cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            soroban_rpc_url,
            network_passphrase,
            ..Self::new(Network::Custom, vault_contract_id, guardian_account)
        })
    }

    /// Read a configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GuardianConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Layer `AEGIS_GUARDIAN__*` environment variables over an optional TOML file.
    ///
    /// Missing keys fall back to the testnet defaults. `tracked_accounts` is read
    /// from the environment as a comma-separated list.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::testnet(String::new(), String::new());

        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&defaults)?);
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path).format(config::FileFormat::Toml),
            );
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("tracked_accounts")
                .try_parsing(true),
        );

        let config: GuardianConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Set the accounts to monitor
    pub fn with_tracked_accounts(mut self, accounts: Vec<String>) -> Self {
        self.tracked_accounts = accounts;
        self
    }

    /// Set the repay threshold
    pub fn with_min_health_factor(mut self, min_health_factor: u64) -> Self {
        self.min_health_factor = min_health_factor;
        self
    }

    /// Set the sweep interval and concurrency
    pub fn with_sweep_config(mut self, poll_interval_ms: u64, concurrency: usize) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self.sweep_concurrency = concurrency;
        self
    }

    /// Set request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = timeout.as_secs();
        self
    }

    /// Set maximum retries
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set retry delays
    pub fn with_retry_config(
        mut self,
        initial_delay_ms: u64,
        max_delay_ms: u64,
        multiplier: f64,
    ) -> Self {
        self.retry_initial_delay_ms = initial_delay_ms;
        self.retry_max_delay_ms = max_delay_ms;
        self.retry_multiplier = multiplier;
        self
    }

    /// Set transaction polling configuration
    pub fn with_tx_config(mut self, poll_interval_ms: u64, timeout_secs: u64) -> Self {
        self.tx_poll_interval_ms = poll_interval_ms;
        self.tx_timeout_secs = timeout_secs;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Repay threshold as the vault's `i128` fixed-point type
    pub fn min_health_factor_fixed(&self) -> i128 {
        i128::from(self.min_health_factor)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.soroban_rpc_url.is_empty() {
            return Err(GuardianError::ConfigError(
                "Soroban RPC URL cannot be empty".to_string(),
            ));
        }
        url::Url::parse(&self.soroban_rpc_url)?;
        if self.network_passphrase.is_empty() {
            return Err(GuardianError::ConfigError(
                "Network passphrase cannot be empty".to_string(),
            ));
        }
        validate_strkey(&self.vault_contract_id, &['C'], "vault contract id")?;
        validate_strkey(&self.guardian_account, &['G', 'C'], "guardian account")?;
        for account in &self.tracked_accounts {
            validate_strkey(account, &['G', 'C'], "tracked account")?;
        }
        if self.min_health_factor == 0 {
            return Err(GuardianError::ConfigError(
                "Minimum health factor must be greater than 0".to_string(),
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(GuardianError::ConfigError(
                "Poll interval must be greater than 0".to_string(),
            ));
        }
        if self.sweep_concurrency == 0 {
            return Err(GuardianError::ConfigError(
                "Sweep concurrency must be greater than 0".to_string(),
            ));
        }
        if self.max_retries == 0 {
            return Err(GuardianError::ConfigError(
                "Max retries must be greater than 0".to_string(),
            ));
        }
        if self.retry_initial_delay_ms == 0 {
            return Err(GuardianError::ConfigError(
                "Retry initial delay must be greater than 0".to_string(),
            ));
        }
        if self.retry_multiplier <= 1.0 {
            return Err(GuardianError::ConfigError(
                "Retry multiplier must be greater than 1.0".to_string(),
            ));
        }
        if self.tx_poll_interval_ms == 0 {
            return Err(GuardianError::ConfigError(
                "Transaction poll interval must be greater than 0".to_string(),
            ));
        }
        if self.tx_timeout_secs == 0 {
            return Err(GuardianError::ConfigError(
                "Transaction timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_strkey(value: &str, prefixes: &[char], what: &str) -> Result<()> {
    let well_formed = value.len() == STRKEY_LEN
        && value.starts_with(prefixes)
        && value
            .chars()
            .all(|c| c.is_ascii_uppercase() || ('2'..='7').contains(&c));
    if !well_formed {
        return Err(GuardianError::ConfigError(format!(
            "Invalid {}: {:?}",
            what, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VAULT: &str = "CDLZFC3SYJYDZT7K67VZ75HPJVIEUVNIXF47ZG2FB2RMQQVU2HHGCYSC";
    const GUARDIAN: &str = "GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H";

    fn test_config() -> GuardianConfig {
        GuardianConfig::testnet(VAULT.to_string(), GUARDIAN.to_string())
    }

    #[test]
    fn test_network_passphrase() {
        assert_eq!(
            Network::Testnet.passphrase(),
            "Test SDF Network ; September 2015"
        );
        assert_eq!(
            Network::Mainnet.passphrase(),
            "Public Global Stellar Network ; September 2015"
        );
    }

    #[test]
    fn test_testnet_config() {
        let config = test_config();
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(
            config.soroban_rpc_url,
            "https://soroban-testnet.stellar.org"
        );
        assert_eq!(config.min_health_factor, DEFAULT_MIN_HEALTH_FACTOR);
        assert_eq!(config.poll_interval(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GuardianConfig::custom(
            "http://localhost:8000/soroban/rpc".to_string(),
            "Standalone Network ; February 2017".to_string(),
            VAULT.to_string(),
            GUARDIAN.to_string(),
        )
        .unwrap();

        assert_eq!(config.network, Network::Custom);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config_empty_url() {
        let result = GuardianConfig::custom(
            "".to_string(),
            "Custom".to_string(),
            VAULT.to_string(),
            GUARDIAN.to_string(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = test_config()
            .with_tracked_accounts(vec![GUARDIAN.to_string()])
            .with_min_health_factor(2_000_000_000_000_000_000)
            .with_sweep_config(500, 8)
            .with_request_timeout(Duration::from_secs(60))
            .with_max_retries(5)
            .with_retry_config(200, 10000, 2.5)
            .with_tx_config(2000, 120);

        assert_eq!(config.tracked_accounts.len(), 1);
        assert_eq!(config.min_health_factor_fixed(), 2 * 10i128.pow(18));
        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.sweep_concurrency, 8);
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.retry_multiplier, 2.5);
        assert_eq!(config.tx_timeout_secs, 120);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = test_config();
        assert!(config.validate().is_ok());

        config.max_retries = 0;
        assert!(config.validate().is_err());

        config.max_retries = 3;
        config.retry_multiplier = 0.5;
        assert!(config.validate().is_err());

        config.retry_multiplier = 2.0;
        config.sweep_concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_addresses() {
        let config = GuardianConfig::testnet(GUARDIAN.to_string(), GUARDIAN.to_string());
        assert!(config.validate().is_err());

        let config = test_config().with_tracked_accounts(vec!["GSHORT".to_string()]);
        assert!(config.validate().is_err());

        let config = GuardianConfig::testnet(VAULT.to_string(), "".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rpc_url() {
        let mut config = test_config();
        config.soroban_rpc_url = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(GuardianError::UrlParseError(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = test_config().with_tracked_accounts(vec![GUARDIAN.to_string()]);
        let text = toml::to_string(&config).unwrap();
        let parsed: GuardianConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
