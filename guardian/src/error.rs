//! Error types for the guardian service.
//!
//! Covers RPC transport failures, malformed responses, configuration problems and
//! failures reported by the vault gateway while submitting a flash-repay.

use thiserror::Error;

/// Main error type for guardian operations
#[derive(Error, Debug)]
pub enum GuardianError {
    /// Error returned by the Soroban RPC server
    #[error("Soroban RPC error: {0}")]
    SorobanRpcError(String),

    /// Network communication error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Configuration file could not be read
    #[error("Failed to read config file: {0}")]
    ConfigFileError(#[from] std::io::Error),

    /// URL parse error
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {0} seconds")]
    RateLimitExceeded(u64),

    /// Max retries exceeded
    #[error("Max retries ({0}) exceeded")]
    MaxRetriesExceeded(usize),

    /// Transaction not found (not yet ingested, or expired)
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    /// The vault gateway could not read a position or submit a transaction
    #[error("Vault gateway error: {0}")]
    GatewayError(String),

    /// XDR encoding or decoding failed
    #[error("XDR error: {0}")]
    XdrError(#[from] soroban_sdk::xdr::Error),

    /// The vault contract rejected the invocation
    #[error("Vault rejected call with code {code}: {message}")]
    VaultRejected {
        /// Contract error code
        code: u32,
        /// Human-readable description
        message: String,
    },
}

impl From<config::ConfigError> for GuardianError {
    fn from(err: config::ConfigError) -> Self {
        GuardianError::ConfigError(err.to_string())
    }
}

impl From<toml::de::Error> for GuardianError {
    fn from(err: toml::de::Error) -> Self {
        GuardianError::ConfigError(err.to_string())
    }
}

/// Result type alias for guardian operations
pub type Result<T> = std::result::Result<T, GuardianError>;

/// Name of a vault contract error code, for log lines and [`GuardianError::VaultRejected`]
pub fn vault_error_name(code: u32) -> &'static str {
    match code {
        1 => "ZeroAmount",
        2 => "ZeroAddress",
        3 => "UnhealthyPosition",
        4 => "OnlyGuardian",
        5 => "InsufficientDebt",
        6 => "InsufficientCollateral",
        7 => "TransferFailed",
        8 => "StablecoinAlreadySet",
        9 => "DebtMustBeZeroToSetStablecoin",
        10 => "Reentrancy",
        11 => "GuardianAlreadySet",
        12 => "Overflow",
        13 => "NotInitialized",
        _ => "Unknown",
    }
}

impl GuardianError {
    /// Build a `VaultRejected` error from a raw contract error code
    pub fn vault_rejected(code: u32) -> Self {
        GuardianError::VaultRejected {
            code,
            message: vault_error_name(code).to_string(),
        }
    }

    /// Map a simulation error string. `Error(Contract, #N)` becomes
    /// `VaultRejected`; anything else is an RPC error.
    pub fn from_simulation_error(message: &str) -> Self {
        const MARKER: &str = "Error(Contract, #";

        let code = message.find(MARKER).and_then(|start| {
            let digits: String = message[start + MARKER.len()..]
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().ok()
        });

        match code {
            Some(code) => GuardianError::vault_rejected(code),
            None => GuardianError::SorobanRpcError(format!("simulation failed: {}", message)),
        }
    }
}
