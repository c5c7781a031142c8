//! Soroban JSON-RPC client.
//!
//! Wraps the RPC methods the guardian needs to watch the network and confirm its
//! own flash-repay transactions. Every call goes through [`RetryStrategy`].

use crate::config::GuardianConfig;
use crate::error::{GuardianError, Result};
use crate::retry::RetryStrategy;
use crate::types::{
    LatestLedger, RpcHealth, SimulateTransactionResult, TransactionInfo, TransactionStatus,
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info};

type RequestId = u64;

/// Soroban RPC client
#[derive(Clone)]
pub struct SorobanRpcClient {
    client: Client,
    base_url: String,
    retry_strategy: RetryStrategy,
    request_id: Arc<AtomicU64>,
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: RequestId,
    method: &'a str,
    params: &'a Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

impl SorobanRpcClient {
    /// Create a new Soroban RPC client
    pub fn new(config: Arc<GuardianConfig>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(GuardianError::NetworkError)?;

        Ok(Self {
            client,
            base_url: config.soroban_rpc_url.clone(),
            retry_strategy: RetryStrategy::from_config(&config),
            request_id: Arc::new(AtomicU64::new(1)),
        })
    }

    fn next_request_id(&self) -> RequestId {
        self.request_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Make a JSON-RPC call and return its `result` member
    pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let request_id = self.next_request_id();
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: request_id,
            method,
            params: &params,
        };

        debug!(method, request_id, "soroban rpc request");

        self.retry_strategy
            .retry(|| async {
                let response = self
                    .client
                    .post(&self.base_url)
                    .json(&request)
                    .send()
                    .await
                    .map_err(GuardianError::NetworkError)?;

                let status = response.status();
                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(1);
                    return Err(GuardianError::RateLimitExceeded(retry_after));
                }
                if !status.is_success() {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    return Err(GuardianError::SorobanRpcError(format!(
                        "HTTP {}: {}",
                        status, error_text
                    )));
                }

                let rpc_response: JsonRpcResponse = response
                    .json()
                    .await
                    .map_err(|e| GuardianError::InvalidResponse(e.to_string()))?;

                if let Some(error) = rpc_response.error {
                    error!(code = error.code, "Soroban RPC error: {}", error.message);
                    return Err(GuardianError::SorobanRpcError(format!(
                        "{} (code: {})",
                        error.message, error.code
                    )));
                }

                rpc_response.result.ok_or_else(|| {
                    GuardianError::InvalidResponse("Missing result in response".to_string())
                })
            })
            .await
    }

    /// `getHealth`: node status and retention window
    pub async fn get_health(&self) -> Result<RpcHealth> {
        let result = self.call("getHealth", json!({})).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// `getLatestLedger`
    pub async fn get_latest_ledger(&self) -> Result<LatestLedger> {
        let result = self.call("getLatestLedger", json!({})).await?;
        let ledger: LatestLedger = serde_json::from_value(result)?;
        debug!(sequence = ledger.sequence, "latest ledger");
        Ok(ledger)
    }

    /// `getTransaction`. A `NOT_FOUND` status maps to [`GuardianError::TransactionNotFound`].
    pub async fn get_transaction(&self, tx_hash: &str) -> Result<TransactionInfo> {
        let result = self
            .call("getTransaction", json!({ "hash": tx_hash }))
            .await?;

        let status = match result["status"].as_str() {
            Some("SUCCESS") => TransactionStatus::Success,
            Some("FAILED") => TransactionStatus::Failed,
            Some("NOT_FOUND") => {
                return Err(GuardianError::TransactionNotFound(tx_hash.to_string()))
            }
            Some(_) => TransactionStatus::Pending,
            None => {
                return Err(GuardianError::InvalidResponse(
                    "Missing status in transaction response".to_string(),
                ))
            }
        };

        let info = TransactionInfo {
            hash: tx_hash.to_string(),
            status,
            ledger: result["ledger"].as_u64().unwrap_or(0),
            result_xdr: result["resultXdr"].as_str().map(String::from),
        };
        debug!(hash = tx_hash, status = %info.status, ledger = info.ledger, "transaction fetched");
        Ok(info)
    }

    /// `simulateTransaction`: dry-run a base64 transaction envelope. A failed
    /// invocation comes back in `error`, not as `Err`.
    pub async fn simulate_transaction(
        &self,
        transaction_xdr: &str,
    ) -> Result<SimulateTransactionResult> {
        let result = self
            .call(
                "simulateTransaction",
                json!({ "transaction": transaction_xdr }),
            )
            .await?;

        let simulation = SimulateTransactionResult {
            result_xdr: result["results"][0]["xdr"].as_str().map(String::from),
            transaction_data: result["transactionData"].as_str().map(String::from),
            min_resource_fee: result["minResourceFee"]
                .as_str()
                .unwrap_or("0")
                .to_string(),
            latest_ledger: result["latestLedger"].as_u64().unwrap_or(0),
            error: result["error"].as_str().map(String::from),
        };
        debug!(
            success = simulation.is_success(),
            fee = %simulation.min_resource_fee,
            "transaction simulated"
        );
        Ok(simulation)
    }

    /// Health check: node reports `healthy`
    pub async fn health_check(&self) -> Result<bool> {
        match self.get_health().await {
            Ok(health) if health.is_healthy() => {
                info!(latest_ledger = health.latest_ledger, "Soroban RPC healthy");
                Ok(true)
            }
            Ok(health) => {
                error!(status = %health.status, "Soroban RPC unhealthy");
                Ok(false)
            }
            Err(e) => {
                error!("Soroban RPC health check failed: {:?}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn create_test_config() -> Arc<GuardianConfig> {
        Arc::new(
            GuardianConfig::testnet(String::new(), String::new())
                .with_request_timeout(Duration::from_secs(10))
                .with_max_retries(1),
        )
    }

    #[test]
    fn test_request_id_increment() {
        let client = SorobanRpcClient::new(create_test_config()).unwrap();

        assert_eq!(client.next_request_id(), 1);
        assert_eq!(client.next_request_id(), 2);
        assert_eq!(client.next_request_id(), 3);
    }

    #[test]
    fn test_request_shape() {
        let params = json!({ "hash": "abc" });
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 7,
            method: "getTransaction",
            params: &params,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["id"], 7);
        assert_eq!(value["params"]["hash"], "abc");
    }
}
