/// JSON-RPC client for EVM-compatible nodes
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy_primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{MintError, MintResult};

/// Call object for `eth_estimateGas`
#[derive(Debug, Clone, Serialize)]
pub struct CallRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

/// Chain operations the mint pipeline needs
#[async_trait]
pub trait ChainRpc: Send + Sync {
    async fn gas_price(&self) -> MintResult<U256>;

    async fn transaction_count(&self, address: Address) -> MintResult<u64>;

    async fn estimate_gas(&self, call: &CallRequest) -> MintResult<u64>;

    async fn balance(&self, address: Address) -> MintResult<U256>;

    /// Broadcast a signed transaction, returning its hash as hex
    async fn send_raw_transaction(&self, raw: &[u8]) -> MintResult<String>;
}

/// Configuration for the JSON-RPC client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub rpc_url: String,
    /// Request timeout in seconds
    pub request_timeout: u64,
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl std::fmt::Display for RpcErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)?;
        if let Some(data) = &self.data {
            write!(f, ": {}", data)?;
        }
        Ok(())
    }
}

/// HTTP JSON-RPC client
pub struct JsonRpcClient {
    client: Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(config: &ClientConfig) -> MintResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            client,
            url: config.rpc_url.clone(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Issue a single JSON-RPC call and decode its `result`
    pub async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> MintResult<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        tracing::debug!(method, id = request.id, "rpc request");

        let response = self.client.post(&self.url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MintError::Rpc(format!("{} failed with HTTP {}: {}", method, status, body)));
        }

        let body: RpcResponse<T> = response.json().await?;
        match (body.result, body.error) {
            (_, Some(error)) => Err(MintError::Rpc(format!("{}: {}", method, error))),
            (Some(result), None) => Ok(result),
            (None, None) => Err(MintError::Rpc(format!("{}: empty response", method))),
        }
    }
}

fn parse_quantity_u64(method: &str, value: &U256) -> MintResult<u64> {
    u64::try_from(*value)
        .map_err(|_| MintError::Rpc(format!("{}: quantity {} exceeds u64", method, value)))
}

#[async_trait]
impl ChainRpc for JsonRpcClient {
    async fn gas_price(&self) -> MintResult<U256> {
        self.request("eth_gasPrice", json!([])).await
    }

    async fn transaction_count(&self, address: Address) -> MintResult<u64> {
        let count: U256 = self
            .request("eth_getTransactionCount", json!([address, "latest"]))
            .await?;
        parse_quantity_u64("eth_getTransactionCount", &count)
    }

    async fn estimate_gas(&self, call: &CallRequest) -> MintResult<u64> {
        let estimate: U256 = self
            .request("eth_estimateGas", json!([call]))
            .await
            .map_err(|e| MintError::EstimationUnavailable(e.to_string()))?;
        parse_quantity_u64("eth_estimateGas", &estimate)
    }

    async fn balance(&self, address: Address) -> MintResult<U256> {
        self.request("eth_getBalance", json!([address, "latest"])).await
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> MintResult<String> {
        let raw_hex = format!("0x{}", hex::encode(raw));
        self.request("eth_sendRawTransaction", json!([raw_hex]))
            .await
            .map_err(|e| MintError::BroadcastRejected(e.to_string()))
    }
}
