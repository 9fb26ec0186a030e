use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

use super::{AddInvokeTransactionResult, Provider, ProviderError};
use crate::errors::SignerError;
use crate::transaction::InvokeTransaction;

/// Minimal Starknet JSON-RPC client. Retries belong to the caller.
#[derive(Debug)]
pub struct JsonRpcProvider {
    http_client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SignerError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SignerError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, ProviderError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!("JSON-RPC request {} #{} to {}", method, id, self.url);

        let response = self
            .http_client
            .post(&self.url)
            .json(&json_rpc_request(id, method, params))
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::Transport(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        parse_response(body)
    }
}

#[async_trait]
impl Provider for JsonRpcProvider {
    async fn chain_id(&self) -> Result<String, ProviderError> {
        self.request("starknet_chainId", json!([])).await
    }

    async fn add_invoke_transaction(
        &self,
        transaction: &InvokeTransaction,
    ) -> Result<AddInvokeTransactionResult, ProviderError> {
        self.request(
            "starknet_addInvokeTransaction",
            json!({ "invoke_transaction": transaction }),
        )
        .await
    }
}

fn json_rpc_request(id: u64, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params,
    })
}

fn parse_response<T: DeserializeOwned>(mut body: Value) -> Result<T, ProviderError> {
    if let Some(error) = body.get("error") {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error");
        let message = match error.get("data").and_then(Value::as_str) {
            Some(data) => format!("{message}: {data}"),
            None => message.to_string(),
        };
        return Err(ProviderError::Rpc { code, message });
    }

    let result = body
        .get_mut("result")
        .map(Value::take)
        .ok_or_else(|| ProviderError::InvalidResponse("Missing result".to_string()))?;

    serde_json::from_value(result).map_err(|e| ProviderError::InvalidResponse(e.to_string()))
}
