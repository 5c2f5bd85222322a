//! Wallet session backed by an `eth_signTypedData_v4` JSON-RPC signer.

use async_trait::async_trait;
use lenspost_types::{Signature, TypedData};
use serde::Deserialize;
use serde_json::json;

use crate::error::ClientError;
use crate::pipeline::WalletSession;

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Signs through an external signer (browser bridge, Clef, node with an
/// unlocked account). Rejection by the user arrives as a JSON-RPC error.
pub struct JsonRpcWallet {
    http: reqwest::Client,
    rpc_url: String,
    address: String,
}

impl JsonRpcWallet {
    pub fn new(http: reqwest::Client, rpc_url: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            http,
            rpc_url: rpc_url.into(),
            address: address.into(),
        }
    }
}

#[async_trait]
impl WalletSession for JsonRpcWallet {
    fn address(&self) -> &str {
        &self.address
    }

    async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<Signature, ClientError> {
        let document = typed_data
            .to_eip712_json()
            .map_err(|e| ClientError(e.to_string()))?;

        let response: RpcResponse = self
            .http
            .post(&self.rpc_url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "eth_signTypedData_v4",
                "params": [self.address, document.to_string()],
            }))
            .send()
            .await?
            .json()
            .await?;

        if let Some(err) = response.error {
            return Err(ClientError(format!("{} (code {})", err.message, err.code)));
        }

        response
            .result
            .map(Signature)
            .ok_or_else(|| ClientError::new("Signer returned neither result nor error"))
    }
}
