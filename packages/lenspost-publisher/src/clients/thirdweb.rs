//! IPFS uploads through the thirdweb storage gateway.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::ClientError;
use crate::pipeline::ContentStorage;

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(rename = "IpfsHash", default)]
    ipfs_hash: String,
}

/// Uploads records as `files/{i}` inside one wrapping directory, so the
/// returned URIs are `ipfs://{cid}/{i}` in input order.
pub struct ThirdwebStorage {
    http: reqwest::Client,
    upload_url: String,
    secret_key: Option<String>,
}

impl ThirdwebStorage {
    pub fn new(http: reqwest::Client, upload_url: impl Into<String>, secret_key: Option<String>) -> Self {
        Self {
            http,
            upload_url: upload_url.into(),
            secret_key,
        }
    }

    fn form(items: &[Value]) -> Result<Form, ClientError> {
        let mut form = Form::new();
        for (i, item) in items.iter().enumerate() {
            let part = Part::text(item.to_string())
                .file_name(format!("files/{i}"))
                .mime_str("application/json")?;
            form = form.part("file", part);
        }
        Ok(form
            .text("pinataMetadata", json!({"name": "Storage SDK", "keyvalues": {}}).to_string())
            .text("pinataOptions", json!({"wrapWithDirectory": true}).to_string()))
    }
}

#[async_trait]
impl ContentStorage for ThirdwebStorage {
    async fn upload(&self, items: Vec<Value>) -> Result<Vec<String>, ClientError> {
        let mut request = self.http.post(&self.upload_url).multipart(Self::form(&items)?);
        if let Some(key) = &self.secret_key {
            request = request.header("x-secret-key", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError(format!("storage upload returned {status}: {body}")));
        }

        let body: UploadResponse = response.json().await?;
        debug!(cid = %body.ipfs_hash, files = items.len(), "Storage upload response");
        if body.ipfs_hash.is_empty() {
            return Ok(Vec::new());
        }

        Ok((0..items.len())
            .map(|i| format!("ipfs://{}/{i}", body.ipfs_hash))
            .collect())
    }
}
