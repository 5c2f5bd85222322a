//! Lens API (GraphQL) client: typed-data requests and relay broadcasts.

use async_trait::async_trait;
use lenspost_types::{ProtocolError, RelayPayload, SignedAction, TypedData, UnsignedAction};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::pipeline::{ProtocolClient, RelayClient};

const CREATE_ONCHAIN_POST_TYPED_DATA: &str = r#"
mutation CreateOnchainPostTypedData($request: OnchainPostRequest!) {
  createOnchainPostTypedData(request: $request) {
    id
    expiresAt
    typedData {
      types { Post { name type } }
      domain { name chainId version verifyingContract }
      value {
        nonce
        deadline
        profileId
        contentURI
        actionModules
        actionModulesInitDatas
        referenceModule
        referenceModuleInitData
      }
    }
  }
}"#;

const BROADCAST_ONCHAIN: &str = r#"
mutation BroadcastOnchain($request: BroadcastRequest!) {
  broadcastOnchain(request: $request) {
    __typename
    ... on RelaySuccess { txHash txId }
    ... on RelayError { reason }
  }
}"#;

#[derive(Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(default)]
    extensions: Option<GraphQlErrorExtensions>,
}

#[derive(Deserialize)]
struct GraphQlErrorExtensions {
    code: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePostData {
    create_onchain_post_typed_data: TypedDataResult,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypedDataResult {
    id: String,
    typed_data: TypedData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BroadcastData {
    broadcast_onchain: Value,
}

/// Authenticated Lens API client.
pub struct LensApiClient {
    http: reqwest::Client,
    api_url: String,
    access_token: Option<String>,
}

impl LensApiClient {
    pub fn new(http: reqwest::Client, api_url: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            access_token,
        }
    }

    /// Run one GraphQL operation. GraphQL `errors` become the wrapped error.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Result<T, ProtocolError> {
        let mut request = self
            .http
            .post(&self.api_url)
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(token) = &self.access_token {
            request = request.header("x-access-token", format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProtocolError::new(format!("Lens API unreachable: {e}")))?;
        let status = response.status();
        let body: GraphQlResponse = response.json().await.map_err(|e| {
            ProtocolError::new(format!("Invalid Lens API response ({status}): {e}"))
        })?;

        if let Some(first) = body.errors.into_iter().next() {
            debug!(operation, error = %first.message, "Lens API returned errors");
            let err = ProtocolError::new(first.message);
            return Err(match first.extensions.and_then(|x| x.code) {
                Some(code) => err.with_code(code),
                None => err,
            });
        }

        let data = body
            .data
            .filter(|d| !d.is_null())
            .ok_or_else(|| ProtocolError::new(format!("Lens API returned no data for {operation}")))?;
        serde_json::from_value(data).map_err(|e| {
            ProtocolError::new(format!("Unexpected {operation} response shape: {e}"))
        })
    }
}

#[async_trait]
impl ProtocolClient for LensApiClient {
    async fn create_post_typed_data(
        &self,
        content_uri: &str,
    ) -> Result<UnsignedAction, ProtocolError> {
        let data: CreatePostData = self
            .execute(
                "createOnchainPostTypedData",
                CREATE_ONCHAIN_POST_TYPED_DATA,
                json!({ "request": { "contentURI": content_uri } }),
            )
            .await?;
        let result = data.create_onchain_post_typed_data;
        Ok(UnsignedAction {
            id: result.id,
            typed_data: result.typed_data,
        })
    }
}

#[async_trait]
impl RelayClient for LensApiClient {
    async fn broadcast_onchain(&self, action: &SignedAction) -> Result<RelayPayload, ProtocolError> {
        let data: BroadcastData = self
            .execute(
                "broadcastOnchain",
                BROADCAST_ONCHAIN,
                json!({ "request": { "id": action.id, "signature": action.signature } }),
            )
            .await?;
        Ok(RelayPayload(data.broadcast_onchain))
    }
}
