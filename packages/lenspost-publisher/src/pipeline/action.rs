use std::sync::Arc;

use async_trait::async_trait;
use lenspost_types::{ContentDescriptor, ProtocolError, UnsignedAction};
use tracing::{info, warn};

use crate::error::PublishError;

/// Protocol resolver that turns a content URI into an unsigned post action.
///
/// The result is the wrapped value of the protocol API: `Err` carries the
/// reason the API attached to the failure.
#[async_trait]
pub trait ProtocolClient: Send + Sync {
    async fn create_post_typed_data(&self, content_uri: &str)
        -> Result<UnsignedAction, ProtocolError>;
}

pub struct TypedDataRequester {
    client: Arc<dyn ProtocolClient>,
}

impl TypedDataRequester {
    pub fn new(client: Arc<dyn ProtocolClient>) -> Self {
        Self { client }
    }

    /// One request per attempt, no retries.
    pub async fn request_action(
        &self,
        descriptor: &ContentDescriptor,
    ) -> Result<UnsignedAction, PublishError> {
        match self.client.create_post_typed_data(&descriptor.uri).await {
            Ok(action) => {
                info!(action_id = %action.id, "Typed data received");
                Ok(action)
            }
            Err(e) => {
                warn!(uri = %descriptor.uri, error = %e, "Typed data request failed");
                Err(PublishError::Protocol(e))
            }
        }
    }
}
