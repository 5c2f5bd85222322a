use std::sync::Arc;

use async_trait::async_trait;
use lenspost_types::{ContentDescriptor, ContentMetadata};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ClientError, PublishError};

/// Content-addressable storage. Returns one URI per item, in input order.
#[async_trait]
pub trait ContentStorage: Send + Sync {
    async fn upload(&self, items: Vec<Value>) -> Result<Vec<String>, ClientError>;
}

pub struct ContentUploader {
    storage: Arc<dyn ContentStorage>,
}

impl ContentUploader {
    pub fn new(storage: Arc<dyn ContentStorage>) -> Self {
        Self { storage }
    }

    /// Upload a single metadata record.
    ///
    /// An unreachable store and an empty or blank response are the same
    /// failure at this layer.
    pub async fn upload(&self, metadata: &ContentMetadata) -> Result<ContentDescriptor, PublishError> {
        let uris = self
            .storage
            .upload(vec![metadata.to_json()])
            .await
            .map_err(|e| {
                warn!(error = %e, "Storage upload failed");
                PublishError::upload(e.to_string())
            })?;

        match uris.into_iter().next() {
            Some(uri) if !uri.trim().is_empty() => {
                info!(uri = %uri, "Metadata uploaded");
                Ok(ContentDescriptor { uri })
            }
            _ => {
                warn!("Storage returned no URI");
                Err(PublishError::upload("empty upload response"))
            }
        }
    }
}
