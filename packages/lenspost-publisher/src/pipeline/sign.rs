use std::sync::Arc;

use async_trait::async_trait;
use lenspost_types::{Signature, TypedData};
use tracing::{info, warn};

use crate::error::{ClientError, PublishError};

/// An initialized wallet session able to sign typed data.
#[async_trait]
pub trait WalletSession: Send + Sync {
    fn address(&self) -> &str;

    /// Sign `typed_data.domain`, `typed_data.types` and `typed_data.value`
    /// as given. Rejection by the user is an `Err`.
    async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<Signature, ClientError>;
}

pub struct Signer {
    session: Arc<dyn WalletSession>,
}

impl Signer {
    pub fn new(session: Arc<dyn WalletSession>) -> Self {
        Self { session }
    }

    pub fn address(&self) -> &str {
        self.session.address()
    }

    pub async fn sign(&self, typed_data: &TypedData) -> Result<Signature, PublishError> {
        let signature = self.session.sign_typed_data(typed_data).await.map_err(|e| {
            warn!(address = %self.address(), error = %e, "Wallet signing failed");
            PublishError::Signature(e.0)
        })?;

        if signature.as_str().is_empty() {
            warn!(address = %self.address(), "Wallet returned an empty signature");
            return Err(PublishError::Signature("Wallet returned an empty signature".into()));
        }

        info!(address = %self.address(), "Typed data signed");
        Ok(signature)
    }
}
