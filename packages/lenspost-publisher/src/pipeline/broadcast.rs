use std::sync::Arc;

use async_trait::async_trait;
use lenspost_types::{ProtocolError, RelayOutcome, RelayPayload, SignedAction};
use tracing::{error, info, warn};

use crate::error::{PublishError, BROADCAST_FAILED};

/// Relay that submits a signed action on the user's behalf.
///
/// Returns the unwrapped relay payload; callers classify it with
/// [`lenspost_types::is_relay_success`].
#[async_trait]
pub trait RelayClient: Send + Sync {
    async fn broadcast_onchain(&self, action: &SignedAction) -> Result<RelayPayload, ProtocolError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastReceipt {
    pub tx_id: String,
    pub tx_hash: Option<String>,
}

pub struct Broadcaster {
    relay: Arc<dyn RelayClient>,
}

impl Broadcaster {
    pub fn new(relay: Arc<dyn RelayClient>) -> Self {
        Self { relay }
    }

    /// All-or-nothing: anything but a classified success is a broadcast error.
    pub async fn broadcast(&self, action: SignedAction) -> Result<BroadcastReceipt, PublishError> {
        let payload = self.relay.broadcast_onchain(&action).await.map_err(|e| {
            warn!(action_id = %action.id, error = %e, "Relay call failed");
            PublishError::Broadcast {
                message: e.to_string(),
                raw: None,
            }
        })?;

        match payload.classify() {
            RelayOutcome::Success { tx_id, tx_hash } => {
                info!(action_id = %action.id, tx_id = %tx_id, "Broadcasted");
                Ok(BroadcastReceipt { tx_id, tx_hash })
            }
            RelayOutcome::Failure { reason, raw } => {
                error!(action_id = %action.id, reason = %reason, raw = %raw, "{BROADCAST_FAILED}");
                Err(PublishError::Broadcast {
                    message: BROADCAST_FAILED.to_string(),
                    raw: Some(raw),
                })
            }
        }
    }
}
