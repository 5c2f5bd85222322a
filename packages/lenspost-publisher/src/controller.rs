//! Submission controller: runs the pipeline steps in order and owns the
//! submission state machine.
//!
//! ```text
//! Idle ──submit──> Uploading ──> RequestingAction ──> Signing ──> Broadcasting ──> Succeeded ──notify──> Idle
//!                      │                 │               │              │
//!                      └─────────────────┴───────────────┴──────────────┴──> Failed ──notify──> Idle
//! ```
//!
//! A missing wallet session fails the attempt before `Uploading` is entered.
//! Failures are never retried and nothing already produced (an uploaded
//! content URI, an action id) is rolled back.
//!
//! The state is published through a `tokio::sync::watch` channel. It is set
//! only once `submit` starts running, so two calls issued before either has
//! been polled both run a full pipeline; callers that need single-flight
//! must check [`SubmissionController::is_busy`] themselves.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use lenspost_types::{build_text_only, PublicationDraft};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{PublishError, WALLET_NOT_INITIALIZED};
use crate::metrics::METRICS;
use crate::notify::{Notification, NotificationSink};
use crate::pipeline::{
    BroadcastReceipt, Broadcaster, ContentStorage, ContentUploader, ProtocolClient, RelayClient,
    Signer, TypedDataRequester, WalletSession,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Uploading,
    RequestingAction,
    Signing,
    Broadcasting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    /// Busy from `Uploading` until the post-notification reset to `Idle`.
    pub fn is_busy(self) -> bool {
        self != Self::Idle
    }
}

/// Resolved result of one `submit` call.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Succeeded {
        tx_id: String,
        tx_hash: Option<String>,
    },
    Failed(PublishError),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    pub fn tx_id(&self) -> Option<&str> {
        match self {
            Self::Succeeded { tx_id, .. } => Some(tx_id),
            Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&PublishError> {
        match self {
            Self::Succeeded { .. } => None,
            Self::Failed(e) => Some(e),
        }
    }
}

/// External services the controller is wired to.
pub struct Collaborators {
    pub storage: Arc<dyn ContentStorage>,
    pub protocol: Arc<dyn ProtocolClient>,
    pub relay: Arc<dyn RelayClient>,
    /// `None` until a wallet session is connected.
    pub wallet: Option<Arc<dyn WalletSession>>,
    pub notifier: Arc<dyn NotificationSink>,
}

pub struct SubmissionController {
    app_id: String,
    uploader: ContentUploader,
    requester: TypedDataRequester,
    signer: Option<Signer>,
    broadcaster: Broadcaster,
    notifier: Arc<dyn NotificationSink>,
    state: watch::Sender<SubmissionState>,
}

impl SubmissionController {
    pub fn new(app_id: impl Into<String>, collaborators: Collaborators) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self {
            app_id: app_id.into(),
            uploader: ContentUploader::new(collaborators.storage),
            requester: TypedDataRequester::new(collaborators.protocol),
            signer: collaborators.wallet.map(Signer::new),
            broadcaster: Broadcaster::new(collaborators.relay),
            notifier: collaborators.notifier,
            state,
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.borrow()
    }

    pub fn is_busy(&self) -> bool {
        self.state().is_busy()
    }

    /// Observe state transitions.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    pub fn has_wallet(&self) -> bool {
        self.signer.is_some()
    }

    /// Publish `content` as a text-only post.
    ///
    /// Never returns an error: every step failure becomes
    /// `SubmissionOutcome::Failed`. Exactly one notification is emitted and
    /// the state is back to `Idle` when this resolves.
    pub async fn submit(&self, content: impl Into<String>) -> SubmissionOutcome {
        let start = Instant::now();
        METRICS.submissions_total.fetch_add(1, Ordering::Relaxed);

        let draft = PublicationDraft::new(content, self.app_id.as_str());
        let outcome = match self.run(&draft).await {
            Ok(receipt) => {
                self.transition(SubmissionState::Succeeded);
                METRICS.submissions_succeeded.fetch_add(1, Ordering::Relaxed);
                info!(tx_id = %receipt.tx_id, "Publication broadcasted");
                SubmissionOutcome::Succeeded {
                    tx_id: receipt.tx_id,
                    tx_hash: receipt.tx_hash,
                }
            }
            Err(e) => {
                self.transition(SubmissionState::Failed);
                METRICS.record_failure(&e);
                warn!(step = e.kind(), error = %e, "Publication failed");
                SubmissionOutcome::Failed(e)
            }
        };

        self.notifier.notify(Notification::for_outcome(&outcome));
        self.transition(SubmissionState::Idle);
        METRICS.record_pipeline_duration(start);
        outcome
    }

    async fn run(&self, draft: &PublicationDraft) -> Result<BroadcastReceipt, PublishError> {
        let signer = self
            .signer
            .as_ref()
            .ok_or_else(|| PublishError::Initialization(WALLET_NOT_INITIALIZED.into()))?;

        self.transition(SubmissionState::Uploading);
        let metadata = build_text_only(draft);
        let descriptor = self.uploader.upload(&metadata).await?;

        self.transition(SubmissionState::RequestingAction);
        let action = self.requester.request_action(&descriptor).await?;

        self.transition(SubmissionState::Signing);
        let signature = signer.sign(&action.typed_data).await?;

        self.transition(SubmissionState::Broadcasting);
        self.broadcaster.broadcast(action.into_signed(signature)).await
    }

    fn transition(&self, next: SubmissionState) {
        let prev = self.state.send_replace(next);
        debug!(from = ?prev, to = ?next, "Submission state");
    }
}
