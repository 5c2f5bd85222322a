//! Response types for the publisher API.

use serde::Serialize;

use crate::controller::{SubmissionOutcome, SubmissionState};
use crate::notify::Notification;

/// Response from the publish endpoint.
#[derive(Serialize)]
pub struct PublishResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

impl PublishResponse {
    pub fn from_outcome(outcome: &SubmissionOutcome) -> Self {
        let notification = Some(Notification::for_outcome(outcome));
        match outcome {
            SubmissionOutcome::Succeeded { tx_id, tx_hash } => Self {
                success: true,
                tx_id: Some(tx_id.clone()),
                tx_hash: tx_hash.clone(),
                error: None,
                step: None,
                notification,
            },
            SubmissionOutcome::Failed(e) => Self {
                success: false,
                tx_id: None,
                tx_hash: None,
                error: Some(e.user_message()),
                step: Some(e.kind()),
                notification,
            },
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            tx_id: None,
            tx_hash: None,
            error: Some(error.into()),
            step: None,
            notification: None,
        }
    }
}

/// Response from the status endpoint.
#[derive(Serialize)]
pub struct StatusResponse {
    pub state: SubmissionState,
    pub busy: bool,
    pub wallet_connected: bool,
}

/// Response from the health endpoint.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub app_id: String,
    pub uptime_secs: u64,
    pub submissions: u64,
}
