//! User-facing notifications emitted once per submission.

use serde::Serialize;
use tracing::{info, warn};

use crate::controller::SubmissionOutcome;

pub const SUCCESS_TITLE: &str = "Successfully posted";
pub const SUCCESS_DESCRIPTION: &str = "Your post was successfully posted";
pub const RETRY_DESCRIPTION: &str = "Please try again later";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn success() -> Self {
        Self {
            title: SUCCESS_TITLE.into(),
            description: SUCCESS_DESCRIPTION.into(),
            variant: NotificationVariant::Default,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            title: message.into(),
            description: RETRY_DESCRIPTION.into(),
            variant: NotificationVariant::Destructive,
        }
    }

    pub fn for_outcome(outcome: &SubmissionOutcome) -> Self {
        match outcome {
            SubmissionOutcome::Succeeded { .. } => Self::success(),
            SubmissionOutcome::Failed(e) => Self::failure(e.user_message()),
        }
    }
}

/// Receives the outcome notification of each submission.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.variant {
            NotificationVariant::Default => info!(
                title = %notification.title,
                description = %notification.description,
                "Notification"
            ),
            NotificationVariant::Destructive => warn!(
                title = %notification.title,
                description = %notification.description,
                "Notification"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PublishError;

    #[test]
    fn test_success_notification() {
        let outcome = SubmissionOutcome::Succeeded {
            tx_id: "0x1".into(),
            tx_hash: None,
        };
        let n = Notification::for_outcome(&outcome);
        assert_eq!(n.title, SUCCESS_TITLE);
        assert_eq!(n.variant, NotificationVariant::Default);
    }

    #[test]
    fn test_failure_notification_uses_error_message() {
        let outcome = SubmissionOutcome::Failed(PublishError::upload("timeout"));
        let n = Notification::for_outcome(&outcome);
        assert_eq!(n.title, "Failed to upload to IPFS");
        assert_eq!(n.description, RETRY_DESCRIPTION);
        assert_eq!(n.variant, NotificationVariant::Destructive);
    }

    #[test]
    fn test_variant_serializes_lowercase() {
        let json = serde_json::to_value(Notification::failure("x")).unwrap();
        assert_eq!(json["variant"], "destructive");
    }
}
