//! Relay broadcast payloads and their classification.

use serde::{Deserialize, Serialize};
use serde_json::Value;

const RELAY_SUCCESS: &str = "RelaySuccess";
const RELAY_ERROR: &str = "RelayError";

/// Unwrapped relay response, kept raw so failures can be logged verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelayPayload(pub Value);

impl RelayPayload {
    pub fn raw(&self) -> &Value {
        &self.0
    }

    pub fn typename(&self) -> Option<&str> {
        self.0.get("__typename").and_then(Value::as_str)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Split into `Success` or `Failure` using [`is_relay_success`].
    pub fn classify(self) -> RelayOutcome {
        if is_relay_success(&self) {
            return RelayOutcome::Success {
                tx_id: self.str_field("txId").unwrap_or_default().to_string(),
                tx_hash: self.str_field("txHash").map(str::to_string),
            };
        }

        let reason = match self.typename() {
            Some(RELAY_ERROR) => self
                .str_field("reason")
                .unwrap_or("relay error without reason")
                .to_string(),
            Some(RELAY_SUCCESS) => "relay success without txId".to_string(),
            Some(other) => format!("unexpected relay result type {other}"),
            None => "unrecognized relay payload".to_string(),
        };
        RelayOutcome::Failure {
            reason,
            raw: self.0,
        }
    }
}

/// True for a `RelaySuccess` payload carrying a transaction id.
pub fn is_relay_success(payload: &RelayPayload) -> bool {
    payload.typename() == Some(RELAY_SUCCESS) && payload.str_field("txId").is_some()
}

#[derive(Debug, Clone, PartialEq)]
pub enum RelayOutcome {
    Success {
        tx_id: String,
        tx_hash: Option<String>,
    },
    Failure {
        reason: String,
        raw: Value,
    },
}

impl RelayOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_payload() {
        let payload = RelayPayload(json!({
            "__typename": "RelaySuccess",
            "txHash": "0xhash",
            "txId": "0xabc123"
        }));
        assert!(is_relay_success(&payload));
        assert_eq!(
            payload.classify(),
            RelayOutcome::Success {
                tx_id: "0xabc123".into(),
                tx_hash: Some("0xhash".into())
            }
        );
    }

    #[test]
    fn test_success_without_hash() {
        let payload = RelayPayload(json!({"__typename": "RelaySuccess", "txId": "0x1"}));
        assert!(matches!(
            payload.classify(),
            RelayOutcome::Success { tx_hash: None, .. }
        ));
    }

    #[test]
    fn test_relay_error_keeps_raw() {
        let raw = json!({"__typename": "RelayError", "reason": "RATE_LIMITED"});
        let payload = RelayPayload(raw.clone());
        assert!(!is_relay_success(&payload));
        assert_eq!(
            payload.classify(),
            RelayOutcome::Failure {
                reason: "RATE_LIMITED".into(),
                raw
            }
        );
    }

    #[test]
    fn test_success_typename_without_tx_id_fails() {
        let payload = RelayPayload(json!({"__typename": "RelaySuccess", "txId": ""}));
        assert!(!is_relay_success(&payload));
        assert!(!payload.classify().is_success());
    }

    #[test]
    fn test_unrecognized_payload() {
        let payload = RelayPayload(json!({"foo": "bar"}));
        match payload.classify() {
            RelayOutcome::Failure { reason, raw } => {
                assert_eq!(reason, "unrecognized relay payload");
                assert_eq!(raw, json!({"foo": "bar"}));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
