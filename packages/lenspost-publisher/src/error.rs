//! Error types for the publisher.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lenspost_types::ProtocolError;
use serde_json::Value;
use thiserror::Error;

pub const UPLOAD_FAILED: &str = "Failed to upload to IPFS";
pub const BROADCAST_FAILED: &str = "Something went wrong when broadcasting";
pub const WALLET_NOT_INITIALIZED: &str = "Wallet session not initialized";
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Service-level error (startup, configuration, client construction).
#[derive(Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("client error: {0}")]
    Client(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Client(_) => StatusCode::BAD_GATEWAY,
        };
        let body = serde_json::json!({
            "success": false,
            "error": self.to_string()
        });
        (status, Json(body)).into_response()
    }
}

/// Transport or service failure reported by an external collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ClientError(pub String);

impl ClientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        Self(e.to_string())
    }
}

/// Step failure inside one submission. Display is the user-facing message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PublishError {
    /// No wallet session; raised before any network call.
    #[error("{0}")]
    Initialization(String),

    /// Storage unreachable or returned no usable URI.
    #[error("Failed to upload to IPFS")]
    Upload { detail: String },

    /// The protocol API wrapped an error around the typed-data request.
    #[error("{0}")]
    Protocol(#[from] ProtocolError),

    /// Wallet rejected or could not sign.
    #[error("{0}")]
    Signature(String),

    /// Relay call failed or its payload did not pass the success predicate.
    #[error("{message}")]
    Broadcast { message: String, raw: Option<Value> },
}

impl PublishError {
    pub fn upload(detail: impl Into<String>) -> Self {
        Self::Upload {
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Initialization(_) => "initialization",
            Self::Upload { .. } => "upload",
            Self::Protocol(_) => "protocol",
            Self::Signature(_) => "signature",
            Self::Broadcast { .. } => "broadcast",
        }
    }

    /// Message shown to the user, never empty.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message
        }
    }
}
