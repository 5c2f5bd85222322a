//! # lenspost publisher
//!
//! Publishes text posts to Lens: metadata is uploaded to IPFS, turned into
//! typed data by the Lens API, signed by the user's wallet and relayed.
//!
//! ## Quick Start
//! ```bash
//! PUBLISHER_WALLET_ADDRESS=0x... cargo run --bin lenspost-publisher
//! ```
//!
//! ## Endpoints
//! - `POST /publications` - Publish `{"content": "..."}`
//! - `GET /status` - Submission state and busy flag
//! - `GET /health` - Health check
//! - `GET /metrics` - Prometheus metrics

pub mod clients;
pub mod config;
pub mod controller;
mod error;
mod handlers;
pub mod metrics;
mod middleware;
pub mod notify;
pub mod pipeline;
mod response;
mod router;
mod state;

pub use config::Config;
pub use controller::{Collaborators, SubmissionController, SubmissionOutcome, SubmissionState};
pub use error::{ClientError, Error, PublishError, BROADCAST_FAILED, UPLOAD_FAILED};
pub use notify::{Notification, NotificationSink, NotificationVariant, TracingNotifier};
pub use router::create as create_router;
pub use state::AppState;
