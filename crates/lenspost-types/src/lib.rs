//! Shared types and pure-logic utilities for the lenspost publication pipeline.
//! No network or runtime dependency; the publisher and its tests both build on it.

mod error;
mod metadata;
mod relay;
mod typed_data;

pub use error::{ProtocolError, TypedDataError};
pub use metadata::{
    build_text_only, ContentMetadata, LensMetadataBody, MainContentFocus, PublicationDraft,
    TEXT_ONLY_SCHEMA,
};
pub use relay::{is_relay_success, RelayOutcome, RelayPayload};
pub use typed_data::{
    Signature, SignedAction, TypedData, TypedDataDomain, TypedDataField, UnsignedAction,
};

/// Immutable address of uploaded content, e.g. `ipfs://<cid>/0`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContentDescriptor {
    pub uri: String,
}
