//! Text-only publication metadata (Lens metadata schema 3.0.0).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const TEXT_ONLY_SCHEMA: &str = "https://json-schemas.lens.dev/publications/text-only/3.0.0.json";

const DEFAULT_LOCALE: &str = "en";

/// User input captured at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationDraft {
    pub content: String,
    pub app_id: String,
}

impl PublicationDraft {
    pub fn new(content: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            app_id: app_id.into(),
        }
    }
}

/// Content kind tag. Only plain text is produced by this pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MainContentFocus {
    TextOnly,
}

/// Canonical record uploaded to content-addressable storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMetadata {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub lens: LensMetadataBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LensMetadataBody {
    pub main_content_focus: MainContentFocus,
    pub content: String,
    pub id: String,
    pub app_id: String,
    pub locale: String,
}

impl ContentMetadata {
    pub fn content(&self) -> &str {
        &self.lens.content
    }

    pub fn app_id(&self) -> &str {
        &self.lens.app_id
    }

    /// Serialized JSON in schema field order.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Build the text-only record for a draft.
///
/// Total and deterministic: the metadata id is a UUID v5 over
/// `{app_id}\0{content}`, so the same draft always yields the same record.
pub fn build_text_only(draft: &PublicationDraft) -> ContentMetadata {
    let mut seed = Vec::with_capacity(draft.app_id.len() + 1 + draft.content.len());
    seed.extend_from_slice(draft.app_id.as_bytes());
    seed.push(0);
    seed.extend_from_slice(draft.content.as_bytes());

    ContentMetadata {
        schema: TEXT_ONLY_SCHEMA.to_string(),
        lens: LensMetadataBody {
            main_content_focus: MainContentFocus::TextOnly,
            content: draft.content.clone(),
            id: Uuid::new_v5(&Uuid::NAMESPACE_OID, &seed).to_string(),
            app_id: draft.app_id.clone(),
            locale: DEFAULT_LOCALE.to_string(),
        },
    }
}
