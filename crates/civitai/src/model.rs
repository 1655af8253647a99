//! Typed CivitAI catalog payloads.
//!
//! Only the fields the scan pipeline reads are modeled; everything else
//! in the (large) catalog response is ignored during deserialization.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Top-level document returned by `GET /models/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelDocument {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub creator: Option<Creator>,
    /// Model kind, e.g. `LORA` or `Checkpoint`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "modelVersions")]
    pub model_versions: Vec<ModelVersion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Creator {
    #[serde(default)]
    pub username: Option<String>,
}

/// One published version of a model.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelVersion {
    #[serde(default)]
    pub name: Option<String>,
    /// RFC 3339 publication timestamp, as a raw string.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub base_model: Option<String>,
    #[serde(default)]
    pub trained_words: Vec<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub images: Vec<VersionImage>,
}

/// One showcase image attached to a model version.
///
/// Images routinely arrive without a generation metadata block, and the
/// block itself has no guaranteed shape (numbers sometimes appear as
/// strings), so `meta` stays a raw JSON object and its fields are
/// coerced individually during extraction.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionImage {
    #[serde(default)]
    pub meta: Option<Map<String, Value>>,
}
