//! Field sets written to the Airtable tables.
//!
//! Serialized field names must match the Airtable column names exactly;
//! the store matches on column name, not position or schema.

use serde::Serialize;

/// One row in the LoRA models table.
///
/// `rating` is always `None` at creation time (populated by a separate
/// curation flow) and `test_image_prompt` starts empty.
#[derive(Debug, Clone, Serialize)]
pub struct LoraFields {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Author")]
    pub author: Option<String>,
    /// String form of the CivitAI model ID; the store's lookup key.
    #[serde(rename = "CivitAI ID")]
    pub civitai_id: String,
    /// `YYYY-MM-DD`, or `None` when the catalog date was absent or unparseable.
    #[serde(rename = "Published Date")]
    pub published_date: Option<String>,
    #[serde(rename = "Base Model")]
    pub base_model: Option<String>,
    /// Comma-joined trigger word list.
    #[serde(rename = "Trigger Words")]
    pub trigger_words: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Download URL")]
    pub download_url: Option<String>,
    #[serde(rename = "Version")]
    pub version: Option<String>,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Rating")]
    pub rating: Option<f64>,
    #[serde(rename = "Test Image Prompt")]
    pub test_image_prompt: String,
}

/// One row in the generation examples table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExampleFields {
    #[serde(rename = "Prompt")]
    pub prompt: String,
    #[serde(rename = "Negative Prompt")]
    pub negative_prompt: String,
    #[serde(rename = "Guidance Scale")]
    pub guidance_scale: f64,
    #[serde(rename = "Steps")]
    pub steps: i64,
    #[serde(rename = "Seed")]
    pub seed: i64,
    #[serde(rename = "Sampler")]
    pub sampler: String,
}
