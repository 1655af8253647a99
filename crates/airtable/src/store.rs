//! LoRA persistence on top of the Airtable client.

use serde::Serialize;

use lorascan_core::record::{ExampleFields, LoraFields};
use lorascan_core::types::ModelId;

use crate::client::{AirtableClient, AirtableError};

/// Gateway to the LoRA models table and its generation-examples table.
#[derive(Debug, Clone)]
pub struct LoraStore {
    client: AirtableClient,
    lora_table: String,
    examples_table: String,
}

/// Example row payload: the example fields plus the link column back to
/// the parent LoRA record.
#[derive(Debug, Serialize)]
struct LinkedExample<'a> {
    #[serde(rename = "LORA")]
    lora: [&'a str; 1],
    #[serde(flatten)]
    fields: &'a ExampleFields,
}

impl LoraStore {
    pub fn new(client: AirtableClient, lora_table: String, examples_table: String) -> Self {
        Self {
            client,
            lora_table,
            examples_table,
        }
    }

    /// Persist one LoRA record and its generation examples.
    ///
    /// The primary record is created first; if that write fails nothing
    /// else is attempted. Example rows link back via the store-assigned
    /// record ID, so they can only be written afterwards, in input
    /// order. A failed example write is logged and skipped; the save
    /// still counts as successful once the primary row exists.
    pub async fn save(
        &self,
        lora: &LoraFields,
        examples: &[ExampleFields],
    ) -> Result<String, AirtableError> {
        let record = self.client.create_record(&self.lora_table, lora).await?;
        tracing::info!(record_id = %record.id, name = %lora.name, "Saved LoRA record");

        for (index, fields) in examples.iter().enumerate() {
            let linked = LinkedExample {
                lora: [record.id.as_str()],
                fields,
            };
            if let Err(e) = self
                .client
                .create_record(&self.examples_table, &linked)
                .await
            {
                tracing::warn!(
                    record_id = %record.id,
                    index,
                    error = %e,
                    "Failed to save generation example"
                );
            }
        }
        tracing::info!(count = examples.len(), "Saved generation examples");

        Ok(record.id)
    }

    /// Whether a LoRA row for this CivitAI model ID already exists.
    pub async fn model_exists(&self, model_id: ModelId) -> Result<bool, AirtableError> {
        let records = self
            .client
            .list_records(&self.lora_table, &id_formula(model_id))
            .await?;
        Ok(!records.is_empty())
    }
}

/// Formula matching rows whose `CivitAI ID` column equals `model_id`.
fn id_formula(model_id: ModelId) -> String {
    format!("{{CivitAI ID}}='{model_id}'")
}
