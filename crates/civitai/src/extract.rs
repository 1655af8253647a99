//! Catalog document to store record extraction.

use chrono::DateTime;
use serde_json::Value;

use lorascan_core::record::{ExampleFields, LoraFields};

use crate::model::{ModelDocument, ModelVersion};

/// Model kind recorded when the catalog omits one.
const DEFAULT_MODEL_TYPE: &str = "LORA";

/// Flatten a catalog document into one LoRA record plus one example per
/// showcase image that carries generation metadata.
///
/// The first entry of `modelVersions` is the version of record. That is
/// a positional convention inherited from the upstream payload; the
/// catalog does not document any ordering guarantee, so no "latest by
/// date" selection is attempted here.
pub fn extract_lora(doc: &ModelDocument) -> (LoraFields, Vec<ExampleFields>) {
    let version = doc.model_versions.first();

    let lora = LoraFields {
        name: doc.name.clone(),
        author: doc.creator.as_ref().and_then(|c| c.username.clone()),
        civitai_id: doc.id.to_string(),
        published_date: version
            .and_then(|v| v.created_at.as_deref())
            .and_then(format_published_date),
        base_model: version.and_then(|v| v.base_model.clone()),
        trigger_words: version
            .map(|v| v.trained_words.join(", "))
            .unwrap_or_default(),
        kind: doc
            .kind
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL_TYPE.to_string()),
        download_url: version.and_then(|v| v.download_url.clone()),
        version: version.and_then(|v| v.name.clone()),
        description: doc.description.clone().unwrap_or_default(),
        rating: None,
        test_image_prompt: String::new(),
    };

    let examples = version.map(extract_examples).unwrap_or_default();

    (lora, examples)
}

/// One [`ExampleFields`] per image with a non-empty `meta` block.
///
/// Images without usable metadata are skipped silently; they only
/// shrink the example count, never fail the scan.
fn extract_examples(version: &ModelVersion) -> Vec<ExampleFields> {
    version
        .images
        .iter()
        .filter_map(|image| image.meta.as_ref())
        .filter(|meta| !meta.is_empty())
        .map(|meta| ExampleFields {
            prompt: string_field(meta.get("prompt")),
            negative_prompt: string_field(meta.get("negativePrompt")),
            guidance_scale: coerce_f64(meta.get("cfgScale")),
            steps: coerce_i64(meta.get("steps")),
            seed: coerce_i64(meta.get("seed")),
            sampler: string_field(meta.get("sampler")),
        })
        .collect()
}

/// Reformat the version's RFC 3339 `createdAt` (trailing `Z` accepted)
/// as `YYYY-MM-DD`. Any parse failure yields `None`, never an error.
fn format_published_date(created_at: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(created_at)
        .ok()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
}

fn string_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

/// Lossy numeric read: JSON numbers pass through, numeric strings
/// parse, anything else (including absence) becomes 0.0. The metadata
/// block is user-generated upstream and mixes representations freely.
fn coerce_f64(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn coerce_i64(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_document(text: &str) -> Result<ModelDocument, serde_json::Error> {
        serde_json::from_str(text)
    }

    fn sample_document() -> ModelDocument {
        parse_document(
            r#"{
                "id": 42,
                "name": "Foo",
                "creator": {"username": "bar"},
                "modelVersions": [{
                    "createdAt": "2024-01-02T00:00:00Z",
                    "baseModel": "SD1.5",
                    "trainedWords": ["a", "b"],
                    "images": [{
                        "meta": {
                            "prompt": "p",
                            "cfgScale": 7,
                            "steps": 20,
                            "seed": 123,
                            "sampler": "euler"
                        }
                    }]
                }]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn extracts_lora_record_from_sample_document() {
        let (lora, examples) = extract_lora(&sample_document());

        assert_eq!(lora.name, "Foo");
        assert_eq!(lora.author.as_deref(), Some("bar"));
        assert_eq!(lora.civitai_id, "42");
        assert_eq!(lora.published_date.as_deref(), Some("2024-01-02"));
        assert_eq!(lora.base_model.as_deref(), Some("SD1.5"));
        assert_eq!(lora.trigger_words, "a, b");
        assert_eq!(lora.kind, "LORA");
        assert_eq!(lora.description, "");
        assert_eq!(lora.rating, None);
        assert_eq!(lora.test_image_prompt, "");

        assert_eq!(
            examples,
            vec![ExampleFields {
                prompt: "p".to_string(),
                negative_prompt: String::new(),
                guidance_scale: 7.0,
                steps: 20,
                seed: 123,
                sampler: "euler".to_string(),
            }]
        );
    }

    #[test]
    fn malformed_created_at_yields_absent_published_date() {
        let doc = parse_document(
            r#"{"id": 1, "name": "X", "modelVersions": [{"createdAt": "not-a-date"}]}"#,
        )
        .unwrap();

        let (lora, _) = extract_lora(&doc);
        assert_eq!(lora.published_date, None);
    }

    #[test]
    fn missing_created_at_yields_absent_published_date() {
        let doc = parse_document(r#"{"id": 1, "name": "X", "modelVersions": [{}]}"#).unwrap();
        let (lora, _) = extract_lora(&doc);
        assert_eq!(lora.published_date, None);
    }

    #[test]
    fn zero_images_yield_zero_examples() {
        let doc = parse_document(r#"{"id": 1, "name": "X", "modelVersions": [{}]}"#).unwrap();
        let (_, examples) = extract_lora(&doc);
        assert!(examples.is_empty());
    }

    #[test]
    fn images_without_meta_are_skipped() {
        let doc = parse_document(
            r#"{"id": 1, "name": "X", "modelVersions": [{
                "images": [
                    {"meta": null},
                    {"meta": {}},
                    {},
                    {"meta": {"prompt": "kept"}}
                ]
            }]}"#,
        )
        .unwrap();

        let (_, examples) = extract_lora(&doc);
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].prompt, "kept");
    }

    #[test]
    fn absent_meta_numerics_default_to_zero() {
        let doc = parse_document(
            r#"{"id": 1, "name": "X", "modelVersions": [{
                "images": [{"meta": {"prompt": "p"}}]
            }]}"#,
        )
        .unwrap();

        let (_, examples) = extract_lora(&doc);
        assert_eq!(examples[0].guidance_scale, 0.0);
        assert_eq!(examples[0].steps, 0);
        assert_eq!(examples[0].seed, 0);
        assert_eq!(examples[0].sampler, "");
        assert_eq!(examples[0].negative_prompt, "");
    }

    #[test]
    fn numeric_strings_in_meta_are_coerced() {
        let doc = parse_document(
            r#"{"id": 1, "name": "X", "modelVersions": [{
                "images": [{"meta": {"cfgScale": "7.5", "steps": "30", "seed": "99"}}]
            }]}"#,
        )
        .unwrap();

        let (_, examples) = extract_lora(&doc);
        assert_eq!(examples[0].guidance_scale, 7.5);
        assert_eq!(examples[0].steps, 30);
        assert_eq!(examples[0].seed, 99);
    }

    #[test]
    fn fractional_cfg_scale_survives_and_fractional_steps_truncate() {
        let doc = parse_document(
            r#"{"id": 1, "name": "X", "modelVersions": [{
                "images": [{"meta": {"cfgScale": 7.5, "steps": 20.0}}]
            }]}"#,
        )
        .unwrap();

        let (_, examples) = extract_lora(&doc);
        assert_eq!(examples[0].guidance_scale, 7.5);
        assert_eq!(examples[0].steps, 20);
    }

    #[test]
    fn missing_type_defaults_to_lora() {
        let doc = parse_document(r#"{"id": 1, "name": "X"}"#).unwrap();
        let (lora, _) = extract_lora(&doc);
        assert_eq!(lora.kind, "LORA");
    }

    #[test]
    fn empty_version_list_yields_bare_record() {
        let doc = parse_document(r#"{"id": 1, "name": "X"}"#).unwrap();
        let (lora, examples) = extract_lora(&doc);

        assert_eq!(lora.trigger_words, "");
        assert_eq!(lora.published_date, None);
        assert_eq!(lora.base_model, None);
        assert_eq!(lora.version, None);
        assert!(examples.is_empty());
    }

    #[test]
    fn first_version_is_selected_positionally() {
        let doc = parse_document(
            r#"{"id": 1, "name": "X", "modelVersions": [
                {"baseModel": "first"},
                {"baseModel": "second", "createdAt": "2025-01-01T00:00:00Z"}
            ]}"#,
        )
        .unwrap();

        let (lora, _) = extract_lora(&doc);
        assert_eq!(lora.base_model.as_deref(), Some("first"));
    }
}
