//! REST client for the CivitAI catalog API.

use std::time::Duration;

use lorascan_core::types::ModelId;

use crate::model::ModelDocument;

/// Bounded wait for catalog requests; the reference had none, which let
/// a hung catalog stall the scan worker forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the CivitAI catalog.
#[derive(Debug, Clone)]
pub struct CivitaiClient {
    client: reqwest::Client,
    api_url: String,
}

/// Errors from the catalog client.
///
/// Every variant is a handled scan failure from the controller's point
/// of view; none of them surfaces as a server error on the control
/// surface. `NotFound` exists so the scan log can say "not found"
/// instead of quoting a status code.
#[derive(Debug, thiserror::Error)]
pub enum CivitaiError {
    /// The HTTP request itself failed (timeout, DNS, connection reset).
    #[error("catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog has no model with this ID.
    #[error("model {0} not found on CivitAI")]
    NotFound(ModelId),

    /// The catalog answered with an unexpected status code.
    #[error("catalog returned status {status} for model {model_id}")]
    Status { model_id: ModelId, status: u16 },
}

impl CivitaiClient {
    /// Create a client for the given API base URL (no trailing slash),
    /// e.g. `https://civitai.com/api/v1`.
    pub fn new(api_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to construct HTTP client");
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    /// HTTP API base URL.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Fetch the catalog document for one model.
    ///
    /// Sends `GET {base}/models/{id}`. A 2xx response parses into a
    /// [`ModelDocument`]; anything else becomes an error value.
    pub async fn fetch_model(&self, model_id: ModelId) -> Result<ModelDocument, CivitaiError> {
        let url = format!("{}/models/{}", self.api_url, model_id);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CivitaiError::NotFound(model_id));
        }
        if !status.is_success() {
            return Err(CivitaiError::Status {
                model_id,
                status: status.as_u16(),
            });
        }

        tracing::debug!(model_id, "Fetched model document from catalog");
        Ok(response.json::<ModelDocument>().await?)
    }
}
