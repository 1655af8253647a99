//! Minimal Airtable REST client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Public Airtable API root.
const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";

/// Bounded wait for store requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for one Airtable base.
///
/// Authenticates every request with a pre-provisioned bearer token.
#[derive(Debug, Clone)]
pub struct AirtableClient {
    client: reqwest::Client,
    api_url: String,
    token: String,
    base_id: String,
}

/// A record as returned by the Airtable API.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    /// Store-assigned record ID (`rec...`).
    pub id: String,
    #[serde(default)]
    pub fields: Value,
}

/// Response envelope for the list endpoint.
#[derive(Debug, Deserialize)]
struct RecordList {
    #[serde(default)]
    records: Vec<Record>,
}

/// Errors from the Airtable REST layer.
#[derive(Debug, thiserror::Error)]
pub enum AirtableError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("store request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Airtable returned a non-2xx status code.
    #[error("store returned status {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl AirtableClient {
    /// Create a client for one base against the public Airtable API.
    pub fn new(token: impl Into<String>, base_id: impl Into<String>) -> Self {
        Self::with_api_url(token, base_id, DEFAULT_API_URL)
    }

    /// Create a client against an alternate API root (used by tests to
    /// point at a local stand-in server).
    pub fn with_api_url(
        token: impl Into<String>,
        base_id: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to construct HTTP client");
        Self {
            client,
            api_url: api_url.into(),
            token: token.into(),
            base_id: base_id.into(),
        }
    }

    /// Create one record in `table`. `fields` serializes to the
    /// column-name/value map Airtable expects.
    ///
    /// Returns the stored record carrying its store-assigned ID.
    pub async fn create_record(
        &self,
        table: &str,
        fields: &impl Serialize,
    ) -> Result<Record, AirtableError> {
        let body = serde_json::json!({ "fields": fields });

        let response = self
            .client
            .post(self.table_url(table))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// List records in `table` matching a `filterByFormula` expression.
    pub async fn list_records(
        &self,
        table: &str,
        formula: &str,
    ) -> Result<Vec<Record>, AirtableError> {
        let response = self
            .client
            .get(self.table_url(table))
            .bearer_auth(&self.token)
            .query(&[("filterByFormula", formula)])
            .send()
            .await?;

        let list: RecordList = Self::parse_response(response).await?;
        Ok(list.records)
    }

    // ---- private helpers ----

    /// `{api}/{base}/{table}`. Table names may contain spaces ("LORA
    /// Models"); Airtable accepts them percent-escaped.
    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/{}/{}",
            self.api_url,
            self.base_id,
            table.replace(' ', "%20")
        )
    }

    /// Ensure the response has a success status code, or turn it into an
    /// [`AirtableError::Api`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AirtableError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AirtableError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AirtableError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
