/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
        }
    }
}

/// Upstream service configuration: the CivitAI catalog and the Airtable
/// store the scans are written to.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// CivitAI API root (default: `https://civitai.com/api/v1`).
    pub civitai_api_url: String,
    /// Airtable personal access token (required).
    pub airtable_token: String,
    /// Airtable base ID (required).
    pub airtable_base_id: String,
    /// Table holding LoRA records (default: `LORA Models`).
    pub lora_table: String,
    /// Table holding generation examples (default: `Generation Examples`).
    pub examples_table: String,
}

impl UpstreamConfig {
    /// Load upstream configuration from environment variables.
    ///
    /// Panics at startup if a required variable is missing, which is the
    /// desired behaviour -- the service cannot do anything useful
    /// without store credentials.
    ///
    /// | Env Var                   | Default                     |
    /// |---------------------------|-----------------------------|
    /// | `CIVITAI_API_URL`         | `https://civitai.com/api/v1`|
    /// | `AIRTABLE_TOKEN`          | (required)                  |
    /// | `AIRTABLE_BASE_ID`        | (required)                  |
    /// | `AIRTABLE_LORA_TABLE`     | `LORA Models`               |
    /// | `AIRTABLE_EXAMPLES_TABLE` | `Generation Examples`       |
    pub fn from_env() -> Self {
        let civitai_api_url = std::env::var("CIVITAI_API_URL")
            .unwrap_or_else(|_| "https://civitai.com/api/v1".into());

        let airtable_token =
            std::env::var("AIRTABLE_TOKEN").expect("AIRTABLE_TOKEN must be set");
        let airtable_base_id =
            std::env::var("AIRTABLE_BASE_ID").expect("AIRTABLE_BASE_ID must be set");

        let lora_table =
            std::env::var("AIRTABLE_LORA_TABLE").unwrap_or_else(|_| "LORA Models".into());
        let examples_table = std::env::var("AIRTABLE_EXAMPLES_TABLE")
            .unwrap_or_else(|_| "Generation Examples".into());

        Self {
            civitai_api_url,
            airtable_token,
            airtable_base_id,
            lora_table,
            examples_table,
        }
    }
}
