use super::build_client;
use async_trait::async_trait;
use querylog_shipper_application::ports::QueryLogSource;
use querylog_shipper_domain::config::SourceConfig;
use querylog_shipper_domain::{DomainError, QueryLogPage, SourceError};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Status the API reports when the token is missing, expired or revoked.
const STATUS_INVALID_TOKEN: &str = "invalid-token";
const STATUS_OK: &str = "ok";

/// Envelope wrapped around every API reply.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEnvelope {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    response: Option<QueryLogPage>,
}

/// Query log pages from the Technitium DNS server's query log app.
pub struct TechnitiumQueryLogSource {
    client: reqwest::Client,
    endpoint: String,
    token: String,
    app_name: String,
    class_path: String,
}

impl TechnitiumQueryLogSource {
    pub fn new(config: &SourceConfig) -> Result<Self, DomainError> {
        let client = build_client(Duration::from_secs(config.timeout_secs)).map_err(|e| {
            DomainError::InvalidResponse(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/logs/query", config.url.trim_end_matches('/')),
            token: config.token.clone(),
            app_name: config.app_name.clone(),
            class_path: config.class_path.clone(),
        })
    }

    fn classify_transport(error: reqwest::Error) -> SourceError {
        if error.is_timeout() {
            SourceError::Timeout(error.to_string())
        } else if error.is_connect() {
            SourceError::Network(error.to_string())
        } else {
            SourceError::Other(error.to_string())
        }
    }

    fn unwrap_envelope(envelope: ApiEnvelope) -> Result<QueryLogPage, SourceError> {
        if envelope.status == STATUS_OK {
            return Ok(envelope.response.unwrap_or_default());
        }

        let message = envelope
            .error_message
            .unwrap_or_else(|| format!("status '{}'", envelope.status));
        if envelope.status == STATUS_INVALID_TOKEN {
            return Err(SourceError::Authentication(message));
        }
        Err(SourceError::from_api_message(message))
    }
}

#[async_trait]
impl QueryLogSource for TechnitiumQueryLogSource {
    async fn fetch_page(
        &self,
        page_number: u32,
        entries_per_page: u32,
    ) -> Result<QueryLogPage, SourceError> {
        let page = page_number.to_string();
        let per_page = entries_per_page.to_string();

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("token", self.token.as_str()),
                ("name", self.app_name.as_str()),
                ("classPath", self.class_path.as_str()),
                ("pageNumber", page.as_str()),
                ("entriesPerPage", per_page.as_str()),
            ])
            .send()
            .await
            .map_err(Self::classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Other(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.bytes().await.map_err(Self::classify_transport)?;
        let envelope: ApiEnvelope = serde_json::from_slice(&body)
            .map_err(|e| SourceError::Other(format!("Undecodable API response: {}", e)))?;

        let page = Self::unwrap_envelope(envelope)?;
        debug!(
            page_number,
            entries_per_page,
            entries = page.entries.len(),
            "Query log API page received"
        );
        Ok(page)
    }
}
