use super::build_client;
use async_trait::async_trait;
use querylog_shipper_application::ports::LogSink;
use querylog_shipper_domain::config::SinkConfig;
use querylog_shipper_domain::{DomainError, PushRequest};
use std::time::Duration;
use tracing::debug;

const PUSH_PATH: &str = "/loki/api/v1/push";

/// Longest slice of a rejection body carried into the error message.
const MAX_ERROR_BODY: usize = 512;

/// Pushes streams to Loki's JSON push endpoint.
pub struct LokiPushClient {
    client: reqwest::Client,
    endpoint: String,
}

impl LokiPushClient {
    pub fn new(config: &SinkConfig) -> Result<Self, DomainError> {
        let client = build_client(Duration::from_secs(config.timeout_secs)).map_err(|e| {
            DomainError::SinkDelivery(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", config.url.trim_end_matches('/'), PUSH_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LogSink for LokiPushClient {
    async fn push(&self, request: &PushRequest) -> Result<(), DomainError> {
        let body = serde_json::to_vec(request)
            .map_err(|e| DomainError::Encoding(format!("Failed to encode push body: {}", e)))?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                DomainError::SinkDelivery(format!("Push to {} failed: {}", self.endpoint, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            let detail: String = detail.trim().chars().take(MAX_ERROR_BODY).collect();
            return Err(DomainError::SinkDelivery(format!(
                "{} returned HTTP {}: {}",
                self.endpoint,
                status.as_u16(),
                detail
            )));
        }

        debug!(
            streams = request.streams.len(),
            entries = request.entry_count(),
            "Push accepted"
        );
        Ok(())
    }
}
