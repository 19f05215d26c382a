use async_trait::async_trait;
use querylog_shipper_domain::{DomainError, PushRequest};

/// Push-based log store.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Delivers every stream in `request` or none of them.
    ///
    /// # Errors
    ///
    /// * `DomainError::SinkDelivery` - If the store did not accept the request
    async fn push(&self, request: &PushRequest) -> Result<(), DomainError>;
}
