use async_trait::async_trait;
use querylog_shipper_domain::{Cursor, DomainError};

/// Durable storage for the last fully delivered row number.
#[async_trait]
pub trait CursorStore: Send + Sync {
    /// Returns the persisted cursor.
    ///
    /// Missing or unreadable state yields `Cursor::ZERO`; corrupt state is
    /// never an error.
    async fn get(&self) -> Cursor;

    /// Persists `cursor`, replacing the previous value atomically.
    ///
    /// # Errors
    ///
    /// * `DomainError::IoError` - If the state could not be written
    async fn set(&self, cursor: Cursor) -> Result<(), DomainError>;
}
