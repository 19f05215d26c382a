use async_trait::async_trait;
use querylog_shipper_domain::{QueryLogPage, SourceError};

/// Reverse-paginated query log API.
///
/// Page 1 holds the newest entries; entries within a page are ordered by
/// descending row number.
#[async_trait]
pub trait QueryLogSource: Send + Sync {
    async fn fetch_page(
        &self,
        page_number: u32,
        entries_per_page: u32,
    ) -> Result<QueryLogPage, SourceError>;
}
