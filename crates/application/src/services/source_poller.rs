use crate::events::{InternalEvent, SourceFetchFailed, SourceFetchSucceeded};
use crate::ports::QueryLogSource;
use crate::services::FailureGovernor;
use chrono::Utc;
use querylog_shipper_domain::{DomainError, FailureVerdict, QueryLogPage};
use std::sync::Arc;
use tracing::{debug, warn};

/// Fetches pages from the query log source and feeds every outcome to the
/// failure governor.
pub struct SourcePoller {
    source: Arc<dyn QueryLogSource>,
    governor: Arc<FailureGovernor>,
}

impl SourcePoller {
    pub fn new(source: Arc<dyn QueryLogSource>, governor: Arc<FailureGovernor>) -> Self {
        Self { source, governor }
    }

    pub fn governor(&self) -> &Arc<FailureGovernor> {
        &self.governor
    }

    /// Fetch one page.
    ///
    /// Returns `DomainError::CircuitOpen` once the governor has tripped,
    /// without calling the source.
    pub async fn fetch(
        &self,
        page_number: u32,
        entries_per_page: u32,
    ) -> Result<QueryLogPage, DomainError> {
        if self.governor.is_terminated() {
            return Err(DomainError::CircuitOpen {
                consecutive_failures: self.governor.consecutive_failures(),
            });
        }

        match self.source.fetch_page(page_number, entries_per_page).await {
            Ok(page) => {
                self.governor.record_success();
                SourceFetchSucceeded {
                    unix_timestamp: Utc::now().timestamp_millis() as f64 / 1000.0,
                }
                .emit();
                debug!(
                    page_number,
                    entries = page.entries.len(),
                    "Query log page fetched"
                );
                Ok(page)
            }
            Err(error) => {
                let verdict = self.governor.record_failure(&error);
                let (FailureVerdict::Retry {
                    consecutive_failures,
                }
                | FailureVerdict::Trip {
                    consecutive_failures,
                }) = verdict;
                let kind = error.kind();

                SourceFetchFailed {
                    kind,
                    consecutive_failures,
                }
                .emit();
                warn!(
                    error = %error,
                    error_type = kind.as_str(),
                    consecutive_failures,
                    page_number,
                    "Query log fetch failed"
                );

                if matches!(verdict, FailureVerdict::Trip { .. }) {
                    return Err(DomainError::CircuitOpen {
                        consecutive_failures,
                    });
                }
                Err(error.into())
            }
        }
    }
}
