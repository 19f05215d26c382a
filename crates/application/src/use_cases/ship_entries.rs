use crate::events::{EntriesShipped, InternalEvent, SinkPushFailed};
use crate::ports::{CursorStore, LogSink};
use crate::services::StreamFormatter;
use querylog_shipper_domain::{Cursor, DomainError, LogEntry};
use std::sync::Arc;
use tracing::{debug, error};

/// Entries per push unless configured otherwise.
pub const DEFAULT_SUB_BATCH_SIZE: usize = 100;

#[derive(Debug, Default)]
pub struct ShipReport {
    pub delivered: usize,
    pub sub_batches_sent: usize,
    pub sub_batches_total: usize,
    /// Cursor persisted after delivery, if any sub-batch succeeded.
    pub cursor: Option<Cursor>,
    /// Failure that halted delivery for the rest of the cycle.
    pub failure: Option<DomainError>,
}

impl ShipReport {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Delivers ordered entries in fixed-size sub-batches and advances the
/// cursor to the last row of the last accepted sub-batch.
///
/// The first failed sub-batch stops delivery; its rows and everything after
/// them are harvested again next cycle, so the store may see duplicates.
pub struct ShipEntriesUseCase {
    formatter: Arc<StreamFormatter>,
    sink: Arc<dyn LogSink>,
    cursor_store: Arc<dyn CursorStore>,
    sub_batch_size: usize,
}

impl ShipEntriesUseCase {
    pub fn new(
        formatter: Arc<StreamFormatter>,
        sink: Arc<dyn LogSink>,
        cursor_store: Arc<dyn CursorStore>,
    ) -> Self {
        Self {
            formatter,
            sink,
            cursor_store,
            sub_batch_size: DEFAULT_SUB_BATCH_SIZE,
        }
    }

    pub fn with_sub_batch_size(mut self, sub_batch_size: usize) -> Self {
        self.sub_batch_size = sub_batch_size.max(1);
        self
    }

    /// `entries` must be in ascending row order.
    ///
    /// Delivery failures are reported in `ShipReport::failure`; only a
    /// failure to persist the cursor is returned as an error.
    pub async fn execute(&self, entries: &[LogEntry]) -> Result<ShipReport, DomainError> {
        let mut report = ShipReport {
            sub_batches_total: entries.len().div_ceil(self.sub_batch_size),
            ..ShipReport::default()
        };
        let mut last_delivered_row: Option<u64> = None;

        for (index, sub_batch) in entries.chunks(self.sub_batch_size).enumerate() {
            match self.deliver(sub_batch).await {
                Ok(()) => {
                    report.sub_batches_sent += 1;
                    report.delivered += sub_batch.len();
                    last_delivered_row = sub_batch.last().map(|entry| entry.row_number);
                    EntriesShipped {
                        count: sub_batch.len() as u64,
                    }
                    .emit();
                    debug!(
                        sub_batch = index + 1,
                        total = report.sub_batches_total,
                        entries = sub_batch.len(),
                        "Sub-batch delivered"
                    );
                }
                Err(e) => {
                    SinkPushFailed.emit();
                    error!(
                        sub_batch = index + 1,
                        total = report.sub_batches_total,
                        error = %e,
                        "Failed to push sub-batch; holding cursor for the rest of this cycle"
                    );
                    report.failure = Some(e);
                    break;
                }
            }
        }

        if let Some(row) = last_delivered_row {
            let cursor = Cursor::new(row);
            self.cursor_store.set(cursor).await?;
            report.cursor = Some(cursor);
        }

        Ok(report)
    }

    async fn deliver(&self, sub_batch: &[LogEntry]) -> Result<(), DomainError> {
        let request = self.formatter.format(sub_batch).await?;
        if request.is_empty() {
            return Ok(());
        }
        self.sink.push(&request).await
    }
}
