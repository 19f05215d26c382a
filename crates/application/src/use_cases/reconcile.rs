use crate::events::{BacklogObserved, InternalEvent, SourceReset};
use crate::ports::CursorStore;
use crate::services::SourcePoller;
use querylog_shipper_domain::{Cursor, DomainError, LogEntry};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Pages fetched per cycle unless configured otherwise.
pub const DEFAULT_PAGE_CAP: u32 = 10;

/// Pending rows at or above which a cycle is logged at info level.
const NOTABLE_BACKLOG: u64 = 100;

/// Result of comparing the source against the persisted cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The source holds no entries at all.
    SourceEmpty,
    UpToDate { cursor: Cursor },
    /// Row numbers went backwards; the cursor was reset to zero.
    Reset { previous: Cursor, latest_row: u64 },
    NewEntries(HarvestedEntries),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestedEntries {
    pub cursor: Cursor,
    pub latest_row: u64,
    /// `latest_row - cursor` at the start of the cycle.
    pub pending: u64,
    /// Pending rows beyond the reach of the page cap this cycle.
    pub unharvested: u64,
    /// New entries in ascending row order, without duplicates.
    pub entries: Vec<LogEntry>,
}

/// Works out which rows are new since the cursor by scanning the
/// newest-first source from page 1.
pub struct ReconcileNewEntriesUseCase {
    poller: Arc<SourcePoller>,
    cursor_store: Arc<dyn CursorStore>,
    page_size: u32,
    page_cap: u32,
}

impl ReconcileNewEntriesUseCase {
    pub fn new(
        poller: Arc<SourcePoller>,
        cursor_store: Arc<dyn CursorStore>,
        page_size: u32,
    ) -> Self {
        Self {
            poller,
            cursor_store,
            page_size: page_size.max(1),
            page_cap: DEFAULT_PAGE_CAP,
        }
    }

    pub fn with_page_cap(mut self, page_cap: u32) -> Self {
        self.page_cap = page_cap.max(1);
        self
    }

    pub async fn current_cursor(&self) -> Cursor {
        self.cursor_store.get().await
    }

    /// Any fetch failure aborts the cycle before the cursor is touched.
    pub async fn execute(&self) -> Result<Reconciliation, DomainError> {
        let cursor = self.cursor_store.get().await;

        let head = self.poller.fetch(1, 1).await?;
        let Some(latest_row) = head.latest_row() else {
            debug!("Query log source has no entries");
            return Ok(Reconciliation::SourceEmpty);
        };

        if latest_row < cursor.value() {
            warn!(
                latest_row,
                cursor = %cursor,
                "Row numbers decreased; query log may have been reset. Resuming from row 0"
            );
            self.cursor_store.set(Cursor::ZERO).await?;
            SourceReset.emit();
            return Ok(Reconciliation::Reset {
                previous: cursor,
                latest_row,
            });
        }

        if latest_row <= cursor.value() {
            debug!(cursor = %cursor, "No new query log entries");
            return Ok(Reconciliation::UpToDate { cursor });
        }

        let pending = latest_row - cursor.value();
        if pending >= NOTABLE_BACKLOG {
            info!(
                pending,
                first_row = cursor.value() + 1,
                latest_row,
                "Found new query log entries"
            );
        }

        let pages = pages_to_fetch(pending, self.page_size, self.page_cap);
        let capacity = u64::from(pages) * u64::from(self.page_size);
        let unharvested = pending.saturating_sub(capacity);
        if unharvested > 0 {
            warn!(
                pending,
                unharvested,
                page_cap = self.page_cap,
                page_size = self.page_size,
                "Backlog exceeds per-cycle page cap; oldest pending rows will not be shipped"
            );
        }
        BacklogObserved {
            pending,
            unharvested,
        }
        .emit();

        let mut entries: Vec<LogEntry> = Vec::with_capacity(pending.min(capacity) as usize);
        for page_number in 1..=pages {
            let page = self.poller.fetch(page_number, self.page_size).await?;
            if page.is_empty() {
                break;
            }

            let reached_known = collect_newer(&mut entries, page.entries, cursor);
            if reached_known || entries.len() as u64 >= pending {
                break;
            }
        }

        entries.sort_by_key(|entry| entry.row_number);

        Ok(Reconciliation::NewEntries(HarvestedEntries {
            cursor,
            latest_row,
            pending,
            unharvested,
            entries,
        }))
    }
}

/// `ceil(pending / page_size)`, bounded by `page_cap`.
pub fn pages_to_fetch(pending: u64, page_size: u32, page_cap: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    let pages = pending.div_ceil(page_size);
    pages.min(u64::from(page_cap)) as u32
}

/// Append entries beyond `cursor` from a newest-first page. Returns `true`
/// once an already-delivered row is seen; everything after it on the page
/// is older still.
///
/// `into` stays in strictly descending order: a row that is not older than
/// the last one collected was already seen on an earlier page (rows shift
/// between page requests while the source keeps logging) and is skipped.
fn collect_newer(into: &mut Vec<LogEntry>, page: Vec<LogEntry>, cursor: Cursor) -> bool {
    for entry in page {
        if !cursor.is_behind(entry.row_number) {
            return true;
        }
        if into
            .last()
            .is_some_and(|last| entry.row_number >= last.row_number)
        {
            continue;
        }
        into.push(entry);
    }
    false
}
