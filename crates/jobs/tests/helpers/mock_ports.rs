#![allow(dead_code)]

use async_trait::async_trait;
use querylog_shipper_application::ports::{CursorStore, HostnameResolver, LogSink, QueryLogSource};
use querylog_shipper_application::services::{
    FailureGovernor, HostnameCache, SourcePoller, StreamFormatter,
};
use querylog_shipper_application::use_cases::{
    ReconcileNewEntriesUseCase, RunShipCycleUseCase, ShipEntriesUseCase,
};
use querylog_shipper_domain::{
    Cursor, DomainError, LogEntry, PushRequest, QueryLogPage, SourceError,
};
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

pub fn entry(row_number: u64) -> LogEntry {
    LogEntry {
        row_number,
        timestamp: format!("2024-01-01T00:00:{:02}Z", row_number % 60),
        client_ip: "10.0.0.2".to_string(),
        protocol: "Udp".to_string(),
        response_type: "Authoritative".to_string(),
        rcode: "NoError".to_string(),
        qname: format!("row{row_number}.lan"),
        qtype: "A".to_string(),
        qclass: "IN".to_string(),
        answer: None,
    }
}

// ============================================================================
// Mock QueryLogSource
// ============================================================================

pub struct MockQueryLogSource {
    latest_row: Arc<RwLock<u64>>,
    failure: Arc<RwLock<Option<SourceError>>>,
    call_count: Arc<AtomicU64>,
}

impl MockQueryLogSource {
    pub fn with_latest_row(latest_row: u64) -> Self {
        Self {
            latest_row: Arc::new(RwLock::new(latest_row)),
            failure: Arc::new(RwLock::new(None)),
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn set_latest_row(&self, latest_row: u64) {
        *self.latest_row.write().await = latest_row;
    }

    /// Every fetch fails with `error` until cleared.
    pub async fn fail_with(&self, error: Option<SourceError>) {
        *self.failure.write().await = error;
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl QueryLogSource for MockQueryLogSource {
    async fn fetch_page(
        &self,
        page_number: u32,
        entries_per_page: u32,
    ) -> Result<QueryLogPage, SourceError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Some(error) = self.failure.read().await.clone() {
            return Err(error);
        }

        let latest = *self.latest_row.read().await;
        let skip = u64::from(page_number.saturating_sub(1)) * u64::from(entries_per_page);
        let rows = (1..=latest.saturating_sub(skip))
            .rev()
            .take(entries_per_page as usize)
            .map(entry)
            .collect();
        Ok(QueryLogPage::from_entries(rows))
    }
}

// ============================================================================
// Mock CursorStore
// ============================================================================

pub struct MockCursorStore {
    cursor: Arc<RwLock<Cursor>>,
}

impl MockCursorStore {
    pub fn starting_at(row: u64) -> Self {
        Self {
            cursor: Arc::new(RwLock::new(Cursor::new(row))),
        }
    }

    pub async fn value(&self) -> u64 {
        self.cursor.read().await.value()
    }
}

#[async_trait]
impl CursorStore for MockCursorStore {
    async fn get(&self) -> Cursor {
        *self.cursor.read().await
    }

    async fn set(&self, cursor: Cursor) -> Result<(), DomainError> {
        *self.cursor.write().await = cursor;
        Ok(())
    }
}

// ============================================================================
// Mock LogSink
// ============================================================================

pub struct MockLogSink {
    entries: Arc<AtomicU64>,
}

impl MockLogSink {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn entries_received(&self) -> u64 {
        self.entries.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl LogSink for MockLogSink {
    async fn push(&self, request: &PushRequest) -> Result<(), DomainError> {
        self.entries
            .fetch_add(request.entry_count() as u64, Ordering::Relaxed);
        Ok(())
    }
}

pub struct NoHostnames;

#[async_trait]
impl HostnameResolver for NoHostnames {
    async fn resolve_hostname(&self, _ip: IpAddr) -> Result<Option<String>, DomainError> {
        Ok(None)
    }
}

// ============================================================================
// Wiring
// ============================================================================

pub struct Harness {
    pub source: Arc<MockQueryLogSource>,
    pub cursor_store: Arc<MockCursorStore>,
    pub sink: Arc<MockLogSink>,
    pub cycle: Arc<RunShipCycleUseCase>,
}

impl Harness {
    pub fn new(latest_row: u64, cursor: u64) -> Self {
        let source = Arc::new(MockQueryLogSource::with_latest_row(latest_row));
        let cursor_store = Arc::new(MockCursorStore::starting_at(cursor));
        let sink = Arc::new(MockLogSink::new());

        let poller = Arc::new(SourcePoller::new(
            source.clone(),
            Arc::new(FailureGovernor::default()),
        ));
        let reconcile = Arc::new(ReconcileNewEntriesUseCase::new(
            poller,
            cursor_store.clone(),
            100,
        ));
        let formatter = Arc::new(StreamFormatter::new(
            Arc::new(HostnameCache::new(Arc::new(NoHostnames))),
            "dns_query_logs",
        ));
        let ship = Arc::new(ShipEntriesUseCase::new(
            formatter,
            sink.clone(),
            cursor_store.clone(),
        ));
        let cycle = Arc::new(RunShipCycleUseCase::new(reconcile, ship));

        Self {
            source,
            cursor_store,
            sink,
            cycle,
        }
    }
}
