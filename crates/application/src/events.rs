//! Internal events for metrics emission.
//!
//! Each event struct represents a measurable occurrence in the shipping
//! pipeline and emits the corresponding Prometheus metric through the
//! `metrics` facade. Exposition is left to whichever recorder the binary
//! installs; without one, emitting is a no-op.

use metrics::{counter, gauge};
use querylog_shipper_domain::SourceErrorKind;
use tracing::trace;

/// Trait for internal events that can be emitted as metrics.
pub trait InternalEvent {
    /// Emit this event as a metric.
    fn emit(self);
}

/// A query log entry was formatted for delivery.
///
/// The `domain` label can have high cardinality on busy resolvers.
pub struct QueryProcessed<'a> {
    pub client_hostname: &'a str,
    pub rcode: &'a str,
    pub qtype: &'a str,
    pub protocol: &'a str,
    pub domain: &'a str,
}

impl InternalEvent for QueryProcessed<'_> {
    fn emit(self) {
        counter!(
            "dns_queries_total",
            "client_hostname" => self.client_hostname.to_string(),
            "rcode" => self.rcode.to_string(),
            "qtype" => self.qtype.to_string(),
            "protocol" => self.protocol.to_string(),
            "domain" => self.domain.to_string()
        )
        .increment(1);
    }
}

/// The persisted cursor moved.
pub struct LastRowUpdated {
    pub row: u64,
}

impl InternalEvent for LastRowUpdated {
    fn emit(self) {
        trace!(row = self.row, "Last row updated");
        gauge!("dns_query_log_last_row").set(self.row as f64);
    }
}

/// A page fetch from the source succeeded.
pub struct SourceFetchSucceeded {
    pub unix_timestamp: f64,
}

impl InternalEvent for SourceFetchSucceeded {
    fn emit(self) {
        gauge!("consecutive_failures").set(0.0);
        gauge!("last_successful_query_timestamp").set(self.unix_timestamp);
    }
}

/// A page fetch from the source failed.
pub struct SourceFetchFailed {
    pub kind: SourceErrorKind,
    pub consecutive_failures: u32,
}

impl InternalEvent for SourceFetchFailed {
    fn emit(self) {
        if self.kind == SourceErrorKind::Authentication {
            counter!("authentication_failures_total").increment(1);
        }
        counter!("api_errors_total", "error_type" => self.kind.as_str()).increment(1);
        gauge!("consecutive_failures").set(f64::from(self.consecutive_failures));
    }
}

/// New rows seen at the start of a cycle, and how many of them fall outside
/// the per-cycle page cap.
pub struct BacklogObserved {
    pub pending: u64,
    pub unharvested: u64,
}

impl InternalEvent for BacklogObserved {
    fn emit(self) {
        gauge!("dns_query_log_pending_rows").set(self.pending as f64);
        if self.unharvested > 0 {
            counter!("dns_query_log_unharvested_rows_total").increment(self.unharvested);
        }
    }
}

/// Row numbers at the source went backwards.
pub struct SourceReset;

impl InternalEvent for SourceReset {
    fn emit(self) {
        counter!("dns_query_log_source_resets_total").increment(1);
    }
}

/// A sub-batch was accepted by the log store.
pub struct EntriesShipped {
    pub count: u64,
}

impl InternalEvent for EntriesShipped {
    fn emit(self) {
        trace!(count = self.count, "Entries shipped");
        counter!("dns_query_log_entries_shipped_total").increment(self.count);
    }
}

/// A sub-batch was rejected or could not be delivered.
pub struct SinkPushFailed;

impl InternalEvent for SinkPushFailed {
    fn emit(self) {
        counter!("dns_query_log_sink_failures_total").increment(1);
    }
}

/// An entry could not be formatted and was left out of its stream.
pub struct MalformedEntryDropped;

impl InternalEvent for MalformedEntryDropped {
    fn emit(self) {
        counter!("dns_query_log_malformed_entries_total").increment(1);
    }
}

/// Current size of the reverse-lookup cache.
pub struct HostnameCacheSize {
    pub entries: usize,
}

impl InternalEvent for HostnameCacheSize {
    fn emit(self) {
        gauge!("hostname_cache_entries").set(self.entries as f64);
    }
}
