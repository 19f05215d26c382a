use crate::errors::DomainError;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One row of the DNS server's query log, as returned by the source API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub row_number: u64,
    pub timestamp: String,
    #[serde(rename = "clientIpAddress")]
    pub client_ip: String,
    pub protocol: String,
    pub response_type: String,
    pub rcode: String,
    pub qname: String,
    pub qtype: String,
    pub qclass: String,
    #[serde(default)]
    pub answer: Option<String>,
}

impl LogEntry {
    /// Entry timestamp as nanoseconds since the Unix epoch, rendered as a
    /// decimal string.
    ///
    /// A trailing `Z` is normalised to `+00:00`. Timestamps without an
    /// offset are read as UTC.
    pub fn timestamp_nanos(&self) -> Result<String, DomainError> {
        let raw = self.timestamp.trim();
        let normalized = match raw.strip_suffix('Z') {
            Some(prefix) => format!("{prefix}+00:00"),
            None => raw.to_string(),
        };

        let nanos = match DateTime::parse_from_rfc3339(&normalized) {
            Ok(parsed) => parsed.timestamp_nanos_opt(),
            Err(_) => NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f")
                .map_err(|e| {
                    DomainError::InvalidTimestamp(format!("'{}': {}", self.timestamp, e))
                })?
                .and_utc()
                .timestamp_nanos_opt(),
        };

        nanos.map(|n| n.to_string()).ok_or_else(|| {
            DomainError::InvalidTimestamp(format!("'{}' is out of range", self.timestamp))
        })
    }

    /// Queried name without the trailing root dot.
    pub fn domain(&self) -> &str {
        self.qname.trim_end_matches('.')
    }
}

/// One page of entries, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryLogPage {
    #[serde(default)]
    pub page_number: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_entries: Option<u64>,
    #[serde(default)]
    pub entries: Vec<LogEntry>,
}

impl QueryLogPage {
    pub fn from_entries(entries: Vec<LogEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Highest row number on the page; pages are ordered newest first.
    pub fn latest_row(&self) -> Option<u64> {
        self.entries.first().map(|entry| entry.row_number)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
