use crate::events::{InternalEvent, MalformedEntryDropped, QueryProcessed};
use crate::services::HostnameCache;
use querylog_shipper_domain::{DomainError, LabelSet, LogEntry, LogStream, PushRequest};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Line payload stored for each entry.
#[derive(Serialize)]
struct LogLine<'a> {
    domain: &'a str,
    answer: Option<&'a str>,
    qclass: &'a str,
}

/// Groups ordered entries into labeled streams for the log store.
pub struct StreamFormatter {
    hostnames: Arc<HostnameCache>,
    job_label: String,
}

impl StreamFormatter {
    pub fn new(hostnames: Arc<HostnameCache>, job_label: impl Into<String>) -> Self {
        Self {
            hostnames,
            job_label: job_label.into(),
        }
    }

    /// Build the push body for `entries`.
    ///
    /// Streams appear in the order their label set is first seen, and values
    /// within a stream keep the order of `entries`. Entries with an
    /// unparsable timestamp are left out.
    pub async fn format(&self, entries: &[LogEntry]) -> Result<PushRequest, DomainError> {
        let mut streams: Vec<LogStream> = Vec::new();
        let mut by_identity: HashMap<String, usize> = HashMap::new();

        for entry in entries {
            let timestamp = match entry.timestamp_nanos() {
                Ok(timestamp) => timestamp,
                Err(e) => {
                    warn!(
                        row_number = entry.row_number,
                        error = %e,
                        "Dropping query log entry with malformed timestamp"
                    );
                    MalformedEntryDropped.emit();
                    continue;
                }
            };

            let client_hostname = self.hostnames.hostname_for(&entry.client_ip).await;
            let labels = self.labels_for(entry, &client_hostname);

            QueryProcessed {
                client_hostname: &client_hostname,
                rcode: labels.get("rcode").unwrap_or_default(),
                qtype: labels.get("qtype").unwrap_or_default(),
                protocol: labels.get("protocol").unwrap_or_default(),
                domain: entry.domain(),
            }
            .emit();

            let line = serde_json::to_string(&LogLine {
                domain: &entry.qname,
                answer: entry.answer.as_deref(),
                qclass: &entry.qclass,
            })
            .map_err(|e| DomainError::Encoding(e.to_string()))?;

            let slot = *by_identity.entry(labels.canonical()).or_insert_with(|| {
                streams.push(LogStream::new(labels));
                streams.len() - 1
            });
            streams[slot].push(timestamp, line);
        }

        Ok(PushRequest { streams })
    }

    fn labels_for(&self, entry: &LogEntry, client_hostname: &str) -> LabelSet {
        LabelSet::new()
            .with("job", self.job_label.as_str())
            .with("client_ip", entry.client_ip.as_str())
            .with("client_hostname", client_hostname)
            .with("protocol", entry.protocol.to_lowercase())
            .with("rcode", entry.rcode.to_lowercase())
            .with("qtype", entry.qtype.to_uppercase())
            .with("response_type", entry.response_type.to_lowercase())
    }
}
