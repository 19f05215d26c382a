use crate::events::{HostnameCacheSize, InternalEvent};
use crate::ports::HostnameResolver;
use dashmap::DashMap;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::debug;

/// Memoized best-effort reverse lookup of client addresses.
///
/// Every answer is cached for the life of the process, including the
/// fallback to the address itself. Entries are never evicted; the
/// `hostname_cache_entries` gauge exposes the size.
pub struct HostnameCache {
    resolver: Arc<dyn HostnameResolver>,
    entries: DashMap<String, Arc<str>>,
}

impl HostnameCache {
    pub fn new(resolver: Arc<dyn HostnameResolver>) -> Self {
        Self {
            resolver,
            entries: DashMap::new(),
        }
    }

    /// Hostname for `client_ip`, or `client_ip` itself when the lookup
    /// fails, finds nothing, or the string is not an IP address.
    pub async fn hostname_for(&self, client_ip: &str) -> Arc<str> {
        if let Some(cached) = self.entries.get(client_ip) {
            return Arc::clone(cached.value());
        }

        let hostname = self.lookup(client_ip).await;
        self.entries
            .insert(client_ip.to_string(), Arc::clone(&hostname));
        HostnameCacheSize {
            entries: self.entries.len(),
        }
        .emit();
        hostname
    }

    async fn lookup(&self, client_ip: &str) -> Arc<str> {
        let Ok(ip) = client_ip.parse::<IpAddr>() else {
            debug!(client_ip, "Client address is not an IP; skipping reverse lookup");
            return Arc::from(client_ip);
        };

        match self.resolver.resolve_hostname(ip).await {
            Ok(Some(name)) => {
                let name = name.trim_end_matches('.');
                if name.is_empty() {
                    Arc::from(client_ip)
                } else {
                    Arc::from(name)
                }
            }
            Ok(None) => Arc::from(client_ip),
            Err(e) => {
                debug!(client_ip, error = %e, "Reverse lookup failed; using address");
                Arc::from(client_ip)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
