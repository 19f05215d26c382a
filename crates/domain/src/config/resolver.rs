use serde::{Deserialize, Serialize};

/// Reverse (PTR) lookup of client addresses
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// DNS server queried for PTR records
    #[serde(default = "default_dns_server")]
    pub dns_server: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            dns_server: default_dns_server(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_dns_server() -> String {
    "127.0.0.1:53".to_string()
}

fn default_timeout_ms() -> u64 {
    2000
}
