use serde::{Deserialize, Serialize};

/// Query log source (Technitium DNS HTTP API) settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Base URL of the DNS server's HTTP API
    #[serde(default = "default_url")]
    pub url: String,

    /// API token. Never logged.
    #[serde(default)]
    pub token: String,

    /// Name of the query log app installed on the DNS server
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Class path of the query log app
    #[serde(default = "default_class_path")]
    pub class_path: String,

    /// Entries requested per page (default: 100)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Upper bound on pages fetched in one cycle (default: 10)
    #[serde(default = "default_max_pages")]
    pub max_pages_per_cycle: u32,

    /// Per-request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            token: String::new(),
            app_name: default_app_name(),
            class_path: default_class_path(),
            page_size: default_page_size(),
            max_pages_per_cycle: default_max_pages(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_url() -> String {
    "http://10.88.0.1:5380".to_string()
}

fn default_app_name() -> String {
    "Query Logs (Sqlite)".to_string()
}

fn default_class_path() -> String {
    "QueryLogsSqlite.App".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_max_pages() -> u32 {
    10
}

fn default_timeout() -> u64 {
    10
}
