use serde::{Deserialize, Serialize};

/// Push-based log store (Loki) settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SinkConfig {
    #[serde(default = "default_url")]
    pub url: String,

    /// Entries per push request (default: 100)
    #[serde(default = "default_sub_batch_size")]
    pub sub_batch_size: usize,

    /// Value of the `job` stream label
    #[serde(default = "default_job_label")]
    pub job_label: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            sub_batch_size: default_sub_batch_size(),
            job_label: default_job_label(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:3100".to_string()
}

fn default_sub_batch_size() -> usize {
    100
}

fn default_job_label() -> String {
    "dns_query_logs".to_string()
}

fn default_timeout() -> u64 {
    10
}
