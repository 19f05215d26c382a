use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShipperConfig {
    /// Seconds to sleep between cycles (default: 15)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// File holding the last delivered row number
    #[serde(default = "default_state_file")]
    pub state_file: String,

    /// Consecutive failures after which an authentication failure is fatal (default: 3)
    #[serde(default = "default_max_failures")]
    pub max_consecutive_failures: u32,
}

impl Default for ShipperConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            state_file: default_state_file(),
            max_consecutive_failures: default_max_failures(),
        }
    }
}

fn default_poll_interval() -> u64 {
    15
}

fn default_state_file() -> String {
    "/var/lib/dns-query-exporter/last_row.txt".to_string()
}

fn default_max_failures() -> u32 {
    3
}
