pub mod loki;
pub mod technitium;

pub use loki::LokiPushClient;
pub use technitium::TechnitiumQueryLogSource;

use std::time::Duration;

/// HTTP client shared by one adapter for its whole lifetime.
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(timeout)
        .pool_max_idle_per_host(4)
        .build()
}
