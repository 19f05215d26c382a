pub mod failure_governor;
pub mod hostname_cache;
pub mod source_poller;
pub mod stream_formatter;

pub use failure_governor::{FailureGovernor, MAX_CONSECUTIVE_FAILURES};
pub use hostname_cache::HostnameCache;
pub use source_poller::SourcePoller;
pub use stream_formatter::StreamFormatter;
