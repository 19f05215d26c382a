pub mod cursor_store;
pub mod hostname_resolver;
pub mod log_sink;
pub mod query_log_source;

pub use cursor_store::CursorStore;
pub use hostname_resolver::HostnameResolver;
pub use log_sink::LogSink;
pub use query_log_source::QueryLogSource;
