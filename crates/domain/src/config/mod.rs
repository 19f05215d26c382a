//! Configuration for the query log shipper
//!
//! Structures are organised by concern:
//! - `root`: Main configuration, layering and CLI overrides
//! - `source`: Query log source API
//! - `sink`: Log store push API
//! - `shipper`: Poll loop and cursor state
//! - `metrics`: Prometheus exposition endpoint
//! - `resolver`: Reverse hostname lookups
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod errors;
pub mod logging;
pub mod metrics;
pub mod resolver;
pub mod root;
pub mod shipper;
pub mod sink;
pub mod source;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use metrics::MetricsConfig;
pub use resolver::ResolverConfig;
pub use root::{CliOverrides, Config};
pub use shipper::ShipperConfig;
pub use sink::SinkConfig;
pub use source::SourceConfig;
