//! Query log shipper domain layer
pub mod config;
pub mod cursor;
pub mod errors;
pub mod failure;
pub mod query_log;
pub mod stream;

pub use config::{CliOverrides, Config, ConfigError};
pub use cursor::Cursor;
pub use errors::{DomainError, SourceError, SourceErrorKind};
pub use failure::{FailureState, FailureVerdict, GovernorState};
pub use query_log::{LogEntry, QueryLogPage};
pub use stream::{LabelSet, LogStream, PushRequest};
