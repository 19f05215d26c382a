use thiserror::Error;

/// Failure reported while fetching a page from the query log source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Authentication rejected by query log source: {0}")]
    Authentication(String),

    #[error("Query log source timed out: {0}")]
    Timeout(String),

    #[error("Network error reaching query log source: {0}")]
    Network(String),

    #[error("Query log source error: {0}")]
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceErrorKind {
    Authentication,
    Timeout,
    Network,
    Other,
}

impl SourceErrorKind {
    /// Value of the `error_type` metric label.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceErrorKind::Authentication => "auth",
            SourceErrorKind::Timeout => "timeout",
            SourceErrorKind::Network => "network",
            SourceErrorKind::Other => "other",
        }
    }
}

/// Markers in an API error message that point at a credential problem.
const AUTH_MESSAGE_MARKERS: [&str; 3] = ["token", "session expired", "invalid"];

impl SourceError {
    pub fn kind(&self) -> SourceErrorKind {
        match self {
            SourceError::Authentication(_) => SourceErrorKind::Authentication,
            SourceError::Timeout(_) => SourceErrorKind::Timeout,
            SourceError::Network(_) => SourceErrorKind::Network,
            SourceError::Other(_) => SourceErrorKind::Other,
        }
    }

    pub fn is_authentication(&self) -> bool {
        self.kind() == SourceErrorKind::Authentication
    }

    /// Classify an API-reported failure from its free-form message.
    ///
    /// Only used when the source does not return a structured status that
    /// already identifies the failure.
    pub fn from_api_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lowered = message.to_lowercase();
        if AUTH_MESSAGE_MARKERS
            .iter()
            .any(|marker| lowered.contains(marker))
        {
            SourceError::Authentication(message)
        } else {
            SourceError::Other(message)
        }
    }
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(
        "{consecutive_failures} consecutive authentication failures - check credential configuration"
    )]
    CircuitOpen { consecutive_failures: u32 },

    #[error("Sink delivery failed: {0}")]
    SinkDelivery(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Query timeout")]
    QueryTimeout,
}

impl DomainError {
    /// Whether the error must end the process instead of being retried on
    /// the next cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DomainError::CircuitOpen { .. })
    }
}
