use chrono::{DateTime, Utc};

/// Consecutive failed fetches and the time of the last successful one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailureState {
    pub consecutive_failures: u32,
    pub last_success: Option<DateTime<Utc>>,
}

/// Health of the source connection as seen by the failure governor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GovernorState {
    Healthy,
    Degraded(u32),
    /// Too many consecutive authentication failures; no further fetches.
    Terminated,
}

impl GovernorState {
    pub fn is_terminated(&self) -> bool {
        matches!(self, GovernorState::Terminated)
    }
}

/// What the caller should do after a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureVerdict {
    Retry { consecutive_failures: u32 },
    Trip { consecutive_failures: u32 },
}
