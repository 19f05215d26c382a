use chrono::{DateTime, Utc};
use querylog_shipper_domain::{FailureState, FailureVerdict, GovernorState, SourceError};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU32, Ordering};

/// Consecutive failures after which an authentication failure ends the process.
pub const MAX_CONSECUTIVE_FAILURES: u32 = 3;

const NEVER: i64 = i64::MIN;

/// Tracks consecutive source failures and decides between retrying and
/// failing fast.
///
/// Every kind of failure increments the shared counter, but only an
/// authentication failure can trip the breaker. Transient failures are
/// retried forever. Once tripped the governor stays terminated.
pub struct FailureGovernor {
    max_consecutive_failures: u32,
    consecutive_failures: AtomicU32,
    last_success_millis: AtomicI64,
    terminated: AtomicBool,
}

impl FailureGovernor {
    pub fn new(max_consecutive_failures: u32) -> Self {
        Self {
            max_consecutive_failures: max_consecutive_failures.max(1),
            consecutive_failures: AtomicU32::new(0),
            last_success_millis: AtomicI64::new(NEVER),
            terminated: AtomicBool::new(false),
        }
    }

    pub fn record_success(&self) {
        self.consecutive_failures.store(0, Ordering::Relaxed);
        self.last_success_millis
            .store(Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    pub fn record_failure(&self, error: &SourceError) -> FailureVerdict {
        let consecutive_failures = self
            .consecutive_failures
            .fetch_add(1, Ordering::Relaxed)
            .saturating_add(1);

        if self.is_terminated()
            || (error.is_authentication() && consecutive_failures >= self.max_consecutive_failures)
        {
            self.terminated.store(true, Ordering::Relaxed);
            return FailureVerdict::Trip {
                consecutive_failures,
            };
        }

        FailureVerdict::Retry {
            consecutive_failures,
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Relaxed)
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::Relaxed)
    }

    pub fn state(&self) -> GovernorState {
        if self.is_terminated() {
            return GovernorState::Terminated;
        }
        match self.consecutive_failures() {
            0 => GovernorState::Healthy,
            n => GovernorState::Degraded(n),
        }
    }

    pub fn snapshot(&self) -> FailureState {
        let millis = self.last_success_millis.load(Ordering::Relaxed);
        FailureState {
            consecutive_failures: self.consecutive_failures(),
            last_success: (millis != NEVER)
                .then(|| DateTime::<Utc>::from_timestamp_millis(millis))
                .flatten(),
        }
    }
}

impl Default for FailureGovernor {
    fn default() -> Self {
        Self::new(MAX_CONSECUTIVE_FAILURES)
    }
}
