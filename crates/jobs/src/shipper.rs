use querylog_shipper_application::events::{InternalEvent, LastRowUpdated};
use querylog_shipper_application::use_cases::{CycleReport, RunShipCycleUseCase};
use querylog_shipper_domain::DomainError;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Runs ship cycles back to back with a fixed sleep in between until
/// cancelled or until a fatal error occurs.
///
/// A cycle in flight is always allowed to finish; cancellation is only
/// observed while sleeping.
pub struct ShipperJob {
    cycle: Arc<RunShipCycleUseCase>,
    poll_interval: Duration,
    shutdown: CancellationToken,
}

impl ShipperJob {
    pub fn new(cycle: Arc<RunShipCycleUseCase>, poll_interval_secs: u64) -> Self {
        Self {
            cycle,
            poll_interval: Duration::from_secs(poll_interval_secs),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Returns `Ok(())` after cancellation and the fatal error otherwise.
    pub async fn run(self) -> Result<(), DomainError> {
        let cursor = self.cycle.current_cursor().await;
        LastRowUpdated {
            row: cursor.value(),
        }
        .emit();
        info!(
            cursor = %cursor,
            poll_interval_secs = self.poll_interval.as_secs_f64(),
            "Starting query log shipper"
        );

        loop {
            match self.cycle.execute().await {
                Ok(report) => log_report(&report),
                Err(e) if e.is_fatal() => {
                    error!(error = %e, "Shipper stopping: {}", e);
                    return Err(e);
                }
                Err(e) => {
                    warn!(error = %e, "Ship cycle failed; retrying next interval");
                }
            }

            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("ShipperJob: shutting down");
                    return Ok(());
                }
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }
    }
}

fn log_report(report: &CycleReport) {
    match report {
        CycleReport::SourceEmpty => debug!("Query log is empty"),
        CycleReport::UpToDate { cursor } => debug!(cursor = %cursor, "Up to date"),
        CycleReport::Reset {
            previous,
            latest_row,
        } => info!(
            previous = %previous,
            latest_row,
            "Cursor reset after source rollback"
        ),
        CycleReport::Shipped {
            latest_row,
            pending,
            unharvested,
            harvested,
            report,
        } => {
            let cursor = report.cursor.map(|c| c.value());
            if report.is_complete() {
                debug!(
                    latest_row,
                    pending,
                    unharvested,
                    harvested,
                    delivered = report.delivered,
                    cursor,
                    "Ship cycle complete"
                );
            } else {
                warn!(
                    latest_row,
                    harvested,
                    delivered = report.delivered,
                    sub_batches_sent = report.sub_batches_sent,
                    sub_batches_total = report.sub_batches_total,
                    cursor,
                    "Ship cycle delivered partially; remaining rows retried next cycle"
                );
            }
        }
    }
}
