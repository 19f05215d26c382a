use super::{Reconciliation, ReconcileNewEntriesUseCase, ShipEntriesUseCase, ShipReport};
use querylog_shipper_domain::{Cursor, DomainError};
use std::sync::Arc;

#[derive(Debug)]
pub enum CycleReport {
    SourceEmpty,
    UpToDate {
        cursor: Cursor,
    },
    Reset {
        previous: Cursor,
        latest_row: u64,
    },
    Shipped {
        latest_row: u64,
        pending: u64,
        unharvested: u64,
        harvested: usize,
        report: ShipReport,
    },
}

/// One poll cycle: reconcile against the source, then ship what is new.
pub struct RunShipCycleUseCase {
    reconcile: Arc<ReconcileNewEntriesUseCase>,
    ship: Arc<ShipEntriesUseCase>,
}

impl RunShipCycleUseCase {
    pub fn new(reconcile: Arc<ReconcileNewEntriesUseCase>, ship: Arc<ShipEntriesUseCase>) -> Self {
        Self { reconcile, ship }
    }

    pub async fn current_cursor(&self) -> Cursor {
        self.reconcile.current_cursor().await
    }

    pub async fn execute(&self) -> Result<CycleReport, DomainError> {
        match self.reconcile.execute().await? {
            Reconciliation::SourceEmpty => Ok(CycleReport::SourceEmpty),
            Reconciliation::UpToDate { cursor } => Ok(CycleReport::UpToDate { cursor }),
            Reconciliation::Reset {
                previous,
                latest_row,
            } => Ok(CycleReport::Reset {
                previous,
                latest_row,
            }),
            Reconciliation::NewEntries(harvest) => {
                let report = self.ship.execute(&harvest.entries).await?;
                Ok(CycleReport::Shipped {
                    latest_row: harvest.latest_row,
                    pending: harvest.pending,
                    unharvested: harvest.unharvested,
                    harvested: harvest.entries.len(),
                    report,
                })
            }
        }
    }
}
