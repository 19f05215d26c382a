pub mod reconcile;
pub mod run_cycle;
pub mod ship_entries;

// Re-export use cases
pub use reconcile::{
    pages_to_fetch, HarvestedEntries, Reconciliation, ReconcileNewEntriesUseCase,
    DEFAULT_PAGE_CAP,
};
pub use run_cycle::{CycleReport, RunShipCycleUseCase};
pub use ship_entries::{ShipEntriesUseCase, ShipReport, DEFAULT_SUB_BATCH_SIZE};
