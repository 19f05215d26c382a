use super::Adapters;
use querylog_shipper_application::services::{
    FailureGovernor, HostnameCache, SourcePoller, StreamFormatter,
};
use querylog_shipper_application::use_cases::{
    ReconcileNewEntriesUseCase, RunShipCycleUseCase, ShipEntriesUseCase,
};
use querylog_shipper_domain::Config;
use std::sync::Arc;

pub struct UseCases {
    pub cycle: Arc<RunShipCycleUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, adapters: Adapters) -> Self {
        let governor = Arc::new(FailureGovernor::new(
            config.shipper.max_consecutive_failures,
        ));
        let poller = Arc::new(SourcePoller::new(adapters.source, governor));

        let reconcile = Arc::new(
            ReconcileNewEntriesUseCase::new(
                poller,
                adapters.cursor_store.clone(),
                config.source.page_size,
            )
            .with_page_cap(config.source.max_pages_per_cycle),
        );

        let formatter = Arc::new(StreamFormatter::new(
            Arc::new(HostnameCache::new(adapters.resolver)),
            config.sink.job_label.clone(),
        ));
        let ship = Arc::new(
            ShipEntriesUseCase::new(formatter, adapters.sink, adapters.cursor_store)
                .with_sub_batch_size(config.sink.sub_batch_size),
        );

        Self {
            cycle: Arc::new(RunShipCycleUseCase::new(reconcile, ship)),
        }
    }
}
