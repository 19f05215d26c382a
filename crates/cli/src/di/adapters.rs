use querylog_shipper_application::ports::{
    CursorStore, HostnameResolver, LogSink, QueryLogSource,
};
use querylog_shipper_domain::Config;
use querylog_shipper_infrastructure::http::{LokiPushClient, TechnitiumQueryLogSource};
use querylog_shipper_infrastructure::repositories::FileCursorStore;
use querylog_shipper_infrastructure::system::{DisabledHostnameResolver, PtrHostnameResolver};
use std::sync::Arc;
use tracing::info;

pub struct Adapters {
    pub source: Arc<dyn QueryLogSource>,
    pub cursor_store: Arc<dyn CursorStore>,
    pub sink: Arc<dyn LogSink>,
    pub resolver: Arc<dyn HostnameResolver>,
}

impl Adapters {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let resolver: Arc<dyn HostnameResolver> = if config.resolver.enabled {
            Arc::new(PtrHostnameResolver::from_config(&config.resolver)?)
        } else {
            info!("Hostname lookup disabled; client addresses used as hostnames");
            Arc::new(DisabledHostnameResolver)
        };

        Ok(Self {
            source: Arc::new(TechnitiumQueryLogSource::new(&config.source)?),
            cursor_store: Arc::new(FileCursorStore::new(&config.shipper.state_file)),
            sink: Arc::new(LokiPushClient::new(&config.sink)?),
            resolver,
        })
    }
}
