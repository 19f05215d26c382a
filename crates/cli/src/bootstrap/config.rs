use querylog_shipper_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Startup banner. The API token is never included.
pub fn log_startup(config: &Config) {
    info!(
        source = %config.source.url,
        sink = %config.sink.url,
        state_file = %config.shipper.state_file,
        poll_interval_secs = config.shipper.poll_interval_secs,
        page_size = config.source.page_size,
        max_pages_per_cycle = config.source.max_pages_per_cycle,
        sub_batch_size = config.sink.sub_batch_size,
        "Configuration loaded"
    );
    info!(
        metrics = %config.metrics.listen_address(),
        hostname_lookup = config.resolver.enabled,
        dns_server = %config.resolver.dns_server,
        max_consecutive_failures = config.shipper.max_consecutive_failures,
        "Query log shipper starting"
    );
}
