//! # Query Log Shipper
//!
//! Polls the DNS server's query log and ships new entries to Loki.

mod bootstrap;
mod di;
mod server;

use clap::Parser;
use querylog_shipper_domain::CliOverrides;
use querylog_shipper_jobs::ShipperJob;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "querylog-shipper")]
#[command(version)]
#[command(about = "Ships DNS query logs from Technitium to Loki")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// File holding the last delivered row number
    #[arg(long)]
    state_file: Option<String>,

    /// Seconds between poll cycles
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Port of the Prometheus metrics endpoint
    #[arg(long)]
    metrics_port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        state_file: cli.state_file,
        poll_interval_secs: cli.poll_interval,
        metrics_port: cli.metrics_port,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);
    bootstrap::log_startup(&config);

    let metrics_listener = server::bind_metrics_listener(&config.metrics).await?;
    let metrics_handle = server::install_recorder()?;

    let use_cases = di::UseCases::new(&config, di::Adapters::new(&config)?);

    let shutdown = CancellationToken::new();
    server::register_shutdown_handlers(shutdown.clone());

    tokio::spawn(server::serve_metrics(
        metrics_listener,
        metrics_handle,
        shutdown.clone(),
    ));

    let job = ShipperJob::new(use_cases.cycle, config.shipper.poll_interval_secs)
        .with_cancellation(shutdown.clone());

    match job.run().await {
        Ok(()) => {
            info!("Query log shipper stopped");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Query log shipper terminated");
            shutdown.cancel();
            Err(e.into())
        }
    }
}
