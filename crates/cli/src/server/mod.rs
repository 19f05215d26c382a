pub mod metrics;
pub mod shutdown;

pub use metrics::{bind_metrics_listener, install_recorder, serve_metrics};
pub use shutdown::register_shutdown_handlers;
