mod metrics_capture;

pub use metrics_capture::*;
pub use mock_ports::*;
