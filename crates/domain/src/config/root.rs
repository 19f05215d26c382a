use super::{
    ConfigError, LoggingConfig, MetricsConfig, ResolverConfig, ShipperConfig, SinkConfig,
    SourceConfig,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub sink: SinkConfig,

    #[serde(default)]
    pub shipper: ShipperConfig,

    #[serde(default)]
    pub metrics: MetricsConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub state_file: Option<String>,
    pub poll_interval_secs: Option<u64>,
    pub metrics_port: Option<u16>,
    pub log_level: Option<String>,
}

impl Config {
    /// Build the effective configuration: defaults, then the optional TOML
    /// file, then the process environment, then CLI overrides.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env(|var| std::env::var(var).ok())?;
        config.apply_cli_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply environment variables through `lookup`, which returns the value
    /// of a variable when it is set.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("TECHNITIUM_URL") {
            self.source.url = url;
        }
        if let Some(token) = lookup("TECHNITIUM_TOKEN") {
            self.source.token = token;
        }
        if let Some(url) = lookup("LOKI_URL") {
            self.sink.url = url;
        }
        if let Some(state_file) = lookup("STATE_FILE") {
            self.shipper.state_file = state_file;
        }
        if let Some(bind) = lookup("METRICS_BIND") {
            self.metrics.bind_address = bind;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Some(server) = lookup("HOSTNAME_DNS_SERVER") {
            self.resolver.dns_server = server;
        }

        if let Some(v) = parse_env(&lookup, "POLL_INTERVAL")? {
            self.shipper.poll_interval_secs = v;
        }
        if let Some(v) = parse_env(&lookup, "BATCH_SIZE")? {
            self.source.page_size = v;
        }
        if let Some(v) = parse_env(&lookup, "MAX_PAGES_PER_CYCLE")? {
            self.source.max_pages_per_cycle = v;
        }
        if let Some(v) = parse_env(&lookup, "SUB_BATCH_SIZE")? {
            self.sink.sub_batch_size = v;
        }
        if let Some(v) = parse_env(&lookup, "METRICS_PORT")? {
            self.metrics.port = v;
        }
        if let Some(raw) = lookup("HOSTNAME_LOOKUP") {
            self.resolver.enabled = parse_bool("HOSTNAME_LOOKUP", &raw)?;
        }

        Ok(())
    }

    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(state_file) = overrides.state_file {
            self.shipper.state_file = state_file;
        }
        if let Some(interval) = overrides.poll_interval_secs {
            self.shipper.poll_interval_secs = interval;
        }
        if let Some(port) = overrides.metrics_port {
            self.metrics.port = port;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }

        for (name, url) in [("source url", &self.source.url), ("sink url", &self.sink.url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Validation(format!(
                    "{name} '{url}' must start with http:// or https://"
                )));
            }
        }

        if self.source.page_size == 0 {
            return Err(ConfigError::Validation(
                "source page size must be at least 1".to_string(),
            ));
        }
        if self.source.max_pages_per_cycle == 0 {
            return Err(ConfigError::Validation(
                "max pages per cycle must be at least 1".to_string(),
            ));
        }
        if self.sink.sub_batch_size == 0 {
            return Err(ConfigError::Validation(
                "sub-batch size must be at least 1".to_string(),
            ));
        }
        if self.shipper.poll_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "poll interval must be at least 1 second".to_string(),
            ));
        }
        if self.shipper.max_consecutive_failures == 0 {
            return Err(ConfigError::Validation(
                "max consecutive failures must be at least 1".to_string(),
            ));
        }
        if self.shipper.state_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "state file path must not be empty".to_string(),
            ));
        }

        if self.resolver.enabled && self.resolver.dns_server.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "hostname DNS server '{}' is not a socket address",
                self.resolver.dns_server
            )));
        }

        Ok(())
    }
}

fn parse_env<F, T>(lookup: &F, var: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnv {
                var: var.to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            var: var.to_string(),
            value: raw.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
