use async_trait::async_trait;
use querylog_shipper_application::ports::HostnameResolver;
use querylog_shipper_domain::config::ResolverConfig;
use querylog_shipper_domain::DomainError;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::debug;

use crate::dns::{MessageBuilder, ResponseParser, UdpExchange};

/// Reverse lookups against a single DNS server over UDP.
pub struct PtrHostnameResolver {
    exchange: UdpExchange,
    timeout: Duration,
}

impl PtrHostnameResolver {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self {
            exchange: UdpExchange::new(server),
            timeout,
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Result<Self, DomainError> {
        let server: SocketAddr = config.dns_server.parse().map_err(|e| {
            DomainError::InvalidIpAddress(format!(
                "Invalid DNS server '{}': {}",
                config.dns_server, e
            ))
        })?;
        Ok(Self::new(server, Duration::from_millis(config.timeout_ms)))
    }

    pub fn ip_to_reverse_domain(ip: &IpAddr) -> String {
        MessageBuilder::reverse_domain(ip)
    }
}

#[async_trait]
impl HostnameResolver for PtrHostnameResolver {
    async fn resolve_hostname(&self, ip: IpAddr) -> Result<Option<String>, DomainError> {
        let (id, query) = MessageBuilder::build_ptr_query(&ip)?;

        debug!(
            ip = %ip,
            server = %self.exchange.server_addr(),
            "Performing PTR lookup"
        );

        let response = self.exchange.exchange(&query, self.timeout).await?;
        let hostname = ResponseParser::first_ptr(&response, id)?;

        match &hostname {
            Some(name) => debug!(ip = %ip, hostname = %name, "PTR lookup successful"),
            None => debug!(ip = %ip, "PTR lookup returned no records"),
        }
        Ok(hostname)
    }
}

/// Resolver used when reverse lookups are switched off; every address
/// stands in for its own hostname.
pub struct DisabledHostnameResolver;

#[async_trait]
impl HostnameResolver for DisabledHostnameResolver {
    async fn resolve_hostname(&self, _ip: IpAddr) -> Result<Option<String>, DomainError> {
        Ok(None)
    }
}
