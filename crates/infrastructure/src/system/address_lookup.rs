use async_trait::async_trait;
use iterdns_application::ports::AddressLookup;
use iterdns_domain::DomainError;
use std::net::{IpAddr, Ipv4Addr};
use tokio::net::lookup_host;
use tracing::debug;

/// Resolves nameserver names through the host's own resolver.
pub struct SystemAddressLookup;

impl SystemAddressLookup {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemAddressLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AddressLookup for SystemAddressLookup {
    async fn lookup_ipv4(&self, hostname: &str) -> Result<Option<Ipv4Addr>, DomainError> {
        debug!(hostname = %hostname, "Falling back to system address lookup");

        let addrs = lookup_host((hostname, 0)).await?;
        let found = addrs
            .filter_map(|addr| match addr.ip() {
                IpAddr::V4(v4) => Some(v4),
                IpAddr::V6(_) => None,
            })
            .next();

        Ok(found)
    }
}
