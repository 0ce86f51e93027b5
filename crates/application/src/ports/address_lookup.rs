use async_trait::async_trait;
use iterdns_domain::DomainError;
use std::net::Ipv4Addr;

/// Last-resort address lookup for a nameserver name that the iterative
/// search could not resolve itself.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn lookup_ipv4(&self, hostname: &str) -> Result<Option<Ipv4Addr>, DomainError>;
}
