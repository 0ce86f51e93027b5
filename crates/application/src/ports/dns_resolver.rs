use async_trait::async_trait;
use iterdns_domain::{DnsRequest, DomainError, ResponseOutcome};
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DnsResolution {
    /// Wire bytes to hand back to the client, carrying the client's ID.
    pub response: Arc<Vec<u8>>,
    pub outcome: ResponseOutcome,
    pub answer_count: u16,
    /// Server whose reply ended the search.
    pub upstream_server: Option<SocketAddr>,
    /// Set when the answer was assembled by following a CNAME.
    pub cname: Option<String>,
}

impl DnsResolution {
    pub fn new(response: Vec<u8>, outcome: ResponseOutcome, answer_count: u16) -> Self {
        Self {
            response: Arc::new(response),
            outcome,
            answer_count,
            upstream_server: None,
            cname: None,
        }
    }

    pub fn with_upstream(mut self, server: SocketAddr) -> Self {
        self.upstream_server = Some(server);
        self
    }

    pub fn with_cname(mut self, cname: impl Into<String>) -> Self {
        self.cname = Some(cname.into());
        self
    }
}

#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, request: &DnsRequest) -> Result<DnsResolution, DomainError>;
}
