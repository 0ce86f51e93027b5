use crate::ports::{DnsResolution, DnsResolver};
use iterdns_domain::{DnsRequest, DomainError};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

pub struct HandleDnsQueryUseCase {
    resolver: Arc<dyn DnsResolver>,
    retries: u32,
}

impl HandleDnsQueryUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self {
            resolver,
            retries: 0,
        }
    }

    /// Restart a request from scratch up to `retries` more times when every
    /// server of a list timed out.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub async fn execute(&self, request: &DnsRequest) -> Result<DnsResolution, DomainError> {
        let start = Instant::now();
        let mut attempt = 0;

        loop {
            match self.resolver.resolve(request).await {
                Ok(resolution) => {
                    info!(
                        domain = %request.domain,
                        record_type = %request.query_type,
                        client = %request.client_ip,
                        status = resolution.outcome.as_status(),
                        answers = resolution.answer_count,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Query resolved"
                    );
                    return Ok(resolution);
                }
                Err(DomainError::SlistTimeout) if attempt < self.retries => {
                    attempt += 1;
                    warn!(
                        domain = %request.domain,
                        attempt = attempt,
                        "All servers timed out, restarting resolution"
                    );
                }
                Err(e) => {
                    warn!(
                        domain = %request.domain,
                        record_type = %request.query_type,
                        error = %e,
                        "Query failed"
                    );
                    return Err(e);
                }
            }
        }
    }
}
