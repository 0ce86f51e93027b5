use async_trait::async_trait;
use iterdns_application::ports::{DnsResolution, DnsResolver};
use iterdns_domain::{DnsRequest, DomainError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Resolver that replays a queue of scripted results, one per call.
pub struct MockDnsResolver {
    results: Mutex<VecDeque<Result<DnsResolution, DomainError>>>,
    calls: AtomicUsize,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn push_result(&self, result: Result<DnsResolution, DomainError>) {
        self.results.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, request: &DnsRequest) -> Result<DnsResolution, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(DomainError::InvalidDomainName(format!(
                "No mock response for {}",
                request.domain
            )))
        })
    }
}
