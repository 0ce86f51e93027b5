use iterdns_domain::DnsRecord;
use std::net::Ipv4Addr;

/// Candidate nameservers for one step of the iterative search, tried in
/// order. Only A records are candidates; NS records ride along unused.
#[derive(Debug, Clone)]
pub struct ServerList {
    servers: Vec<DnsRecord>,
    next: usize,
}

impl ServerList {
    pub fn new(servers: Vec<DnsRecord>) -> Self {
        Self { servers, next: 0 }
    }

    /// Advances past the next A record and returns it with its address.
    pub fn next_candidate(&mut self) -> Option<(&DnsRecord, Ipv4Addr)> {
        while self.next < self.servers.len() {
            let index = self.next;
            self.next += 1;
            if let Some(addr) = self.servers[index].address() {
                return Some((&self.servers[index], addr));
            }
        }
        None
    }

    /// True while untried A records remain.
    pub fn has_remaining(&self) -> bool {
        self.servers[self.next.min(self.servers.len())..]
            .iter()
            .any(|record| record.address().is_some())
    }

    pub fn candidate_count(&self) -> usize {
        self.servers
            .iter()
            .filter(|record| record.address().is_some())
            .count()
    }
}
