use async_trait::async_trait;
use iterdns_application::ports::{AddressLookup, DnsTransport};
use iterdns_domain::DomainError;
use iterdns_infrastructure::dns::wire::decode_request;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentQuery {
    pub server: IpAddr,
    pub qname: String,
    pub qtype: u16,
    pub id: u16,
}

#[derive(Clone)]
enum Scripted {
    /// Reply whose ID is replaced by the query's.
    Reply(Vec<u8>),
    /// Bytes returned exactly as given.
    Raw(Vec<u8>),
}

/// Transport that answers from a script keyed by server address, question
/// name and QTYPE. Unscripted exchanges time out.
pub struct MockTransport {
    replies: Mutex<HashMap<(IpAddr, String, u16), Scripted>>,
    sent: Mutex<Vec<SentQuery>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(HashMap::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn script(&self, server: Ipv4Addr, qname: &str, qtype: u16, reply: Vec<u8>) {
        self.insert(server, qname, qtype, Scripted::Reply(reply));
    }

    pub fn script_raw(&self, server: Ipv4Addr, qname: &str, qtype: u16, bytes: Vec<u8>) {
        self.insert(server, qname, qtype, Scripted::Raw(bytes));
    }

    fn insert(&self, server: Ipv4Addr, qname: &str, qtype: u16, scripted: Scripted) {
        self.replies
            .lock()
            .unwrap()
            .insert((IpAddr::V4(server), qname.to_string(), qtype), scripted);
    }

    pub fn sent(&self) -> Vec<SentQuery> {
        self.sent.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsTransport for MockTransport {
    async fn send(
        &self,
        packet: &[u8],
        server: SocketAddr,
        _timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        let query = decode_request(packet)?;
        self.sent.lock().unwrap().push(SentQuery {
            server: server.ip(),
            qname: query.question.name.clone(),
            qtype: query.question.type_code,
            id: query.id,
        });

        let key = (server.ip(), query.question.name, query.question.type_code);
        let scripted = self.replies.lock().unwrap().get(&key).cloned();

        match scripted {
            Some(Scripted::Reply(mut reply)) => {
                reply[..2].copy_from_slice(&packet[..2]);
                Ok(reply)
            }
            Some(Scripted::Raw(bytes)) => Ok(bytes),
            None => Err(DomainError::TransportTimeout {
                server: server.to_string(),
            }),
        }
    }
}

/// Address lookup answering from a fixed table.
pub struct MockAddressLookup {
    addresses: HashMap<String, Ipv4Addr>,
    calls: Mutex<Vec<String>>,
}

impl MockAddressLookup {
    pub fn new() -> Self {
        Self {
            addresses: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_address(mut self, hostname: &str, addr: Ipv4Addr) -> Self {
        self.addresses.insert(hostname.to_string(), addr);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAddressLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AddressLookup for MockAddressLookup {
    async fn lookup_ipv4(&self, hostname: &str) -> Result<Option<Ipv4Addr>, DomainError> {
        self.calls.lock().unwrap().push(hostname.to_string());
        Ok(self.addresses.get(hostname).copied())
    }
}
