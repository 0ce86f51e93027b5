use crate::dns_record::QueryType;
use std::net::IpAddr;
use std::sync::Arc;

/// A client question as received by the resolver.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    /// Transaction ID chosen by the client; upstream queries reuse it.
    pub id: u16,
    pub domain: Arc<str>,
    pub query_type: QueryType,
    pub recursion_desired: bool,
    pub client_ip: IpAddr,
    /// Header and question exactly as the client sent them. When present the
    /// resolver forwards these bytes instead of building a new query, so a
    /// question type outside the supported set is asked verbatim.
    pub packet: Option<Arc<[u8]>>,
}

impl DnsRequest {
    pub fn new(
        id: u16,
        domain: impl Into<Arc<str>>,
        query_type: QueryType,
        client_ip: IpAddr,
    ) -> Self {
        Self {
            id,
            domain: domain.into(),
            query_type,
            recursion_desired: true,
            client_ip,
            packet: None,
        }
    }

    pub fn with_recursion_desired(mut self, recursion_desired: bool) -> Self {
        self.recursion_desired = recursion_desired;
        self
    }

    pub fn with_packet(mut self, packet: impl Into<Arc<[u8]>>) -> Self {
        self.packet = Some(packet.into());
        self
    }
}
