use super::QueryType;
use std::fmt;
use std::net::Ipv4Addr;

/// RDATA decoded according to the record's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    Address(Ipv4Addr),

    /// Target of an NS, CNAME or PTR record.
    Name(String),

    Mail { preference: u16, exchange: String },

    /// RDATA of a type the codec does not interpret, kept with its TYPE code
    /// so the record can be written back out unchanged.
    Opaque { type_code: u16, rdata: Vec<u8> },
}

impl RecordData {
    pub fn as_address(&self) -> Option<Ipv4Addr> {
        match self {
            RecordData::Address(addr) => Some(*addr),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            RecordData::Name(name) => Some(name),
            RecordData::Mail { exchange, .. } => Some(exchange),
            _ => None,
        }
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::Address(addr) => write!(f, "{}", addr),
            RecordData::Name(name) => write!(f, "{}", name),
            RecordData::Mail { exchange, .. } => write!(f, "{}", exchange),
            RecordData::Opaque { type_code, rdata } => {
                write!(f, "TYPE{} <{} bytes>", type_code, rdata.len())
            }
        }
    }
}

/// A resource record as it appeared on the wire, or synthesized from a
/// hints file or a nested lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub name: String,

    pub record_type: QueryType,

    /// CLASS field exactly as received.
    pub class: [u8; 2],

    pub ttl: u32,

    pub data: RecordData,

    /// AA bit of the message this record came from.
    pub authoritative: bool,

    /// TC bit of the message this record came from.
    pub truncated: bool,

    /// Number of bytes this record occupied in its message, name included.
    /// Zero for synthesized records.
    pub byte_len: usize,
}

impl DnsRecord {
    pub const CLASS_IN: [u8; 2] = [0x00, 0x01];

    /// Builds an A record that did not come from a message, e.g. a root hint or
    /// the address found for a nameserver named in a referral.
    pub fn synthesized_a(name: impl Into<String>, address: Ipv4Addr) -> Self {
        Self {
            name: name.into(),
            record_type: QueryType::A,
            class: Self::CLASS_IN,
            ttl: 0,
            data: RecordData::Address(address),
            authoritative: false,
            truncated: false,
            byte_len: 0,
        }
    }

    pub fn synthesized_ns(zone: impl Into<String>, nameserver: impl Into<String>) -> Self {
        Self {
            name: zone.into(),
            record_type: QueryType::NS,
            class: Self::CLASS_IN,
            ttl: 0,
            data: RecordData::Name(nameserver.into()),
            authoritative: false,
            truncated: false,
            byte_len: 0,
        }
    }

    pub fn address(&self) -> Option<Ipv4Addr> {
        if self.record_type == QueryType::A {
            self.data.as_address()
        } else {
            None
        }
    }

    pub fn target(&self) -> Option<&str> {
        self.data.as_name()
    }

    /// TYPE code to write for this record.
    pub fn type_code(&self) -> u16 {
        match self.data {
            RecordData::Opaque { type_code, .. } => type_code,
            _ => self.record_type.to_u16(),
        }
    }

    pub fn mx_preference(&self) -> Option<u16> {
        match self.data {
            RecordData::Mail { preference, .. } => Some(preference),
            _ => None,
        }
    }
}
