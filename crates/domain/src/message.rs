use crate::dns_record::{DnsRecord, QueryType};
use crate::response_code::ResponseOutcome;

/// Size of the fixed DNS header.
pub const HEADER_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub query_type: QueryType,
    /// QTYPE exactly as received, which `QueryType::Other` does not keep.
    pub type_code: u16,
    /// QCLASS exactly as received; never validated.
    pub qclass: u16,
}

/// Decoded view of one DNS message. Built once by the decoder and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: u16,
    pub qr: bool,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub rcode: u8,

    pub qd_count: u16,
    pub an_count: u16,
    pub ns_count: u16,
    pub ar_count: u16,

    pub question: Question,

    /// Offset of the first byte after the question section.
    pub answer_start: usize,

    pub answers: Vec<DnsRecord>,
    pub authorities: Vec<DnsRecord>,
    pub additionals: Vec<DnsRecord>,
}

impl Message {
    pub fn outcome(&self) -> ResponseOutcome {
        ResponseOutcome::from_rcode(self.rcode)
    }

    /// A records of the additional section, in order. These seed the next
    /// server list when a referral carries glue.
    pub fn glue_addresses(&self) -> impl Iterator<Item = &DnsRecord> {
        self.additionals
            .iter()
            .filter(|record| record.record_type == QueryType::A)
    }

    pub fn first_answer_of(&self, record_type: QueryType) -> Option<&DnsRecord> {
        self.answers
            .iter()
            .find(|record| record.record_type == record_type)
    }

    /// True when the authority section holds a record of a type the resolver
    /// does not follow, such as the SOA of a negative answer.
    pub fn has_opaque_authority(&self) -> bool {
        self.authorities
            .iter()
            .any(|record| record.record_type == QueryType::Other)
    }

    pub fn record_count(&self) -> usize {
        self.answers.len() + self.authorities.len() + self.additionals.len()
    }
}
