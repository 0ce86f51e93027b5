use iterdns_domain::{DnsRecord, QueryType, RecordData};
use iterdns_infrastructure::dns::wire::MessageBuilder;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Builds reply messages in wire format for scripted nameservers.
///
/// The ID is left at zero; `MockTransport` copies in the query's ID.
pub struct ResponseBuilder {
    qname: String,
    type_code: u16,
    rcode: u8,
    authoritative: bool,
    truncated: bool,
    response: bool,
    compress_answers: bool,
    answers: Vec<DnsRecord>,
    authorities: Vec<DnsRecord>,
    additionals: Vec<DnsRecord>,
}

impl ResponseBuilder {
    pub fn new(qname: &str, query_type: QueryType) -> Self {
        Self::for_type_code(qname, query_type.to_u16())
    }

    pub fn for_type_code(qname: &str, type_code: u16) -> Self {
        Self {
            qname: qname.to_string(),
            type_code,
            rcode: 0,
            authoritative: false,
            truncated: false,
            response: true,
            compress_answers: false,
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    pub fn rcode(mut self, rcode: u8) -> Self {
        self.rcode = rcode;
        self
    }

    pub fn authoritative(mut self) -> Self {
        self.authoritative = true;
        self
    }

    pub fn truncated(mut self) -> Self {
        self.truncated = true;
        self
    }

    pub fn not_a_response(mut self) -> Self {
        self.response = false;
        self
    }

    /// Answers owned by the question name are written with a pointer to it.
    pub fn compress_answers(mut self) -> Self {
        self.compress_answers = true;
        self
    }

    pub fn answer_a(mut self, name: &str, addr: Ipv4Addr) -> Self {
        self.answers.push(record(name, QueryType::A, RecordData::Address(addr)));
        self
    }

    pub fn answer_cname(mut self, name: &str, target: &str) -> Self {
        self.answers
            .push(record(name, QueryType::CNAME, RecordData::Name(target.to_string())));
        self
    }

    pub fn answer_mx(mut self, name: &str, preference: u16, exchange: &str) -> Self {
        self.answers.push(record(
            name,
            QueryType::MX,
            RecordData::Mail {
                preference,
                exchange: exchange.to_string(),
            },
        ));
        self
    }

    pub fn answer_aaaa(mut self, name: &str, addr: Ipv6Addr) -> Self {
        self.answers.push(opaque(name, 28, addr.octets().to_vec()));
        self
    }

    pub fn authority_ns(mut self, zone: &str, nameserver: &str) -> Self {
        self.authorities
            .push(record(zone, QueryType::NS, RecordData::Name(nameserver.to_string())));
        self
    }

    /// SOA with an arbitrary fixed RDATA; the resolver never looks inside it.
    pub fn authority_soa(mut self, zone: &str) -> Self {
        let mut rdata = vec![0x00, 0x00];
        rdata.extend_from_slice(&[0u8; 20]);
        self.authorities.push(opaque(zone, 6, rdata));
        self
    }

    pub fn additional_a(mut self, name: &str, addr: Ipv4Addr) -> Self {
        self.additionals
            .push(record(name, QueryType::A, RecordData::Address(addr)));
        self
    }

    pub fn additional_aaaa(mut self, name: &str, addr: Ipv6Addr) -> Self {
        self.additionals.push(opaque(name, 28, addr.octets().to_vec()));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = MessageBuilder::build_query_for_type_code(&self.qname, self.type_code, false)
            .expect("valid question name");
        out[0] = 0;
        out[1] = 0;

        let mut flags = 0u8;
        if self.response {
            flags |= 0x80;
        }
        if self.authoritative {
            flags |= 0x04;
        }
        if self.truncated {
            flags |= 0x02;
        }
        out[2] = flags;
        out[3] = self.rcode & 0x0F;

        out[6..8].copy_from_slice(&(self.answers.len() as u16).to_be_bytes());
        out[8..10].copy_from_slice(&(self.authorities.len() as u16).to_be_bytes());
        out[10..12].copy_from_slice(&(self.additionals.len() as u16).to_be_bytes());

        let qname_wire_len = wire_name_len(&self.qname);
        for answer in &self.answers {
            if self.compress_answers && answer.name == self.qname {
                let mut encoded = Vec::new();
                MessageBuilder::encode_record(&mut encoded, answer).expect("encodable record");
                out.extend_from_slice(&[0xC0, 0x0C]);
                out.extend_from_slice(&encoded[qname_wire_len..]);
            } else {
                MessageBuilder::encode_record(&mut out, answer).expect("encodable record");
            }
        }
        for record in self.authorities.iter().chain(self.additionals.iter()) {
            MessageBuilder::encode_record(&mut out, record).expect("encodable record");
        }

        out
    }
}

fn wire_name_len(name: &str) -> usize {
    if name.is_empty() || name == "." {
        1
    } else {
        name.trim_end_matches('.').len() + 2
    }
}

fn record(name: &str, record_type: QueryType, data: RecordData) -> DnsRecord {
    DnsRecord {
        record_type,
        ttl: 3600,
        data,
        ..DnsRecord::synthesized_a(name, Ipv4Addr::UNSPECIFIED)
    }
}

fn opaque(name: &str, type_code: u16, rdata: Vec<u8>) -> DnsRecord {
    record(
        name,
        QueryType::Other,
        RecordData::Opaque { type_code, rdata },
    )
}
