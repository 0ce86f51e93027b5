//! DNS Message Builder
//!
//! Constructs query messages and error replies in wire format, and
//! re-encodes decoded records with uncompressed names.

use super::name::write_name;
use iterdns_domain::message::HEADER_LEN;
use iterdns_domain::{DnsRecord, DomainError, QueryType, RecordData, ResponseOutcome};

const CLASS_IN: u16 = 1;

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a query with a random ID and serialize it to wire format.
    pub fn build_query(
        domain: &str,
        query_type: QueryType,
        recursion_desired: bool,
    ) -> Result<Vec<u8>, DomainError> {
        let (_, bytes) = Self::build_query_with_id(domain, query_type, recursion_desired)?;
        Ok(bytes)
    }

    /// Build a query and return the random ID it was given alongside the bytes.
    pub fn build_query_with_id(
        domain: &str,
        query_type: QueryType,
        recursion_desired: bool,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let id = fastrand::u16(..);
        let bytes = Self::build_query_for_id(id, domain, query_type, recursion_desired)?;
        Ok((id, bytes))
    }

    /// Build a query carrying a caller-chosen ID.
    ///
    /// PTR queries for a plain address are rewritten to the reverse domain,
    /// e.g. `192.0.2.1` is asked as `1.2.0.192.in-addr.arpa`.
    pub fn build_query_for_id(
        id: u16,
        domain: &str,
        query_type: QueryType,
        recursion_desired: bool,
    ) -> Result<Vec<u8>, DomainError> {
        let qname = if query_type == QueryType::PTR && !domain.contains("in-addr") {
            Self::reverse_ptr_name(domain)
        } else {
            domain.to_string()
        };

        Self::encode_query(id, &qname, query_type.to_u16(), recursion_desired)
    }

    /// Build a query with a random ID for a raw QTYPE code. The name is used
    /// as given.
    pub fn build_query_for_type_code(
        domain: &str,
        type_code: u16,
        recursion_desired: bool,
    ) -> Result<Vec<u8>, DomainError> {
        Self::encode_query(fastrand::u16(..), domain, type_code, recursion_desired)
    }

    fn encode_query(
        id: u16,
        qname: &str,
        type_code: u16,
        recursion_desired: bool,
    ) -> Result<Vec<u8>, DomainError> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + qname.len() + 6);
        bytes.extend_from_slice(&id.to_be_bytes());
        bytes.push(if recursion_desired { 0x01 } else { 0x00 });
        bytes.push(0x00);
        bytes.extend_from_slice(&1u16.to_be_bytes());
        bytes.extend_from_slice(&[0x00; 6]);

        write_name(&mut bytes, qname)?;
        bytes.extend_from_slice(&type_code.to_be_bytes());
        bytes.extend_from_slice(&CLASS_IN.to_be_bytes());

        Ok(bytes)
    }

    /// Reverses the labels of `name` and appends `in-addr.arpa`.
    pub fn reverse_ptr_name(name: &str) -> String {
        let trimmed = name.strip_suffix('.').unwrap_or(name);
        let mut labels: Vec<&str> = trimmed.split('.').collect();
        labels.reverse();
        labels.push("in-addr");
        labels.push("arpa");
        labels.join(".")
    }

    /// Header and question of `packet` with the record counts cleared, so it
    /// can be sent on as a plain query.
    pub fn question_only(packet: &[u8], question_end: usize) -> Result<Vec<u8>, DomainError> {
        let mut bytes = packet
            .get(..question_end)
            .ok_or_else(|| {
                DomainError::MalformedMessage(format!(
                    "question ends at {} but message is {} bytes",
                    question_end,
                    packet.len()
                ))
            })?
            .to_vec();
        bytes[6..HEADER_LEN].fill(0);
        Ok(bytes)
    }

    /// Builds an empty reply to the query in `packet` carrying `outcome`.
    ///
    /// ID, opcode, RD and the question are copied from the query. RA is set.
    pub fn build_error_response(
        packet: &[u8],
        question_end: usize,
        outcome: ResponseOutcome,
    ) -> Result<Vec<u8>, DomainError> {
        let mut bytes = Self::question_only(packet, question_end)?;
        bytes[2] = 0x80 | (bytes[2] & 0x79);
        bytes[3] = 0x80 | (outcome.rcode() & 0x0F);
        Ok(bytes)
    }

    /// Appends `record` with an uncompressed owner name and RDATA.
    pub fn encode_record(out: &mut Vec<u8>, record: &DnsRecord) -> Result<(), DomainError> {
        write_name(out, &record.name)?;
        out.extend_from_slice(&record.type_code().to_be_bytes());
        out.extend_from_slice(&record.class);
        out.extend_from_slice(&record.ttl.to_be_bytes());

        let rdlength_at = out.len();
        out.extend_from_slice(&[0x00, 0x00]);

        match &record.data {
            RecordData::Address(addr) => out.extend_from_slice(&addr.octets()),
            RecordData::Name(target) => write_name(out, target)?,
            RecordData::Mail {
                preference,
                exchange,
            } => {
                out.extend_from_slice(&preference.to_be_bytes());
                write_name(out, exchange)?;
            }
            RecordData::Opaque { rdata, .. } => out.extend_from_slice(rdata),
        }

        let rdlength = out.len() - rdlength_at - 2;
        let rdlength = u16::try_from(rdlength).map_err(|_| {
            DomainError::MalformedMessage(format!(
                "RDATA of {} is {} bytes",
                record.name, rdlength
            ))
        })?;
        out[rdlength_at..rdlength_at + 2].copy_from_slice(&rdlength.to_be_bytes());
        Ok(())
    }
}
