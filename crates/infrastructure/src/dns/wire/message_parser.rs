//! Decoding of DNS messages (RFC 1035 §4.1).
//!
//! Records are read against a capacity limit. A record that reaches the
//! limit, or the limit being reached while records remain, stops the walk and
//! marks the message truncated; records read until then are kept.
//!
//! Replies carrying a non-zero RCODE are walked for truncation only. Their
//! records are measured but never interpreted.

use super::name::{read_name, skip_name, NameError};
use iterdns_domain::config::resolver::MIN_MESSAGE_SIZE;
use iterdns_domain::message::HEADER_LEN;
use iterdns_domain::{DnsRecord, DomainError, Message, QueryType, Question, RecordData};
use std::net::Ipv4Addr;

/// Decodes a reply and rejects anything without the QR bit.
pub fn decode_response(buf: &[u8], capacity: usize) -> Result<Message, DomainError> {
    let message = decode_message(buf, capacity)?;
    if !message.qr {
        return Err(DomainError::NotAResponse);
    }
    Ok(message)
}

/// Decodes the header and question of a client query. Any records that
/// follow are ignored.
pub fn decode_request(buf: &[u8]) -> Result<Message, DomainError> {
    let header = Header::parse(buf)?;
    if header.qr {
        return Err(DomainError::MalformedMessage(
            "query has the QR bit set".to_string(),
        ));
    }
    let (question, answer_start) = parse_question(buf)?;
    Ok(header.into_message(question, answer_start, Sections::default()))
}

/// Decodes header, question and all three record sections.
pub fn decode_message(buf: &[u8], capacity: usize) -> Result<Message, DomainError> {
    let mut header = Header::parse(buf)?;
    let (question, answer_start) = parse_question(buf)?;

    let limit = capacity.min(buf.len());
    let window = &buf[..limit];
    let interpret = header.rcode == 0;
    let mut sections = Sections::default();
    let mut cursor = answer_start;

    let counts = [header.an_count, header.ns_count, header.ar_count];
    'walk: for (section, &count) in counts.iter().enumerate() {
        for _ in 0..count {
            if cursor >= limit {
                header.tc = true;
                break 'walk;
            }

            let byte_len = if interpret {
                match parse_record(window, cursor, header.aa)? {
                    Some(record) => {
                        let byte_len = record.byte_len;
                        sections.push(section, record);
                        byte_len
                    }
                    None => {
                        header.tc = true;
                        break 'walk;
                    }
                }
            } else {
                match measure_record(window, cursor)? {
                    Some(byte_len) => byte_len,
                    None => {
                        header.tc = true;
                        break 'walk;
                    }
                }
            };

            cursor += byte_len;
            if cursor >= capacity {
                header.tc = true;
                break 'walk;
            }
        }
    }

    if header.tc {
        sections.mark_truncated();
    }

    Ok(header.into_message(question, answer_start, sections))
}

struct Header {
    id: u16,
    qr: bool,
    aa: bool,
    tc: bool,
    rd: bool,
    ra: bool,
    rcode: u8,
    qd_count: u16,
    an_count: u16,
    ns_count: u16,
    ar_count: u16,
}

impl Header {
    fn parse(buf: &[u8]) -> Result<Self, DomainError> {
        if buf.len() < MIN_MESSAGE_SIZE {
            return Err(DomainError::MalformedMessage(format!(
                "message is {} bytes, minimum is {}",
                buf.len(),
                MIN_MESSAGE_SIZE
            )));
        }

        Ok(Self {
            id: u16::from_be_bytes([buf[0], buf[1]]),
            qr: buf[2] & 0x80 != 0,
            aa: buf[2] & 0x04 != 0,
            tc: buf[2] & 0x02 != 0,
            rd: buf[2] & 0x01 != 0,
            ra: buf[3] & 0x80 != 0,
            rcode: buf[3] & 0x0F,
            qd_count: u16::from_be_bytes([buf[4], buf[5]]),
            an_count: u16::from_be_bytes([buf[6], buf[7]]),
            ns_count: u16::from_be_bytes([buf[8], buf[9]]),
            ar_count: u16::from_be_bytes([buf[10], buf[11]]),
        })
    }

    fn into_message(self, question: Question, answer_start: usize, sections: Sections) -> Message {
        Message {
            id: self.id,
            qr: self.qr,
            aa: self.aa,
            tc: self.tc,
            rd: self.rd,
            ra: self.ra,
            rcode: self.rcode,
            qd_count: self.qd_count,
            an_count: self.an_count,
            ns_count: self.ns_count,
            ar_count: self.ar_count,
            question,
            answer_start,
            answers: sections.answers,
            authorities: sections.authorities,
            additionals: sections.additionals,
        }
    }
}

#[derive(Default)]
struct Sections {
    answers: Vec<DnsRecord>,
    authorities: Vec<DnsRecord>,
    additionals: Vec<DnsRecord>,
}

impl Sections {
    fn push(&mut self, section: usize, record: DnsRecord) {
        match section {
            0 => self.answers.push(record),
            1 => self.authorities.push(record),
            _ => self.additionals.push(record),
        }
    }

    fn mark_truncated(&mut self) {
        self.answers
            .iter_mut()
            .chain(self.authorities.iter_mut())
            .chain(self.additionals.iter_mut())
            .for_each(|record| record.truncated = true);
    }
}

fn parse_question(buf: &[u8]) -> Result<(Question, usize), DomainError> {
    let (name, consumed) = read_name(buf, HEADER_LEN)?;
    let pos = HEADER_LEN + consumed;

    let fixed = buf.get(pos..pos + 4).ok_or_else(|| {
        DomainError::MalformedMessage("question section truncated".to_string())
    })?;

    let type_code = u16::from_be_bytes([fixed[0], fixed[1]]);
    let question = Question {
        name,
        query_type: QueryType::from_u16(type_code & 0x00FF),
        type_code,
        qclass: u16::from_be_bytes([fixed[2], fixed[3]]),
    };
    Ok((question, pos + 4))
}

/// Wire length of the record at `offset`, read without decoding its owner
/// name or RDATA. `Ok(None)` means the record does not fit in `window`.
fn measure_record(window: &[u8], offset: usize) -> Result<Option<usize>, DomainError> {
    let name_len = match skip_name(window, offset) {
        Ok(len) => len,
        Err(NameError::OutOfBounds) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let fixed_start = offset + name_len;
    let Some(fixed) = window.get(fixed_start..fixed_start + 10) else {
        return Ok(None);
    };
    let rdlength = u16::from_be_bytes([fixed[8], fixed[9]]) as usize;

    let end = fixed_start + 10 + rdlength;
    if end > window.len() {
        return Ok(None);
    }
    Ok(Some(end - offset))
}

/// Reads the record at `offset`. `Ok(None)` means the record does not fit in
/// `window`.
fn parse_record(
    window: &[u8],
    offset: usize,
    authoritative: bool,
) -> Result<Option<DnsRecord>, DomainError> {
    let (name, name_len) = match read_name(window, offset) {
        Ok(read) => read,
        Err(NameError::OutOfBounds) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let fixed_start = offset + name_len;
    let Some(fixed) = window.get(fixed_start..fixed_start + 10) else {
        return Ok(None);
    };

    let type_code = u16::from_be_bytes([fixed[0], fixed[1]]);
    let class = [fixed[2], fixed[3]];
    let ttl = u32::from_be_bytes([fixed[4], fixed[5], fixed[6], fixed[7]]);
    let rdlength = u16::from_be_bytes([fixed[8], fixed[9]]) as usize;

    let rdata_start = fixed_start + 10;
    let end = rdata_start + rdlength;
    if end > window.len() {
        return Ok(None);
    }

    let record_type = QueryType::from_u16(type_code);
    let data = if record_type.has_name_rdata() {
        let (target, _) = read_name(window, rdata_start)?;
        RecordData::Name(target)
    } else {
        match record_type {
            QueryType::A => {
                if rdlength != 4 {
                    return Err(DomainError::MalformedMessage(format!(
                        "A record for {} has RDLENGTH {}",
                        name, rdlength
                    )));
                }
                let octets = &window[rdata_start..end];
                RecordData::Address(Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]))
            }
            QueryType::MX => {
                if rdlength < 3 {
                    return Err(DomainError::MalformedMessage(format!(
                        "MX record for {} has RDLENGTH {}",
                        name, rdlength
                    )));
                }
                let preference =
                    u16::from_be_bytes([window[rdata_start], window[rdata_start + 1]]);
                let (exchange, _) = read_name(window, rdata_start + 2)?;
                RecordData::Mail {
                    preference,
                    exchange,
                }
            }
            _ => RecordData::Opaque {
                type_code,
                rdata: window[rdata_start..end].to_vec(),
            },
        }
    };

    Ok(Some(DnsRecord {
        name,
        record_type,
        class,
        ttl,
        data,
        authoritative,
        truncated: false,
        byte_len: end - offset,
    }))
}
