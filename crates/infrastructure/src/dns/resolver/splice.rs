use crate::dns::wire::MessageBuilder;
use iterdns_domain::{DomainError, Message};

/// Attaches the sections of a chased reply to the header and question of the
/// query that led to the chase.
///
/// ID, opcode, RD and QDCOUNT stay those of `original`. QR, AA, TC, RA and
/// RCODE come from `chased_packet`. Records are written with uncompressed
/// names, stopping at the first one that would push the message past
/// `capacity`; the counts describe what was written and TC is set when
/// anything was left out.
pub fn splice_chased_answer(
    original: &[u8],
    question_end: usize,
    chased_packet: &[u8],
    chased: &Message,
    capacity: usize,
) -> Result<Vec<u8>, DomainError> {
    let mut out = MessageBuilder::question_only(original, question_end)?;
    let flags = chased_packet.get(2..4).ok_or_else(|| {
        DomainError::MalformedMessage("chased reply has no flags".to_string())
    })?;
    out[2] = (out[2] & 0x79) | (flags[0] & 0x86);
    out[3] = flags[1];

    let sections = [&chased.answers, &chased.authorities, &chased.additionals];
    let mut counts = [0u16; 3];
    let mut clipped = chased.tc;
    let mut record_buf = Vec::new();

    'sections: for (index, records) in sections.iter().enumerate() {
        for record in records.iter() {
            record_buf.clear();
            MessageBuilder::encode_record(&mut record_buf, record)?;
            if out.len() + record_buf.len() > capacity {
                clipped = true;
                break 'sections;
            }
            out.extend_from_slice(&record_buf);
            counts[index] += 1;
        }
    }

    if clipped {
        out[2] |= 0x02;
    }
    for (index, count) in counts.iter().enumerate() {
        let at = 6 + index * 2;
        out[at..at + 2].copy_from_slice(&count.to_be_bytes());
    }

    Ok(out)
}
