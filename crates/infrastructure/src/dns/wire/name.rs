//! Domain name encoding (RFC 1035 §3.1) and compressed-name decoding
//! (RFC 1035 §4.1.4).

use iterdns_domain::DomainError;

/// Longest name accepted, in presentation form.
pub const MAX_NAME_LEN: usize = 255;

pub const MAX_LABEL_LEN: usize = 63;

/// Compression pointers followed while decoding one name before the name is
/// rejected as a loop.
pub const MAX_POINTER_JUMPS: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NameError {
    /// The name runs past the end of the readable window.
    OutOfBounds,
    Invalid(String),
}

impl From<NameError> for DomainError {
    fn from(e: NameError) -> Self {
        match e {
            NameError::OutOfBounds => {
                DomainError::MalformedMessage("domain name runs past end of message".to_string())
            }
            NameError::Invalid(reason) => DomainError::MalformedMessage(reason),
        }
    }
}

/// Reads the name starting at `offset`.
///
/// Returns the dotted name and the number of bytes the name occupies at
/// `offset` itself: each literal label counts `length + 1`, a pointer counts 2
/// and ends the name there, otherwise the terminating zero byte counts 1.
/// Labels are copied byte for byte, one `char` per byte.
pub(crate) fn read_name(buf: &[u8], offset: usize) -> Result<(String, usize), NameError> {
    let mut name = String::new();
    let mut pos = offset;
    let mut consumed: Option<usize> = None;
    let mut jumps = 0;

    loop {
        let len = *buf.get(pos).ok_or(NameError::OutOfBounds)? as usize;

        if len == 0 {
            if consumed.is_none() {
                consumed = Some(pos + 1 - offset);
            }
            break;
        }

        match len & 0xC0 {
            0xC0 => {
                let low = *buf.get(pos + 1).ok_or(NameError::OutOfBounds)? as usize;
                if consumed.is_none() {
                    consumed = Some(pos + 2 - offset);
                }
                jumps += 1;
                if jumps > MAX_POINTER_JUMPS {
                    return Err(NameError::Invalid(format!(
                        "compression pointer loop at offset {}",
                        offset
                    )));
                }
                pos = ((len & 0x3F) << 8) | low;
            }
            0x00 => {
                let label = buf
                    .get(pos + 1..pos + 1 + len)
                    .ok_or(NameError::OutOfBounds)?;
                if !name.is_empty() {
                    name.push('.');
                }
                name.extend(label.iter().map(|&b| b as char));
                if name.len() > MAX_NAME_LEN {
                    return Err(NameError::Invalid(format!(
                        "domain name at offset {} exceeds {} bytes",
                        offset, MAX_NAME_LEN
                    )));
                }
                pos += 1 + len;
            }
            _ => {
                return Err(NameError::Invalid(format!(
                    "unsupported label type {:#04x} at offset {}",
                    len, pos
                )));
            }
        }
    }

    // `consumed` is always set before the loop exits
    Ok((name, consumed.unwrap_or(1)))
}

/// Number of bytes the name at `offset` occupies there, counted the same way
/// as [`read_name`]. Pointers are not followed.
pub(crate) fn skip_name(buf: &[u8], offset: usize) -> Result<usize, NameError> {
    let mut pos = offset;

    loop {
        let len = *buf.get(pos).ok_or(NameError::OutOfBounds)? as usize;
        if len == 0 {
            return Ok(pos + 1 - offset);
        }

        match len & 0xC0 {
            0xC0 => {
                buf.get(pos + 1).ok_or(NameError::OutOfBounds)?;
                return Ok(pos + 2 - offset);
            }
            0x00 => pos += 1 + len,
            _ => {
                return Err(NameError::Invalid(format!(
                    "unsupported label type {:#04x} at offset {}",
                    len, pos
                )));
            }
        }
    }
}

/// Appends `name` as uncompressed labels followed by the zero byte.
/// A trailing dot is ignored; `""` and `"."` encode the root.
pub(crate) fn write_name(out: &mut Vec<u8>, name: &str) -> Result<(), DomainError> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);
    let start = out.len();

    if !trimmed.is_empty() {
        for label in trimmed.split('.') {
            let bytes = label
                .chars()
                .map(u8::try_from)
                .collect::<Result<Vec<u8>, _>>()
                .map_err(|_| {
                    DomainError::InvalidDomainName(format!(
                        "'{}' contains characters outside a single byte",
                        name
                    ))
                })?;

            if bytes.is_empty() {
                return Err(DomainError::InvalidDomainName(format!(
                    "'{}' contains an empty label",
                    name
                )));
            }
            if bytes.len() > MAX_LABEL_LEN {
                return Err(DomainError::InvalidDomainName(format!(
                    "label '{}' exceeds {} bytes",
                    label, MAX_LABEL_LEN
                )));
            }

            out.push(bytes.len() as u8);
            out.extend_from_slice(&bytes);
        }
    }
    out.push(0);

    if out.len() - start > MAX_NAME_LEN {
        return Err(DomainError::InvalidDomainName(format!(
            "'{}' exceeds {} bytes on the wire",
            name, MAX_NAME_LEN
        )));
    }
    Ok(())
}
