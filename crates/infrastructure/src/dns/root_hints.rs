//! Root hints in `named.root` zone-file form: `name [ttl] [class] type data`.
//!
//! NS and A lines are kept in file order. AAAA lines, comments and blank lines
//! are skipped; any other type is an error.

use iterdns_domain::{DnsRecord, DomainError};
use std::net::Ipv4Addr;
use std::path::Path;
use tracing::{info, warn};

/// IANA root servers (IPv4), used when no hints file is present.
const BUILTIN_ROOT_SERVERS: &[(&str, Ipv4Addr)] = &[
    ("a.root-servers.net", Ipv4Addr::new(198, 41, 0, 4)),
    ("b.root-servers.net", Ipv4Addr::new(170, 247, 170, 2)),
    ("c.root-servers.net", Ipv4Addr::new(192, 33, 4, 12)),
    ("d.root-servers.net", Ipv4Addr::new(199, 7, 91, 13)),
    ("e.root-servers.net", Ipv4Addr::new(192, 203, 230, 10)),
    ("f.root-servers.net", Ipv4Addr::new(192, 5, 5, 241)),
    ("g.root-servers.net", Ipv4Addr::new(192, 112, 36, 4)),
    ("h.root-servers.net", Ipv4Addr::new(198, 97, 190, 53)),
    ("i.root-servers.net", Ipv4Addr::new(192, 36, 148, 17)),
    ("j.root-servers.net", Ipv4Addr::new(192, 58, 128, 30)),
    ("k.root-servers.net", Ipv4Addr::new(193, 0, 14, 129)),
    ("l.root-servers.net", Ipv4Addr::new(199, 7, 83, 42)),
    ("m.root-servers.net", Ipv4Addr::new(202, 12, 27, 33)),
];

const ROOT_TTL: u32 = 3_600_000;

pub fn builtin_root_hints() -> Vec<DnsRecord> {
    BUILTIN_ROOT_SERVERS
        .iter()
        .flat_map(|&(name, addr)| {
            let mut ns = DnsRecord::synthesized_ns(".", name);
            let mut a = DnsRecord::synthesized_a(name, addr);
            ns.ttl = ROOT_TTL;
            a.ttl = ROOT_TTL;
            [ns, a]
        })
        .collect()
}

/// Reads hints from `path`, or returns the built-in list when the file does
/// not exist.
pub fn load_root_hints(path: &Path) -> Result<Vec<DnsRecord>, DomainError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Root hints file not found, using built-in root servers");
            return Ok(builtin_root_hints());
        }
        Err(e) => {
            return Err(DomainError::InvalidRootHints(format!(
                "{}: {}",
                path.display(),
                e
            )))
        }
    };

    let hints = parse_root_hints(&contents)?;
    info!(path = %path.display(), records = hints.len(), "Root hints loaded");
    Ok(hints)
}

pub fn parse_root_hints(contents: &str) -> Result<Vec<DnsRecord>, DomainError> {
    let mut hints = Vec::new();

    for (index, raw) in contents.lines().enumerate() {
        let line = raw.split(';').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        if let Some(record) = parse_line(line, index + 1)? {
            hints.push(record);
        }
    }

    if !hints.iter().any(|record| record.address().is_some()) {
        return Err(DomainError::InvalidRootHints(
            "no A records found".to_string(),
        ));
    }
    Ok(hints)
}

fn parse_line(line: &str, line_number: usize) -> Result<Option<DnsRecord>, DomainError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(DomainError::InvalidRootHints(format!(
            "line {}: expected `name [ttl] [class] type data`",
            line_number
        )));
    }

    let name = normalize(fields[0]);
    let data = fields[fields.len() - 1];

    let mut ttl = None;
    let mut record_type = None;
    for field in &fields[1..fields.len() - 1] {
        if let Ok(value) = field.parse::<u32>() {
            ttl = Some(value);
        } else if field.eq_ignore_ascii_case("IN") {
            continue;
        } else {
            record_type = Some(field.to_ascii_uppercase());
            break;
        }
    }

    let record_type = record_type.ok_or_else(|| {
        DomainError::InvalidRootHints(format!("line {}: missing record type", line_number))
    })?;

    let mut record = match record_type.as_str() {
        "NS" => DnsRecord::synthesized_ns(name, normalize(data)),
        "A" => {
            let addr: Ipv4Addr = data.parse().map_err(|_| {
                DomainError::InvalidRootHints(format!(
                    "line {}: invalid IPv4 address '{}'",
                    line_number, data
                ))
            })?;
            DnsRecord::synthesized_a(name, addr)
        }
        "AAAA" => return Ok(None),
        other => {
            return Err(DomainError::InvalidRootHints(format!(
                "line {}: unsupported record type {}",
                line_number, other
            )))
        }
    };

    record.ttl = ttl.unwrap_or(ROOT_TTL);
    Ok(Some(record))
}

fn normalize(name: &str) -> String {
    if name == "." {
        name.to_string()
    } else {
        name.trim_end_matches('.').to_ascii_lowercase()
    }
}
