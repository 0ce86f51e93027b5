use std::fmt;
use std::str::FromStr;

/// Record and query types understood by the codec. Every other TYPE code
/// decodes to `Other` and its RDATA is never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    A,
    NS,
    CNAME,
    MX,
    PTR,
    Other,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::A => "A",
            QueryType::NS => "NS",
            QueryType::CNAME => "CNAME",
            QueryType::MX => "MX",
            QueryType::PTR => "PTR",
            QueryType::Other => "OTHER",
        }
    }

    /// Wire code used in an outgoing question. `Other` has no code of its own
    /// and is sent as MX.
    pub fn to_u16(&self) -> u16 {
        match self {
            QueryType::A => 1,
            QueryType::NS => 2,
            QueryType::CNAME => 5,
            QueryType::PTR => 12,
            QueryType::MX => 15,
            QueryType::Other => 15,
        }
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            1 => QueryType::A,
            2 => QueryType::NS,
            5 => QueryType::CNAME,
            12 => QueryType::PTR,
            15 => QueryType::MX,
            _ => QueryType::Other,
        }
    }

    /// True for types whose RDATA is a (possibly compressed) domain name.
    pub fn has_name_rdata(&self) -> bool {
        matches!(self, QueryType::NS | QueryType::CNAME | QueryType::PTR)
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QueryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(QueryType::A),
            "NS" => Ok(QueryType::NS),
            "CNAME" => Ok(QueryType::CNAME),
            "MX" => Ok(QueryType::MX),
            "PTR" => Ok(QueryType::PTR),
            _ => Err(format!("Unknown query type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_codes() {
        assert_eq!(QueryType::from_u16(1), QueryType::A);
        assert_eq!(QueryType::from_u16(2), QueryType::NS);
        assert_eq!(QueryType::from_u16(5), QueryType::CNAME);
        assert_eq!(QueryType::from_u16(12), QueryType::PTR);
        assert_eq!(QueryType::from_u16(15), QueryType::MX);
        assert_eq!(QueryType::from_u16(6), QueryType::Other);
        assert_eq!(QueryType::from_u16(28), QueryType::Other);
        assert_eq!(QueryType::from_u16(0x0101), QueryType::Other);
    }

    #[test]
    fn test_other_is_sent_as_mx() {
        assert_eq!(QueryType::Other.to_u16(), 15);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("ptr".parse::<QueryType>(), Ok(QueryType::PTR));
        assert_eq!("Mx".parse::<QueryType>(), Ok(QueryType::MX));
        assert!("AAAA".parse::<QueryType>().is_err());
    }
}
