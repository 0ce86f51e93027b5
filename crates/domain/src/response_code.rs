use std::fmt;

/// Classification of the 4-bit RCODE carried in a DNS header (RFC 1035 §4.1.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseOutcome {
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    /// RCODE 6-15, which this resolver does not interpret.
    Unrecognized(u8),
}

impl ResponseOutcome {
    pub fn from_rcode(rcode: u8) -> Self {
        match rcode & 0x0F {
            0 => ResponseOutcome::NoError,
            1 => ResponseOutcome::FormatError,
            2 => ResponseOutcome::ServerFailure,
            3 => ResponseOutcome::NameError,
            4 => ResponseOutcome::NotImplemented,
            5 => ResponseOutcome::Refused,
            other => ResponseOutcome::Unrecognized(other),
        }
    }

    pub fn rcode(&self) -> u8 {
        match self {
            ResponseOutcome::NoError => 0,
            ResponseOutcome::FormatError => 1,
            ResponseOutcome::ServerFailure => 2,
            ResponseOutcome::NameError => 3,
            ResponseOutcome::NotImplemented => 4,
            ResponseOutcome::Refused => 5,
            ResponseOutcome::Unrecognized(code) => *code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseOutcome::NoError)
    }

    /// Failures reported by a server that answered authoritatively about the
    /// query itself; asking another server will not change the outcome.
    pub fn is_final_failure(&self) -> bool {
        matches!(
            self,
            ResponseOutcome::FormatError
                | ResponseOutcome::NameError
                | ResponseOutcome::NotImplemented
                | ResponseOutcome::Refused
                | ResponseOutcome::Unrecognized(_)
        )
    }

    pub fn as_status(&self) -> &'static str {
        match self {
            ResponseOutcome::NoError => "NOERROR",
            ResponseOutcome::FormatError => "FORMERR",
            ResponseOutcome::ServerFailure => "SERVFAIL",
            ResponseOutcome::NameError => "NXDOMAIN",
            ResponseOutcome::NotImplemented => "NOTIMP",
            ResponseOutcome::Refused => "REFUSED",
            ResponseOutcome::Unrecognized(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ResponseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseOutcome::NoError => write!(f, "No error"),
            ResponseOutcome::FormatError => write!(
                f,
                "Format error: the name server was unable to interpret the query"
            ),
            ResponseOutcome::ServerFailure => write!(
                f,
                "Server failure: the name server was unable to process this query due to a problem with the name server"
            ),
            ResponseOutcome::NameError => write!(
                f,
                "Name error: the domain name referenced in the query does not exist"
            ),
            ResponseOutcome::NotImplemented => write!(
                f,
                "Not implemented: the name server does not support the requested kind of query"
            ),
            ResponseOutcome::Refused => write!(
                f,
                "Refused: the name server refuses to perform the requested operation for policy reasons"
            ),
            ResponseOutcome::Unrecognized(code) => {
                write!(f, "Unrecognized response code {}", code)
            }
        }
    }
}
