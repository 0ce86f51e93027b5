use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed DNS message: {0}")]
    MalformedMessage(String),

    #[error("Invalid response from server: message is not a response")]
    NotAResponse,

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("All servers in the server list timed out")]
    SlistTimeout,

    #[error("Resolution exceeded the maximum nesting depth of {0}")]
    RecursionLimit(usize),

    #[error("Resolution followed more than {0} referrals")]
    ReferralLimit(usize),

    #[error("DNS response ID mismatch: expected {expected:#06x}, received {received:#06x}")]
    ResponseIdMismatch { expected: u16, received: u16 },

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Invalid root hints: {0}")]
    InvalidRootHints(String),
}

impl DomainError {
    /// True for failures that only disqualify the server that produced them.
    pub fn is_candidate_failure(&self) -> bool {
        matches!(
            self,
            DomainError::MalformedMessage(_)
                | DomainError::NotAResponse
                | DomainError::ResponseIdMismatch { .. }
                | DomainError::TransportTimeout { .. }
                | DomainError::TransportConnectionRefused { .. }
                | DomainError::IoError(_)
        )
    }
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::IoError(e.to_string())
    }
}
