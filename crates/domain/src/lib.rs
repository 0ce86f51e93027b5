//! iterdns domain layer: wire-level value types, response outcomes, errors and configuration.
pub mod config;
pub mod dns_record;
pub mod dns_request;
pub mod errors;
pub mod message;
pub mod response_code;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_record::{DnsRecord, QueryType, RecordData};
pub use dns_request::DnsRequest;
pub use errors::DomainError;
pub use message::{Message, Question};
pub use response_code::ResponseOutcome;
