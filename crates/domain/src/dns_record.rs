mod query_type;
mod record;

pub use query_type::QueryType;
pub use record::{DnsRecord, RecordData};
