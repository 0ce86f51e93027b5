mod address_lookup;
mod dns_resolver;
mod dns_transport;

pub use address_lookup::AddressLookup;
pub use dns_resolver::{DnsResolution, DnsResolver};
pub use dns_transport::DnsTransport;
