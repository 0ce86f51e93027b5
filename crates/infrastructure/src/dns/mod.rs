pub mod resolver;
pub mod root_hints;
pub mod server;
pub mod transport;
pub mod wire;

pub use resolver::IterativeResolver;
pub use root_hints::{builtin_root_hints, load_root_hints, parse_root_hints};
pub use server::DnsServerHandler;
pub use transport::UdpTransport;
