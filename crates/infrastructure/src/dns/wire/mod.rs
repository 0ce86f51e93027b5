//! RFC 1035 wire format restricted to A, NS, CNAME, MX and PTR; every other
//! record type is carried as opaque bytes.

pub mod message_builder;
pub mod message_parser;
mod name;

pub use message_builder::MessageBuilder;
pub use message_parser::{decode_message, decode_request, decode_response};
pub use name::{MAX_LABEL_LEN, MAX_NAME_LEN, MAX_POINTER_JUMPS};
