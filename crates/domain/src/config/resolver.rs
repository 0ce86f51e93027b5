use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Smallest buffer that can hold a header and a one-label question.
pub const MIN_MESSAGE_SIZE: usize = 17;

/// Tunables of the iterative resolution engine.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Root hints file in `named.root` format. The built-in root server list
    /// is used when the file does not exist.
    #[serde(default = "default_root_hints_path")]
    pub root_hints_path: String,

    /// Per-server wait for a reply, in milliseconds.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    #[serde(default = "default_upstream_port")]
    pub upstream_port: u16,

    /// Receive buffer size and truncation limit for every message.
    #[serde(default = "default_max_packet_size")]
    pub max_packet_size: usize,

    /// Maximum nesting of CNAME chases and nameserver address lookups.
    #[serde(default = "default_max_recursion_depth")]
    pub max_recursion_depth: usize,

    /// Referrals followed by one search before it gives up.
    #[serde(default = "default_max_referrals")]
    pub max_referrals: usize,

    /// How many times a client request is restarted after every server of a
    /// list timed out.
    #[serde(default = "default_client_retries")]
    pub client_retries: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_hints_path: default_root_hints_path(),
            query_timeout_ms: default_query_timeout_ms(),
            upstream_port: default_upstream_port(),
            max_packet_size: default_max_packet_size(),
            max_recursion_depth: default_max_recursion_depth(),
            max_referrals: default_max_referrals(),
            client_retries: default_client_retries(),
        }
    }
}

impl ResolverConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

fn default_root_hints_path() -> String {
    "./named.root".to_string()
}

fn default_query_timeout_ms() -> u64 {
    500
}

fn default_upstream_port() -> u16 {
    53
}

fn default_max_packet_size() -> usize {
    512
}

fn default_max_recursion_depth() -> usize {
    8
}

fn default_max_referrals() -> usize {
    16
}

fn default_client_retries() -> u32 {
    1
}
