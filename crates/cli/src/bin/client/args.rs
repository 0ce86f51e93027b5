use anyhow::bail;
use iterdns_domain::QueryType;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub query_type: QueryType,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            query_type: QueryType::A,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientOptions {
    /// Reads the optional TYPE and TIMEOUT arguments. Letters name a type,
    /// digits a timeout in seconds; each may appear once, in either order.
    pub fn from_args(args: &[String]) -> anyhow::Result<Self> {
        if args.len() > 2 {
            bail!("Incorrect number of input arguments");
        }

        let mut options = Self::default();
        let mut seen_type = false;
        let mut seen_timeout = false;

        for arg in args {
            if !arg.is_empty() && arg.chars().all(|c| c.is_ascii_alphabetic()) {
                if seen_type {
                    bail!("Query type given twice");
                }
                options.query_type = arg
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid query type '{}'", arg))?;
                seen_type = true;
            } else if !arg.is_empty() && arg.chars().all(|c| c.is_ascii_digit()) {
                if seen_timeout {
                    bail!("Timeout given twice");
                }
                options.timeout = Duration::from_secs(arg.parse()?);
                seen_timeout = true;
            } else {
                bail!("Unrecognized argument '{}'", arg);
            }
        }

        Ok(options)
    }
}
