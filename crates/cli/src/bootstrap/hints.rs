use anyhow::Context;
use iterdns_domain::{Config, DnsRecord};
use iterdns_infrastructure::dns::load_root_hints;
use std::path::Path;
use tracing::info;

pub fn load_hints(config: &Config) -> anyhow::Result<Vec<DnsRecord>> {
    let path = Path::new(&config.resolver.root_hints_path);
    let hints = load_root_hints(path)
        .with_context(|| format!("loading root hints from {}", path.display()))?;

    info!(
        path = %path.display(),
        servers = hints.iter().filter(|r| r.address().is_some()).count(),
        "Root hints loaded"
    );
    Ok(hints)
}
