use clap::Parser;
use iterdns_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "iterdns-resolver")]
#[command(version = "0.1.0")]
#[command(about = "Iterative DNS resolver that walks the delegation chain from the root servers")]
struct Cli {
    /// UDP port to listen on
    #[arg(value_name = "PORT")]
    port: Option<u16>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Root hints file (named.root format)
    #[arg(long, value_name = "FILE")]
    hints: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind.clone(),
        root_hints_path: cli.hints.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting iterdns resolver v{}", env!("CARGO_PKG_VERSION"));

    let root_hints = bootstrap::load_hints(&config)?;
    let services = di::DnsServices::new(&config, root_hints);

    server::start_dns_server(config.server.listen_address(), services.handler).await?;

    info!("Server shutdown complete");
    Ok(())
}
