use clap::Parser;
use iterdns_application::ports::DnsTransport;
use iterdns_infrastructure::dns::wire::{decode_response, MessageBuilder};
use iterdns_infrastructure::dns::UdpTransport;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Instant;

mod args;
mod output;

use args::ClientOptions;

const MAX_PACKET_SIZE: usize = 512;

#[derive(Parser)]
#[command(name = "iterdns-client")]
#[command(version = "0.1.0")]
#[command(about = "Send one DNS query to a resolver and print the reply")]
struct Cli {
    /// Resolver IPv4 address
    #[arg(value_name = "RESOLVER_IP")]
    resolver_ip: Ipv4Addr,

    /// Resolver UDP port
    #[arg(value_name = "PORT")]
    port: u16,

    /// Domain name to look up
    #[arg(value_name = "DOMAIN")]
    domain: String,

    /// Query type (A, NS, CNAME, MX, PTR) and/or timeout in seconds, in either order
    #[arg(value_name = "TYPE|TIMEOUT")]
    extra: Vec<String>,

    /// Clear the RD bit in the query
    #[arg(long)]
    no_recursion: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = run(&cli).await {
        println!("{}", output::error_line(&e));
    }
    Ok(())
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let options = ClientOptions::from_args(&cli.extra)?;

    println!("DNSClient sending request for {}", cli.domain);
    println!("Server: {}", cli.resolver_ip);
    println!("Request type: {}", options.query_type);

    let query = MessageBuilder::build_query(&cli.domain, options.query_type, !cli.no_recursion)?;
    let server = SocketAddr::new(IpAddr::V4(cli.resolver_ip), cli.port);
    let transport = UdpTransport::new(MAX_PACKET_SIZE);

    let start = Instant::now();
    let reply = transport.send(&query, server, options.timeout).await?;
    println!("Response received after {} ms", start.elapsed().as_millis());

    let message = decode_response(&reply, MAX_PACKET_SIZE)?;
    let lines = output::render_response(&message).map_err(anyhow::Error::msg)?;
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}
