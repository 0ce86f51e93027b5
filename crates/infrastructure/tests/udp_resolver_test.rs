mod helpers;

use helpers::{MockAddressLookup, MockDnsServer};
use iterdns_application::ports::DnsResolver;
use iterdns_domain::config::ResolverConfig;
use iterdns_domain::{DnsRecord, DnsRequest, DomainError, QueryType, ResponseOutcome};
use iterdns_infrastructure::dns::wire::decode_response;
use iterdns_infrastructure::dns::{IterativeResolver, UdpTransport};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

fn local_root() -> Vec<DnsRecord> {
    vec![
        DnsRecord::synthesized_ns(".", "localhost"),
        DnsRecord::synthesized_a("localhost", Ipv4Addr::LOCALHOST),
    ]
}

#[tokio::test]
async fn test_resolves_over_udp() {
    let server = MockDnsServer::start(Ipv4Addr::new(192, 0, 2, 10)).await.unwrap();

    let config = ResolverConfig {
        upstream_port: server.addr().port(),
        query_timeout_ms: 1000,
        ..ResolverConfig::default()
    };
    let resolver = IterativeResolver::new(
        Arc::new(UdpTransport::new(config.max_packet_size)),
        Arc::new(MockAddressLookup::new()),
        local_root(),
        config,
    );

    let request = DnsRequest::new(
        0x5151,
        "host.example.org",
        QueryType::A,
        IpAddr::V4(Ipv4Addr::LOCALHOST),
    );
    let resolution = resolver.resolve(&request).await.unwrap();

    assert_eq!(resolution.outcome, ResponseOutcome::NoError);
    assert_eq!(resolution.upstream_server, Some(server.addr()));

    let message = decode_response(&resolution.response, 512).unwrap();
    assert_eq!(message.id, 0x5151);
    assert_eq!(message.answers[0].address(), Some(Ipv4Addr::new(192, 0, 2, 10)));
}

#[tokio::test]
async fn test_stopped_server_is_slist_timeout() {
    let server = MockDnsServer::start(Ipv4Addr::new(192, 0, 2, 10)).await.unwrap();
    let port = server.addr().port();
    drop(server);
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let config = ResolverConfig {
        upstream_port: port,
        query_timeout_ms: 200,
        ..ResolverConfig::default()
    };
    let resolver = IterativeResolver::new(
        Arc::new(UdpTransport::new(config.max_packet_size)),
        Arc::new(MockAddressLookup::new()),
        local_root(),
        config,
    );

    let request = DnsRequest::new(
        1,
        "host.example.org",
        QueryType::A,
        IpAddr::V4(Ipv4Addr::LOCALHOST),
    );
    assert_eq!(
        resolver.resolve(&request).await.unwrap_err(),
        DomainError::SlistTimeout
    );
}
