use iterdns_application::use_cases::HandleDnsQueryUseCase;
use iterdns_domain::{Config, DnsRecord};
use iterdns_infrastructure::dns::{DnsServerHandler, IterativeResolver, UdpTransport};
use iterdns_infrastructure::system::SystemAddressLookup;
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub handler: DnsServerHandler,
}

impl DnsServices {
    pub fn new(config: &Config, root_hints: Vec<DnsRecord>) -> Self {
        info!("Initializing iterative resolution services");

        let transport = Arc::new(UdpTransport::new(config.resolver.max_packet_size));
        let address_lookup = Arc::new(SystemAddressLookup::new());

        let resolver = Arc::new(IterativeResolver::new(
            transport,
            address_lookup,
            root_hints,
            config.resolver.clone(),
        ));

        let use_case = Arc::new(
            HandleDnsQueryUseCase::new(resolver)
                .with_retries(config.resolver.client_retries),
        );

        Self {
            handler: DnsServerHandler::new(use_case),
        }
    }
}
