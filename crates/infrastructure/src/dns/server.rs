use crate::dns::wire::{decode_request, MessageBuilder};
use iterdns_application::use_cases::HandleDnsQueryUseCase;
use iterdns_domain::{DnsRequest, ResponseOutcome};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Turns one client datagram into the datagram to send back.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Returns `None` for packets that cannot be answered at all.
    ///
    /// Resolution failures are answered with SERVFAIL built from the client's
    /// own header and question.
    pub async fn handle_packet(&self, packet: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        let query = match decode_request(packet) {
            Ok(query) => query,
            Err(e) => {
                warn!(client = %client, error = %e, "Dropping undecodable query");
                return None;
            }
        };

        let question = match MessageBuilder::question_only(packet, query.answer_start) {
            Ok(question) => question,
            Err(e) => {
                warn!(client = %client, error = %e, "Dropping undecodable query");
                return None;
            }
        };

        info!(
            domain = %query.question.name,
            record_type = %query.question.query_type,
            client = %client,
            "DNS query received"
        );

        let request = DnsRequest::new(
            query.id,
            query.question.name.as_str(),
            query.question.query_type,
            client.ip(),
        )
        .with_recursion_desired(query.rd)
        .with_packet(question.clone());

        match self.use_case.execute(&request).await {
            Ok(resolution) => Some(resolution.response.as_ref().clone()),
            Err(e) => {
                error!(domain = %query.question.name, error = %e, "Query resolution failed");
                match MessageBuilder::build_error_response(
                    &question,
                    question.len(),
                    ResponseOutcome::ServerFailure,
                ) {
                    Ok(reply) => Some(reply),
                    Err(e) => {
                        error!(error = %e, "Failed to build SERVFAIL response");
                        None
                    }
                }
            }
        }
    }
}
