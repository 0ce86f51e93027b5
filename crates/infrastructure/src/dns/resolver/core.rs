use super::slist::ServerList;
use super::splice::splice_chased_answer;
use crate::dns::wire::{decode_request, decode_response, MessageBuilder};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use iterdns_application::ports::{AddressLookup, DnsResolution, DnsResolver, DnsTransport};
use iterdns_domain::config::ResolverConfig;
use iterdns_domain::{DnsRecord, DnsRequest, DomainError, Message, QueryType, ResponseOutcome};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The reply that ended a search, plus where it came from.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub packet: Vec<u8>,
    pub message: Message,
    pub server: SocketAddr,
    /// Alias followed to produce this reply, if any.
    pub cname: Option<String>,
}

/// Iterative resolver: walks the delegation chain from the root hints,
/// following referrals and CNAMEs, one server at a time.
pub struct IterativeResolver {
    transport: Arc<dyn DnsTransport>,
    address_lookup: Arc<dyn AddressLookup>,
    root_hints: Arc<Vec<DnsRecord>>,
    config: ResolverConfig,
}

impl IterativeResolver {
    pub fn new(
        transport: Arc<dyn DnsTransport>,
        address_lookup: Arc<dyn AddressLookup>,
        root_hints: Vec<DnsRecord>,
        config: ResolverConfig,
    ) -> Self {
        info!(
            root_servers = root_hints.iter().filter(|r| r.address().is_some()).count(),
            timeout_ms = config.query_timeout_ms,
            max_depth = config.max_recursion_depth,
            max_referrals = config.max_referrals,
            "Iterative resolver created"
        );

        Self {
            transport,
            address_lookup,
            root_hints: Arc::new(root_hints),
            config,
        }
    }

    /// Resolves the query in `packet` starting from the root hints. Nested
    /// lookups (CNAME chases, nameserver addresses) run at `depth + 1`.
    pub fn resolve_packet(
        &self,
        packet: Vec<u8>,
        depth: usize,
    ) -> BoxFuture<'_, Result<Resolved, DomainError>> {
        async move {
            if depth > self.config.max_recursion_depth {
                return Err(DomainError::RecursionLimit(self.config.max_recursion_depth));
            }

            let query = decode_request(&packet)?;
            let domain = query.question.name.as_str();
            let mut slist = ServerList::new(self.root_hints.as_ref().clone());
            let mut referrals = 0;
            let mut server_failure: Option<Resolved> = None;

            loop {
                let reply = match self.query_servers(&packet, &mut slist).await {
                    Ok(reply) => reply,
                    Err(DomainError::SlistTimeout) => match server_failure.take() {
                        Some(kept) => {
                            warn!(
                                domain = %domain,
                                server = %kept.server,
                                "Remaining servers timed out, returning server failure"
                            );
                            return Ok(kept);
                        }
                        None => return Err(DomainError::SlistTimeout),
                    },
                    Err(e) => return Err(e),
                };
                let outcome = reply.message.outcome();

                if outcome.is_final_failure() {
                    debug!(
                        domain = %domain,
                        server = %reply.server,
                        status = outcome.as_status(),
                        "Final error response"
                    );
                    return Ok(reply);
                }

                if outcome == ResponseOutcome::ServerFailure {
                    if slist.has_remaining() {
                        warn!(domain = %domain, server = %reply.server, "Server failure, trying next server");
                        server_failure = Some(reply);
                        continue;
                    }
                    return Ok(reply);
                }

                if reply.message.an_count > 0 {
                    if query.question.query_type == QueryType::CNAME {
                        return Ok(reply);
                    }
                    let alias = reply
                        .message
                        .first_answer_of(QueryType::CNAME)
                        .and_then(DnsRecord::target)
                        .map(str::to_string);
                    return match alias {
                        Some(alias) => self.chase_cname(&packet, &query, alias, depth).await,
                        None => Ok(reply),
                    };
                }

                if reply.message.ns_count > 0 {
                    if reply.message.has_opaque_authority() {
                        return Ok(reply);
                    }

                    referrals += 1;
                    if referrals > self.config.max_referrals {
                        warn!(
                            domain = %domain,
                            from = %reply.server,
                            max_referrals = self.config.max_referrals,
                            "Referral limit reached"
                        );
                        return Err(DomainError::ReferralLimit(self.config.max_referrals));
                    }

                    slist = ServerList::new(self.referral_servers(&reply.message, depth).await?);
                    server_failure = None;
                    debug!(
                        domain = %domain,
                        from = %reply.server,
                        candidates = slist.candidate_count(),
                        referral = referrals,
                        "Following referral"
                    );
                    continue;
                }

                return Ok(reply);
            }
        }
        .boxed()
    }

    /// Sends `packet` to each candidate in turn. The first reply that decodes
    /// as a response wins.
    async fn query_servers(
        &self,
        packet: &[u8],
        slist: &mut ServerList,
    ) -> Result<Resolved, DomainError> {
        let timeout = self.config.query_timeout();

        while let Some((record, addr)) = slist.next_candidate() {
            let server = SocketAddr::new(IpAddr::V4(addr), self.config.upstream_port);
            debug!(server = %server, nameserver = %record.name, "Querying nameserver");

            let result = self
                .transport
                .send(packet, server, timeout)
                .await
                .and_then(|bytes| {
                    let message = decode_response(&bytes, self.config.max_packet_size)?;
                    Ok((bytes, message))
                });

            match result {
                Ok((bytes, message)) => {
                    debug!(
                        server = %server,
                        rcode = message.rcode,
                        records = message.record_count(),
                        truncated = message.tc,
                        "Reply received"
                    );
                    return Ok(Resolved {
                        packet: bytes,
                        message,
                        server,
                        cname: None,
                    });
                }
                Err(e) if e.is_candidate_failure() => {
                    warn!(server = %server, error = %e, "Nameserver failed, trying next");
                }
                Err(e) => return Err(e),
            }
        }

        Err(DomainError::SlistTimeout)
    }

    async fn chase_cname(
        &self,
        packet: &[u8],
        query: &Message,
        alias: String,
        depth: usize,
    ) -> Result<Resolved, DomainError> {
        info!(domain = %query.question.name, alias = %alias, "Chasing CNAME");

        let chase =
            MessageBuilder::build_query_for_type_code(&alias, query.question.type_code, false)?;
        let chased = self.resolve_packet(chase, depth + 1).await?;

        let spliced = splice_chased_answer(
            packet,
            query.answer_start,
            &chased.packet,
            &chased.message,
            self.config.max_packet_size,
        )?;
        let message = decode_response(&spliced, self.config.max_packet_size)?;

        Ok(Resolved {
            packet: spliced,
            message,
            server: chased.server,
            cname: Some(alias),
        })
    }

    /// Next server list for a referral: its glue, or else the address of the
    /// first authority nameserver that can be resolved.
    async fn referral_servers(
        &self,
        referral: &Message,
        depth: usize,
    ) -> Result<Vec<DnsRecord>, DomainError> {
        let glue: Vec<DnsRecord> = referral.glue_addresses().cloned().collect();
        if !glue.is_empty() {
            return Ok(glue);
        }

        for nameserver in referral
            .authorities
            .iter()
            .filter(|record| record.record_type == QueryType::NS)
            .filter_map(DnsRecord::target)
        {
            if let Some(addr) = self.nameserver_address(nameserver, depth).await? {
                return Ok(vec![DnsRecord::synthesized_a(nameserver, addr)]);
            }
        }

        warn!(zone = ?referral.authorities.first().map(|r| &r.name), "No reachable nameserver in referral");
        Ok(Vec::new())
    }

    async fn nameserver_address(
        &self,
        nameserver: &str,
        depth: usize,
    ) -> Result<Option<Ipv4Addr>, DomainError> {
        debug!(nameserver = %nameserver, "Referral without glue, resolving nameserver");

        match MessageBuilder::build_query(nameserver, QueryType::A, false) {
            Ok(query) => match self.resolve_packet(query, depth + 1).await {
                Ok(resolved) => {
                    if let Some(addr) = resolved.message.answers.iter().find_map(|r| r.address()) {
                        return Ok(Some(addr));
                    }
                }
                Err(e @ DomainError::RecursionLimit(_)) => return Err(e),
                Err(e) => {
                    debug!(nameserver = %nameserver, error = %e, "Iterative nameserver lookup failed");
                }
            },
            Err(e) => {
                warn!(nameserver = %nameserver, error = %e, "Unusable nameserver name");
                return Ok(None);
            }
        }

        match self.address_lookup.lookup_ipv4(nameserver).await {
            Ok(addr) => Ok(addr),
            Err(e) => {
                warn!(nameserver = %nameserver, error = %e, "Address lookup failed");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl DnsResolver for IterativeResolver {
    async fn resolve(&self, request: &DnsRequest) -> Result<DnsResolution, DomainError> {
        debug!(
            domain = %request.domain,
            record_type = %request.query_type,
            "Starting iterative resolution"
        );

        let packet = match &request.packet {
            Some(packet) => packet.to_vec(),
            None => MessageBuilder::build_query_for_id(
                request.id,
                &request.domain,
                request.query_type,
                request.recursion_desired,
            )?,
        };

        let resolved = self.resolve_packet(packet, 0).await?;
        let mut resolution = DnsResolution::new(
            resolved.packet,
            resolved.message.outcome(),
            resolved.message.an_count,
        )
        .with_upstream(resolved.server);
        if let Some(alias) = resolved.cname {
            resolution = resolution.with_cname(alias);
        }
        Ok(resolution)
    }
}
