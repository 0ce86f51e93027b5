mod helpers;

use helpers::MockDnsResolver;
use iterdns_application::{ports::DnsResolution, use_cases::HandleDnsQueryUseCase};
use iterdns_domain::{DnsRequest, DomainError, QueryType, ResponseOutcome};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

const CLIENT_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));

fn request() -> DnsRequest {
    DnsRequest::new(0x1234, "example.com", QueryType::A, CLIENT_IP)
}

fn noerror() -> DnsResolution {
    DnsResolution::new(vec![0x12, 0x34, 0x80, 0x00], ResponseOutcome::NoError, 1)
}

#[tokio::test]
async fn test_execute_returns_resolution() {
    let resolver = Arc::new(MockDnsResolver::new());
    resolver.push_result(Ok(noerror()));

    let use_case = HandleDnsQueryUseCase::new(resolver.clone());
    let resolution = use_case.execute(&request()).await.unwrap();

    assert_eq!(resolution.outcome, ResponseOutcome::NoError);
    assert_eq!(resolution.answer_count, 1);
    assert_eq!(resolver.calls(), 1);
}

#[tokio::test]
async fn test_execute_retries_after_slist_timeout() {
    let resolver = Arc::new(MockDnsResolver::new());
    resolver.push_result(Err(DomainError::SlistTimeout));
    resolver.push_result(Ok(noerror()));

    let use_case = HandleDnsQueryUseCase::new(resolver.clone()).with_retries(1);
    let result = use_case.execute(&request()).await;

    assert!(result.is_ok());
    assert_eq!(resolver.calls(), 2);
}

#[tokio::test]
async fn test_execute_gives_up_after_retries() {
    let resolver = Arc::new(MockDnsResolver::new());
    for _ in 0..3 {
        resolver.push_result(Err(DomainError::SlistTimeout));
    }

    let use_case = HandleDnsQueryUseCase::new(resolver.clone()).with_retries(2);
    let result = use_case.execute(&request()).await;

    assert_eq!(result.unwrap_err(), DomainError::SlistTimeout);
    assert_eq!(resolver.calls(), 3);
}

#[tokio::test]
async fn test_execute_does_not_retry_without_budget() {
    let resolver = Arc::new(MockDnsResolver::new());
    resolver.push_result(Err(DomainError::SlistTimeout));
    resolver.push_result(Ok(noerror()));

    let use_case = HandleDnsQueryUseCase::new(resolver.clone());
    let result = use_case.execute(&request()).await;

    assert_eq!(result.unwrap_err(), DomainError::SlistTimeout);
    assert_eq!(resolver.calls(), 1);
}

#[tokio::test]
async fn test_execute_does_not_retry_other_errors() {
    let resolver = Arc::new(MockDnsResolver::new());
    resolver.push_result(Err(DomainError::RecursionLimit(8)));
    resolver.push_result(Ok(noerror()));

    let use_case = HandleDnsQueryUseCase::new(resolver.clone()).with_retries(3);
    let result = use_case.execute(&request()).await;

    assert_eq!(result.unwrap_err(), DomainError::RecursionLimit(8));
    assert_eq!(resolver.calls(), 1);
}
