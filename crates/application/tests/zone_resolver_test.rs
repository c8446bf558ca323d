mod helpers;

use helpers::MockTxtResolver;
use std::sync::Arc;
use txtdirect_application::use_cases::{UpstreamResolver, ZoneResolver};
use txtdirect_application::ResponseSink;
use txtdirect_domain::{Config, DomainError, RedirectRequest, ResolutionContext};

fn zone_resolver(txt: &MockTxtResolver) -> Arc<ZoneResolver> {
    Arc::new(ZoneResolver::new(
        Arc::new(txt.clone()),
        Arc::new(Config::default()),
    ))
}

fn request(host: &str) -> RedirectRequest {
    RedirectRequest::new("GET", host, "/")
}

#[tokio::test]
async fn test_apex_record_is_used_first() {
    let txt = MockTxtResolver::new().with_record("_redirect.example.com.", "to=https://apex.test");
    let resolver = zone_resolver(&txt);
    let mut ctx = ResolutionContext::new();
    let mut sink = ResponseSink::new();

    let record = resolver
        .resolve("example.com", &request("example.com"), &mut ctx, &mut sink)
        .await
        .unwrap();

    assert_eq!(record.to, "https://apex.test");
    assert_eq!(txt.queried(), vec!["_redirect.example.com."]);
    assert_eq!(ctx.records.len(), 1);
}

#[tokio::test]
async fn test_port_is_stripped_from_zone() {
    let txt = MockTxtResolver::new().with_record("_redirect.example.com.", "to=https://apex.test");
    let resolver = zone_resolver(&txt);
    let mut ctx = ResolutionContext::new();
    let mut sink = ResponseSink::new();

    resolver
        .resolve("example.com:8080", &request("example.com:8080"), &mut ctx, &mut sink)
        .await
        .unwrap();
    assert_eq!(txt.queried(), vec!["_redirect.example.com."]);
}

#[tokio::test]
async fn test_wildcard_lookup_order() {
    let txt = MockTxtResolver::new().with_record("_redirect._.b.c.", "to=https://wild.test");
    let resolver = zone_resolver(&txt);
    let mut ctx = ResolutionContext::new();
    let mut sink = ResponseSink::new();

    let record = resolver
        .resolve("a.b.c", &request("a.b.c"), &mut ctx, &mut sink)
        .await
        .unwrap();

    assert_eq!(record.to, "https://wild.test");
    assert_eq!(
        txt.queried(),
        vec!["_redirect.a.b.c.", "_redirect._.a.b.c.", "_redirect._.b.c."]
    );
}

#[tokio::test]
async fn test_apex_wildcard_skipped_once_records_exist() {
    let txt = MockTxtResolver::new().with_record("_redirect._.b.c.", "to=https://wild.test");
    let resolver = zone_resolver(&txt);
    let mut ctx = ResolutionContext::new();
    ctx.push(Default::default());
    let mut sink = ResponseSink::new();

    resolver
        .resolve("a.b.c", &request("a.b.c"), &mut ctx, &mut sink)
        .await
        .unwrap();

    assert_eq!(txt.queried(), vec!["_redirect.a.b.c.", "_redirect._.b.c."]);
}

#[tokio::test]
async fn test_empty_answer_falls_through_to_wildcard() {
    let txt = MockTxtResolver::new()
        .with_record("_redirect.a.example.com.", "")
        .with_record("_redirect._.example.com.", "to=https://wild.test");
    let resolver = zone_resolver(&txt);
    let mut ctx = ResolutionContext::new();
    ctx.push(Default::default());
    let mut sink = ResponseSink::new();

    let record = resolver
        .resolve("a.example.com", &request("a.example.com"), &mut ctx, &mut sink)
        .await
        .unwrap();
    assert_eq!(record.to, "https://wild.test");
}

#[tokio::test]
async fn test_two_txt_answers_are_a_hard_error() {
    let txt = MockTxtResolver::new();
    txt.set_records(
        "_redirect.example.com.",
        vec!["to=https://one.test", "to=https://two.test"],
    );
    let resolver = zone_resolver(&txt);
    let mut ctx = ResolutionContext::new();
    let mut sink = ResponseSink::new();

    let err = resolver
        .resolve("example.com", &request("example.com"), &mut ctx, &mut sink)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        DomainError::AmbiguousRecord {
            zone: "_redirect.example.com.".to_string(),
            count: 2
        }
    );
    assert!(!ctx.has_records());
}

#[tokio::test]
async fn test_exhausted_stages_fail() {
    let txt = MockTxtResolver::new();
    txt.set_error(
        "_redirect.example.com.",
        DomainError::DnsQuery {
            zone: "_redirect.example.com.".to_string(),
            reason: "timeout".to_string(),
        },
    );
    let resolver = zone_resolver(&txt);
    let mut ctx = ResolutionContext::new();
    let mut sink = ResponseSink::new();

    let err = resolver
        .resolve("example.com", &request("example.com"), &mut ctx, &mut sink)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::ResolutionExhausted("example.com".to_string()));
    assert_eq!(txt.query_count(), 3);
}

#[tokio::test]
async fn test_record_headers_are_applied_to_sink() {
    let txt = MockTxtResolver::new().with_record(
        "_redirect.example.com.",
        "to=https://apex.test;>X-Team=core;>X-Note=a%20b",
    );
    let resolver = zone_resolver(&txt);
    let mut ctx = ResolutionContext::new();
    let mut sink = ResponseSink::new();

    resolver
        .resolve("example.com", &request("example.com"), &mut ctx, &mut sink)
        .await
        .unwrap();

    assert_eq!(sink.header("X-Team"), Some("core"));
    assert_eq!(sink.header("X-Note"), Some("a b"));
    assert!(!sink.is_committed());
}

#[tokio::test]
async fn test_first_resolving_upstream_wins() {
    let txt = MockTxtResolver::new()
        .with_record(
            "_redirect.c.example.com.",
            "use=_redirect.up1.example.com;use=_redirect.up2.example.com;use=_redirect.up3.example.com",
        )
        .with_record("_redirect.up2.example.com.", "to=https://two.test")
        .with_record("_redirect.up3.example.com.", "to=https://three.test");
    let zones = zone_resolver(&txt);
    let upstream = UpstreamResolver::new(Arc::clone(&zones));
    let req = request("c.example.com");
    let mut ctx = ResolutionContext::new();
    let mut sink = ResponseSink::new();

    let mut record = zones
        .resolve("c.example.com", &req, &mut ctx, &mut sink)
        .await
        .unwrap();
    assert!(record.is_upstream_pointer());

    upstream
        .resolve(&mut record, &req, &mut ctx, &mut sink)
        .await
        .unwrap();

    assert_eq!(record.to, "https://two.test");
    assert_eq!(ctx.upstream_zone.as_deref(), Some("up2.example.com"));
    assert!(!txt.queried().contains(&"_redirect.up3.example.com.".to_string()));
}

#[tokio::test]
async fn test_upstream_exhausted() {
    let txt = MockTxtResolver::new().with_record(
        "_redirect.c.example.com.",
        "use=_redirect.missing.example.com",
    );
    let zones = zone_resolver(&txt);
    let upstream = UpstreamResolver::new(Arc::clone(&zones));
    let req = request("c.example.com");
    let mut ctx = ResolutionContext::new();
    let mut sink = ResponseSink::new();

    let mut record = zones
        .resolve("c.example.com", &req, &mut ctx, &mut sink)
        .await
        .unwrap();
    let err = upstream
        .resolve(&mut record, &req, &mut ctx, &mut sink)
        .await
        .unwrap_err();

    assert_eq!(err, DomainError::UpstreamExhausted);
    assert!(ctx.upstream_zone.is_none());
}

#[tokio::test]
async fn test_upstream_parse_rejection_is_not_skipped() {
    let txt = MockTxtResolver::new()
        .with_record(
            "_redirect.c.example.com.",
            "use=_redirect.up1.example.com;use=_redirect.up2.example.com",
        )
        .with_record("_redirect.up1.example.com.", "type=host;code=301")
        .with_record("_redirect.up2.example.com.", "to=https://two.test");
    let zones = zone_resolver(&txt);
    let upstream = UpstreamResolver::new(Arc::clone(&zones));
    let req = request("c.example.com");
    let mut ctx = ResolutionContext::new();
    let mut sink = ResponseSink::new();

    let mut record = zones
        .resolve("c.example.com", &req, &mut ctx, &mut sink)
        .await
        .unwrap();
    let err = upstream
        .resolve(&mut record, &req, &mut ctx, &mut sink)
        .await
        .unwrap_err();

    assert_eq!(err, DomainError::MissingTarget("host"));
    assert!(!txt.queried().contains(&"_redirect.up2.example.com.".to_string()));
}

#[tokio::test]
async fn test_upstream_zone_wildcard_stays_under_that_zone() {
    let txt = MockTxtResolver::new()
        .with_record("_redirect._.up.example.com.", "to=https://up-wild.test")
        .with_record("_redirect._.example.com.", "to=https://unrelated.test");
    let resolver = zone_resolver(&txt);
    let mut ctx = ResolutionContext::new();
    ctx.push(Default::default());
    let mut sink = ResponseSink::new();

    let record = resolver
        .resolve("_redirect.up.example.com", &request("c.example.com"), &mut ctx, &mut sink)
        .await
        .unwrap();

    assert_eq!(record.to, "https://up-wild.test");
    assert_eq!(
        txt.queried(),
        vec!["_redirect.up.example.com.", "_redirect._.up.example.com."]
    );
}
