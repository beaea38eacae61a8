//! Route 53 API calls against a local responder

use r53u_core::traits::DnsProvider;
use r53u_core::{Credentials, Error, RecordRequest, ZoneHandle};
use r53u_provider_route53::Route53Provider;
use r53u_test_support::{Canned, serve};

const LIST_ONE_ZONE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListHostedZonesByNameResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <HostedZones>
    <HostedZone>
      <Id>/hostedzone/Z1D633PJN98FT9</Id>
      <Name>example.com.</Name>
      <CallerReference>2014-04-01-18:47</CallerReference>
      <ResourceRecordSetCount>17</ResourceRecordSetCount>
    </HostedZone>
  </HostedZones>
  <DNSName>example.com.</DNSName>
  <IsTruncated>false</IsTruncated>
  <MaxItems>1</MaxItems>
</ListHostedZonesByNameResponse>"#;

const CHANGE_ACCEPTED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ChangeResourceRecordSetsResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <ChangeInfo>
    <Id>/change/C2682N5HXP0BZ4</Id>
    <Status>PENDING</Status>
    <SubmittedAt>2017-03-10T01:36:41.958Z</SubmittedAt>
  </ChangeInfo>
</ChangeResourceRecordSetsResponse>"#;

fn provider(base: &str) -> Route53Provider {
    Route53Provider::new(
        Credentials::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY"),
        base,
    )
    .expect("provider builds")
}

fn www_record(value: &str) -> RecordRequest {
    RecordRequest::new(
        "example.com.",
        "www.example.com.",
        Some("A".to_string()),
        value,
        300,
    )
    .unwrap()
}

#[tokio::test]
async fn zone_lookup_sends_signed_query() {
    let (base, server) = serve(vec![Canned::xml(200, LIST_ONE_ZONE)]).await;

    let zone = provider(&base).find_zone("example.com").await.expect("zone found");
    assert_eq!(zone.zone_id, "Z1D633PJN98FT9");
    assert_eq!(zone.zone_name, "example.com");

    let requests = server.await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert!(request.starts_with("GET /2013-04-01/hostedzonesbyname?"));
    let request_line = request.lines().next().unwrap();
    assert!(request_line.contains("dnsname=example.com"));
    assert!(request_line.contains("maxitems=1"));

    let lower = request.to_ascii_lowercase();
    assert!(lower.contains("x-amz-date: "));
    assert!(lower.contains("authorization: aws4-hmac-sha256 credential=akidexample/"));
    assert!(lower.contains("/us-east-1/route53/aws4_request"));
    assert!(!request.contains("wJalrXUtnFEMI"));
}

#[tokio::test]
async fn zone_lookup_requires_exact_name() {
    // ListHostedZonesByName starts at the name, so a different zone may come back
    let other = LIST_ONE_ZONE.replace("<Name>example.com.</Name>", "<Name>example.org.</Name>");
    let (base, server) = serve(vec![Canned::xml(200, &other)]).await;

    let err = provider(&base)
        .find_zone("example.com.")
        .await
        .expect_err("no exact match");
    assert!(matches!(err, Error::NotFound(_)));
    assert!(err.to_string().contains("example.com."));

    server.await.unwrap();
}

#[tokio::test]
async fn upsert_posts_change_batch() {
    let (base, server) = serve(vec![Canned::xml(200, CHANGE_ACCEPTED)]).await;
    let zone = ZoneHandle::new("example.com.", "/hostedzone/Z1D633PJN98FT9");

    let change = provider(&base)
        .upsert_record(&zone, &www_record("203.0.113.5"))
        .await
        .expect("change accepted");
    assert_eq!(change.id, "C2682N5HXP0BZ4");
    assert_eq!(change.status, "PENDING");

    let requests = server.await.unwrap();
    let request = &requests[0];
    assert!(request.starts_with("POST /2013-04-01/hostedzone/Z1D633PJN98FT9/rrset"));
    assert!(
        request
            .to_ascii_lowercase()
            .contains("authorization: aws4-hmac-sha256 credential=akidexample/")
    );
    assert!(request.contains("<Action>UPSERT</Action>"));
    assert!(request.contains("<Name>www.example.com.</Name>"));
    assert!(request.contains("<Type>A</Type>"));
    assert!(request.contains("<TTL>300</TTL>"));
    assert!(request.contains("<Value>203.0.113.5</Value>"));
}

#[tokio::test]
async fn rejected_change_is_a_provider_error() {
    let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<ErrorResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <Error>
    <Type>Sender</Type>
    <Code>InvalidChangeBatch</Code>
    <Message>[Invalid Resource Record: FATAL problem: ARRDATAIllegalIPv4Address]</Message>
  </Error>
  <RequestId>b25f48e8-84fd-11e6-80d9-574e0c4664cb</RequestId>
</ErrorResponse>"#;
    let (base, server) = serve(vec![Canned::xml(400, body)]).await;
    let zone = ZoneHandle::new("example.com.", "Z1D633PJN98FT9");

    let err = provider(&base)
        .upsert_record(&zone, &www_record("not-an-ip"))
        .await
        .expect_err("change rejected");
    assert!(err.is_provider_error());
    assert!(matches!(err, Error::Provider { .. }));
    assert!(err.to_string().contains("InvalidChangeBatch"));
    assert!(err.to_string().contains("ARRDATAIllegalIPv4Address"));

    server.await.unwrap();
}

#[tokio::test]
async fn bad_signature_is_an_authentication_error() {
    let body = r#"<?xml version="1.0"?>
<ErrorResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <Error>
    <Type>Sender</Type>
    <Code>SignatureDoesNotMatch</Code>
    <Message>The request signature we calculated does not match</Message>
  </Error>
  <RequestId>4ff0e5e6-0d0f-11e7-8d3b-000000000000</RequestId>
</ErrorResponse>"#;
    let (base, server) = serve(vec![Canned::xml(403, body)]).await;

    let err = provider(&base)
        .find_zone("example.com.")
        .await
        .expect_err("forbidden");
    assert!(matches!(err, Error::Authentication(_)));
    assert!(err.to_string().contains("SignatureDoesNotMatch"));

    server.await.unwrap();
}

#[tokio::test]
async fn dry_run_looks_up_zone_only() {
    let (base, server) = serve(vec![Canned::xml(200, LIST_ONE_ZONE)]).await;
    let provider = provider(&base).with_dry_run(true);

    let zone = provider.find_zone("example.com.").await.expect("zone found");
    let change = provider
        .upsert_record(&zone, &www_record("203.0.113.5"))
        .await
        .expect("dry-run succeeds");
    assert_eq!(change.status, "DRY-RUN");

    // Only the zone lookup reached the API
    let requests = server.await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("GET "));
}
