use std::time::Duration;

use assert_json_diff::assert_json_eq;
use serde_json::json;

use crate::{
    client::Client,
    query::CanonicalParams,
    tests::{
        client::{resource_request, RecordingLogger},
        keys::{encrypt_for_client, foreign_keys, myinfo_token, sign_claims, test_config},
        test_http_client::TestHttpReqRes,
    },
    types::{ClientConfig, MyInfoClientError, ResourcePayload, ResponseFormat},
};

const RESOURCE_URL: &str = "https://api.myinfo.example/biz/v2/entity-person/U1/X2";

fn params() -> CanonicalParams {
    [("client_id", "c1"), ("attributes", "email,name")]
        .into_iter()
        .collect()
}

#[tokio::test]
async fn returns_encrypted_body_untouched() {
    let envelope = encrypt_for_client("a.b.c");

    let http_client = resource_request(
        &format!("{RESOURCE_URL}?attributes=email%2Cname&client_id=c1"),
        "at1",
        envelope.clone(),
    )
    .build();

    let client = Client::new(test_config()).unwrap();

    let payload = client
        .fetch_resource_async(&http_client, RESOURCE_URL, &params(), "at1")
        .await
        .unwrap();

    assert_eq!(ResourcePayload::Encrypted(envelope), payload);
    http_client.assert();
}

#[tokio::test]
async fn signs_the_url_that_is_sent() {
    let envelope = encrypt_for_client("a.b.c");

    let http_client = resource_request(
        &format!("{RESOURCE_URL}?attributes=email%2Cname&client_id=c1"),
        "at1",
        envelope.clone(),
    )
    .assert_request_timeout(Duration::from_millis(2500))
    .build();

    let client = Client::new(ClientConfig {
        timeout: Some(Duration::from_millis(2500)),
        ..test_config()
    })
    .unwrap();

    let payload = client
        .fetch_resource_async(
            &http_client,
            "https://API.MyInfo.Example:443/biz/v2/entity-person/U1/X2",
            &params(),
            "at1",
        )
        .await
        .unwrap();

    assert_eq!(ResourcePayload::Encrypted(envelope), payload);
    http_client.assert();
}

#[tokio::test]
async fn opens_payload_on_a_blocking_pool() {
    let inner = myinfo_token(json!({ "name": { "value": "TAN XIAO HUI" } }));
    let envelope = encrypt_for_client(&inner);

    let client = Client::new(test_config()).unwrap();

    let claims = tokio::task::spawn_blocking(move || {
        let inner = client.decrypt_envelope(&envelope)?;
        Ok::<_, Box<MyInfoClientError>>(client.verify(&inner))
    })
    .await
    .unwrap()
    .unwrap()
    .unwrap();

    assert_eq!(
        Some(&json!({ "value": "TAN XIAO HUI" })),
        claims.claim("name")
    );
}

#[tokio::test]
async fn parses_plain_body() {
    let http_client = resource_request(
        &format!("{RESOURCE_URL}?attributes=email%2Cname&client_id=c1"),
        "at1",
        r#"{"name":{"value":"TAN XIAO HUI"}}"#,
    )
    .build();

    let client = Client::new(ClientConfig {
        response_format: ResponseFormat::Plain,
        ..test_config()
    })
    .unwrap();

    let payload = client
        .fetch_resource_async(&http_client, RESOURCE_URL, &params(), "at1")
        .await
        .unwrap();

    let ResourcePayload::Plain(body) = payload else {
        panic!("expected a plain payload");
    };

    assert_json_eq!(json!({ "name": { "value": "TAN XIAO HUI" } }), body);
}

#[tokio::test]
async fn plain_body_must_be_json() {
    let http_client = resource_request(
        &format!("{RESOURCE_URL}?attributes=email%2Cname&client_id=c1"),
        "at1",
        "not json",
    )
    .build();

    let client = Client::new(ClientConfig {
        response_format: ResponseFormat::Plain,
        ..test_config()
    })
    .unwrap();

    let err = client
        .fetch_resource_async(&http_client, RESOURCE_URL, &params(), "at1")
        .await
        .unwrap_err();

    assert!(matches!(*err, MyInfoClientError::ResponseFormat { .. }));
}

#[tokio::test]
async fn empty_body_is_a_response_format_error() {
    let http_client = TestHttpReqRes {
        response_body: None,
        ..resource_request(
            &format!("{RESOURCE_URL}?attributes=email%2Cname&client_id=c1"),
            "at1",
            "",
        )
    }
    .build();

    let client = Client::new(test_config()).unwrap();

    let err = client
        .fetch_resource_async(&http_client, RESOURCE_URL, &params(), "at1")
        .await
        .unwrap_err();

    assert!(matches!(*err, MyInfoClientError::ResponseFormat { .. }));
}

#[tokio::test]
async fn server_error_is_a_network_error() {
    let http_client = resource_request(
        &format!("{RESOURCE_URL}?attributes=email%2Cname&client_id=c1"),
        "at1",
        r#"{"code":500}"#,
    )
    .set_response_status_code(500)
    .build();

    let client = Client::new(test_config()).unwrap();

    let err = client
        .fetch_resource_async(&http_client, RESOURCE_URL, &params(), "at1")
        .await
        .unwrap_err();

    assert!(matches!(*err, MyInfoClientError::Network { .. }));
    assert!(err.is_retryable());
}

#[test]
fn decrypts_and_verifies_payload() {
    let inner = myinfo_token(json!({ "name": { "value": "TAN XIAO HUI" } }));
    let envelope = encrypt_for_client(&inner);

    let client = Client::new(test_config()).unwrap();

    assert_eq!(inner, client.decrypt_envelope(&envelope).unwrap());

    let claims = client
        .open_payload(ResourcePayload::Encrypted(envelope))
        .unwrap()
        .unwrap();

    assert_eq!(
        Some(&json!({ "value": "TAN XIAO HUI" })),
        claims.claim("name")
    );
}

#[test]
fn unverifiable_payload_is_none_and_logged() {
    let inner = sign_claims(json!({ "sub": "U1_X2" }), &foreign_keys().private_pem);

    let logger = RecordingLogger::default();
    let client = Client::new(test_config())
        .unwrap()
        .with_logger(logger.clone());

    let opened = client
        .open_payload(ResourcePayload::Encrypted(encrypt_for_client(&inner)))
        .unwrap();

    assert!(opened.is_none());
    assert_eq!(1, logger.messages("warn").len());
}

#[test]
fn undecryptable_payload_is_an_error() {
    let client = Client::new(ClientConfig {
        client_private_key: foreign_keys().private_pem.clone(),
        ..test_config()
    })
    .unwrap();

    let err = client
        .open_payload(ResourcePayload::Encrypted(encrypt_for_client("a.b.c")))
        .unwrap_err();

    assert!(matches!(*err, MyInfoClientError::Decryption(_)));
}

#[test]
fn plain_payload_must_be_an_object() {
    let client = Client::new(test_config()).unwrap();

    let claims = client
        .open_payload(ResourcePayload::Plain(json!({ "uinfin": "S1234567A" })))
        .unwrap()
        .unwrap();
    assert_eq!(Some(&json!("S1234567A")), claims.claim("uinfin"));

    let err = client
        .open_payload(ResourcePayload::Plain(json!(["S1234567A"])))
        .unwrap_err();
    assert!(matches!(*err, MyInfoClientError::ResponseFormat { .. }));
}
