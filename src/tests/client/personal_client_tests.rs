use serde_json::json;

use crate::{
    client::PersonalClient,
    tests::{
        client::{access_token, resource_request, token_request},
        keys::{encrypt_for_client, myinfo_token, test_config},
        test_http_client::TestHttpClient,
    },
    types::{ClientConfig, MyInfoClientError, ResourcePayload},
};

const PERSON_URL: &str = "https://api.myinfo.example/com/v3/person/S1234567A/";

fn personal_config() -> ClientConfig {
    ClientConfig {
        api_base_url: "https://api.myinfo.example/com/v3".to_string(),
        eservice_id: Some("MYINFO-CONSENTPLATFORM".to_string()),
        ..test_config()
    }
}

fn person_request(access_token: &str, body: impl Into<String>) -> TestHttpClient {
    resource_request(
        &format!("{PERSON_URL}?attributes=email%2Cname&client_id=c1&sp_esvcId=MYINFO-CONSENTPLATFORM"),
        access_token,
        body,
    )
    .build()
}

fn attributes() -> Vec<String> {
    vec!["email".to_string(), "name".to_string()]
}

#[tokio::test]
async fn gets_access_token() {
    let http_client = token_request(
        "https://api.myinfo.example/com/v3/token",
        "code1",
        None,
        r#"{"access_token":"at1","token_type":"Bearer"}"#,
    )
    .build();

    let client = PersonalClient::new(personal_config()).unwrap();

    let token = client
        .get_access_token_async(&http_client, "code1", None)
        .await
        .unwrap();

    assert_eq!("at1", token);
}

#[tokio::test]
async fn gets_person() {
    let access_token = access_token("S1234567A");
    let payload = myinfo_token(json!({
        "name": { "value": "TAN XIAO HUI" },
        "email": { "value": "myinfotesting@gmail.com" },
    }));

    let http_client = person_request(&access_token, encrypt_for_client(&payload));

    let client = PersonalClient::new(personal_config()).unwrap();

    let claims = client
        .get_person_async(&http_client, &access_token, &attributes())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        Some(&json!({ "value": "myinfotesting@gmail.com" })),
        claims.claim("email")
    );
    http_client.assert();
}

#[tokio::test]
async fn fetch_returns_the_raw_envelope() {
    let access_token = access_token("S1234567A");
    let envelope = encrypt_for_client("a.b.c");

    let http_client = person_request(&access_token, envelope.clone());

    let client = PersonalClient::new(personal_config()).unwrap();

    let payload = client
        .fetch_person_async(&http_client, &access_token, &attributes())
        .await
        .unwrap();

    assert_eq!(ResourcePayload::Encrypted(envelope), payload);
}

#[tokio::test]
async fn access_token_without_sub_is_rejected() {
    let http_client = TestHttpClient::new();
    let access_token = myinfo_token(json!({ "scope": ["name"] }));

    let client = PersonalClient::new(personal_config()).unwrap();

    let err = client
        .get_person_async(&http_client, &access_token, &attributes())
        .await
        .unwrap_err();

    assert!(matches!(*err, MyInfoClientError::Verification(_)));
    assert!(err.to_string().contains("unable to extract UIN/FIN"));
    http_client.assert();
}

#[tokio::test]
async fn not_before_can_be_ignored_for_fresh_access_tokens() {
    let access_token = myinfo_token(json!({
        "sub": "S1234567A",
        "nbf": crate::helpers::now() + 300,
    }));

    let strict = PersonalClient::new(personal_config()).unwrap();
    let err = strict
        .fetch_person_async(&TestHttpClient::new(), &access_token, &attributes())
        .await
        .unwrap_err();
    assert!(matches!(*err, MyInfoClientError::Verification(_)));

    let http_client = person_request(&access_token, encrypt_for_client("a.b.c"));

    let lenient = PersonalClient::new(ClientConfig {
        ignore_not_before: true,
        ..personal_config()
    })
    .unwrap();

    assert!(lenient
        .fetch_person_async(&http_client, &access_token, &attributes())
        .await
        .is_ok());
}
