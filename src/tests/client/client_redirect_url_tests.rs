use std::collections::HashMap;

use url::Url;

use crate::{
    client::{BusinessClient, Client, PersonalClient},
    tests::keys::test_config,
    types::{ClientConfig, RedirectOptions},
};

fn query_of(url: &str) -> HashMap<String, String> {
    Url::parse(url).unwrap().query_pairs().into_owned().collect()
}

#[test]
fn builds_canonical_consent_url() {
    let client = Client::new(ClientConfig {
        api_base_url: "https://api.example.sg/biz/v2".to_string(),
        ..test_config()
    })
    .unwrap();

    let url = client.create_redirect_url(
        RedirectOptions::default()
            .purpose("test")
            .requested_attributes(["name", "email"])
            .relay_state("s1"),
    );

    assert_eq!(
        "https://api.example.sg/biz/v2/authorise?attributes=email%2Cname&client_id=c1&purpose=test&redirect_uri=https%3A%2F%2Frp.example%2Fcb&state=s1",
        url
    );
}

#[test]
fn falls_back_to_config() {
    let client = BusinessClient::new(ClientConfig {
        purpose: Some("demonstrating MyInfo Business".to_string()),
        requested_attributes: vec!["basic-profile".to_string(), "addresses".to_string()],
        ..test_config()
    })
    .unwrap();

    let query = query_of(&client.create_redirect_url(RedirectOptions::default()));

    assert_eq!("demonstrating MyInfo Business", query["purpose"]);
    assert_eq!("addresses,basic-profile", query["attributes"]);
    assert_eq!("https://rp.example/cb", query["redirect_uri"]);
    assert_eq!("", query["state"]);
    assert!(!query.contains_key("sp_esvcId"));
}

#[test]
fn options_override_redirect_endpoint() {
    let client = Client::new(test_config()).unwrap();

    let url = client.create_redirect_url(
        RedirectOptions::default().redirect_endpoint("https://rp.example/other"),
    );

    assert_eq!("https://rp.example/other", query_of(&url)["redirect_uri"]);
}

#[test]
fn personal_url_carries_eservice_id() {
    let client = PersonalClient::new(ClientConfig {
        api_base_url: "https://api.myinfo.example/com/v3".to_string(),
        eservice_id: Some("MYINFO-CONSENTPLATFORM".to_string()),
        ..test_config()
    })
    .unwrap();

    let url = client.create_redirect_url(RedirectOptions::default().relay_state("s1"));

    assert_eq!(
        "https://api.myinfo.example/com/v3/authorise?attributes=email%2Cname&client_id=c1&purpose=test&redirect_uri=https%3A%2F%2Frp.example%2Fcb&sp_esvcId=MYINFO-CONSENTPLATFORM&state=s1",
        url
    );
}

#[test]
fn same_options_same_url() {
    let client = Client::new(test_config()).unwrap();

    let first = client.create_redirect_url(
        RedirectOptions::default().requested_attributes(["name", "email", "mobileno"]),
    );
    let second = client.create_redirect_url(
        RedirectOptions::default().requested_attributes(["mobileno", "name", "email"]),
    );

    assert_eq!(first, second);
}
