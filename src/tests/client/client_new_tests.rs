use crate::{
    client::{BusinessClient, PersonalClient, RelyingParty},
    tests::keys::test_config,
    types::{ApiVariant, ClientConfig, MyInfoClientError},
};

#[test]
fn business_client_does_not_need_eservice_id() {
    let client = BusinessClient::new(test_config()).unwrap();

    assert_eq!("c1", client.client().config().client_id);
}

#[test]
fn personal_client_requires_eservice_id() {
    for eservice_id in [None, Some(String::new())] {
        let config = ClientConfig {
            eservice_id,
            ..test_config()
        };

        let err = PersonalClient::new(config).unwrap_err();

        assert!(matches!(*err, MyInfoClientError::Configuration(_)));
        assert!(err.to_string().contains("\"eservice_id\" cannot be empty"));
    }
}

#[test]
fn personal_client_validates_the_rest_of_the_config() {
    let config = ClientConfig {
        eservice_id: Some("MYINFO-CONSENTPLATFORM".to_string()),
        client_secret: String::new(),
        ..test_config()
    };

    let err = PersonalClient::new(config).unwrap_err();

    assert!(err.to_string().contains("\"client_secret\" cannot be empty"));
}

#[test]
fn relying_party_follows_the_configured_variant() {
    let business = RelyingParty::from_config(test_config()).unwrap();
    assert!(matches!(business, RelyingParty::Business(_)));

    let personal = RelyingParty::from_config(ClientConfig {
        variant: ApiVariant::Personal,
        eservice_id: Some("MYINFO-CONSENTPLATFORM".to_string()),
        ..test_config()
    })
    .unwrap();
    assert!(matches!(personal, RelyingParty::Personal(_)));

    let missing_eservice_id = RelyingParty::from_config(ClientConfig {
        variant: ApiVariant::Personal,
        ..test_config()
    });
    assert!(missing_eservice_id.is_err());
}
