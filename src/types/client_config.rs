use std::time::Duration;

use serde::Deserialize;
use url::Url;

use super::{ClientReturnType, MyInfoClientError};

/// Which MyInfo API the client talks to
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVariant {
    /// MyInfo Business, `entity-person` resource keyed by UEN and UUID
    #[default]
    Business,
    /// MyInfo (personal), `person` resource keyed by UIN/FIN. Needs an e-service id.
    Personal,
}

/// Shape of the resource response
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Compact JWE wrapping a JWS. Production and staging.
    #[default]
    Encrypted,
    /// Plain JSON. Development deployments.
    Plain,
}

/// # ClientConfig
/// Everything a client needs. Keys are passed in as already loaded PEM strings.
///
/// The config is validated and sanitized once, when the client is built, and never
/// changes afterwards.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Client id issued during onboarding, also known as the App ID
    pub client_id: String,
    /// Client secret issued during onboarding
    pub client_secret: String,
    /// RSA private key in PEM format. Signs requests and decrypts responses.
    pub client_private_key: String,
    /// MyInfo public key or X.509 certificate in PEM format. Verifies responses.
    pub counterparty_public_key: String,
    /// Base url of the API, e.g. `https://test.api.myinfo.gov.sg/biz/v2`
    pub api_base_url: String,
    /// Endpoint the user is sent back to after login
    pub redirect_endpoint: String,
    /// SingPass e-service id. Required by [ApiVariant::Personal] only.
    pub eservice_id: Option<String>,
    /// Default purpose shown on the consent page
    pub purpose: Option<String>,
    /// Default attributes requested on the consent page
    pub requested_attributes: Vec<String>,
    /// Selects the client implementation built by [crate::client::RelyingParty::from_config]
    pub variant: ApiVariant,
    /// Whether the resource endpoint answers with an encrypted envelope or plain JSON
    pub response_format: ResponseFormat,
    /// Skip the `nbf` check when verifying tokens.
    ///
    /// Access tokens used right after being issued can fail the check when the clocks of the
    /// two services drift. This weakens verification, so it is off unless asked for.
    pub ignore_not_before: bool,
    /// Leeway applied to `exp` (and `nbf` unless ignored)
    #[serde(with = "humantime_serde")]
    pub clock_tolerance: Duration,
    /// Deadline for each network call
    #[serde(with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub(crate) fn sanitize(mut self) -> ClientReturnType<Self> {
        let required = [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("client_private_key", &self.client_private_key),
            ("counterparty_public_key", &self.counterparty_public_key),
            ("api_base_url", &self.api_base_url),
            ("redirect_endpoint", &self.redirect_endpoint),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Box::new(MyInfoClientError::Configuration(format!(
                    "config parameter \"{name}\" cannot be empty"
                ))));
            }
        }

        for key in [
            &mut self.client_private_key,
            &mut self.counterparty_public_key,
        ] {
            if key.ends_with('\n') {
                key.pop();
            }
        }

        // the base url ends up in signed urls, keep it in the form Url serializes to
        let base_url = parse_absolute("api_base_url", &self.api_base_url)?;
        let base_url = base_url.as_str();
        self.api_base_url = base_url.strip_suffix('/').unwrap_or(base_url).to_string();

        parse_absolute("redirect_endpoint", &self.redirect_endpoint)?;

        Ok(self)
    }
}

fn parse_absolute(name: &str, value: &str) -> ClientReturnType<Url> {
    Url::parse(value).map_err(|e| {
        Box::new(MyInfoClientError::Configuration(format!(
            "config parameter \"{name}\" is not a valid absolute url ({e})"
        )))
    })
}
