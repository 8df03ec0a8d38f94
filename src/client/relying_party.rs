use std::future::Future;

use crate::types::{
    ApiVariant, ClientConfig, ClientReturnType, Logger, MyInfoHttpClient, Profile,
    RedirectOptions,
};

use super::{BusinessClient, PersonalClient};

/// # RelyingPartyClient
/// A login flow as seen by the relying party: send the user somewhere, then turn what comes back
/// into a profile.
pub trait RelyingPartyClient {
    /// Url the user is redirected to in order to log in
    fn build_login_url(&self, options: RedirectOptions) -> String;

    /// Completes the login with the authorization code handed to the redirect endpoint.
    ///
    /// `Ok(None)` means the returned data could not be verified and must be treated as an
    /// unauthenticated login.
    fn complete_login_async<T>(
        &self,
        http_client: &T,
        auth_code: &str,
        relay_state: Option<&str>,
    ) -> impl Future<Output = ClientReturnType<Option<Profile>>> + Send
    where
        T: MyInfoHttpClient;
}

/// # RelyingParty
/// The client picked by [ClientConfig::variant]
#[derive(Debug, Clone)]
pub enum RelyingParty {
    /// MyInfo Business
    Business(BusinessClient),
    /// MyInfo
    Personal(PersonalClient),
}

impl RelyingParty {
    /// Builds the client matching `config.variant`
    pub fn from_config(config: ClientConfig) -> ClientReturnType<Self> {
        match config.variant {
            ApiVariant::Business => Ok(Self::Business(BusinessClient::new(config)?)),
            ApiVariant::Personal => Ok(Self::Personal(PersonalClient::new(config)?)),
        }
    }

    /// Replaces the logger of the underlying client
    pub fn with_logger(self, logger: impl Logger + 'static) -> Self {
        match self {
            Self::Business(client) => Self::Business(client.with_logger(logger)),
            Self::Personal(client) => Self::Personal(client.with_logger(logger)),
        }
    }
}

impl RelyingPartyClient for RelyingParty {
    fn build_login_url(&self, options: RedirectOptions) -> String {
        match self {
            Self::Business(client) => client.build_login_url(options),
            Self::Personal(client) => client.build_login_url(options),
        }
    }

    async fn complete_login_async<T>(
        &self,
        http_client: &T,
        auth_code: &str,
        relay_state: Option<&str>,
    ) -> ClientReturnType<Option<Profile>>
    where
        T: MyInfoHttpClient,
    {
        match self {
            Self::Business(client) => {
                client
                    .complete_login_async(http_client, auth_code, relay_state)
                    .await
            }
            Self::Personal(client) => {
                client
                    .complete_login_async(http_client, auth_code, relay_state)
                    .await
            }
        }
    }
}
