use crate::{
    helpers::attributes_csv,
    query::CanonicalParams,
    types::{
        ClientConfig, ClientReturnType, Logger, MyInfoClientError, MyInfoHttpClient, Profile,
        RedirectOptions, ResourcePayload, VerifiedClaims,
    },
};

use super::{Client, RelyingPartyClient};

const ENDPOINT_PERSON: &str = "person";
const PARAM_ESERVICE_ID: &str = "sp_esvcId";

/// # MyInfo client
/// Retrieves the attributes of a person. The access token `sub` is the UIN/FIN.
#[derive(Debug, Clone)]
pub struct PersonalClient {
    pub(crate) client: Client,
    eservice_id: String,
}

impl PersonalClient {
    /// Validates `config` and builds the client. MyInfo requires [ClientConfig::eservice_id].
    pub fn new(config: ClientConfig) -> ClientReturnType<Self> {
        let eservice_id = match config.eservice_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                return Err(Box::new(MyInfoClientError::Configuration(
                    "config parameter \"eservice_id\" cannot be empty".to_string(),
                )))
            }
        };

        Ok(Self {
            client: Client::new(config)?,
            eservice_id,
        })
    }

    /// Replaces the logger. Defaults to [crate::types::NoopLogger].
    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.client = self.client.with_logger(logger);
        self
    }

    /// The underlying protocol client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// # Redirect Url
    /// Consent url carrying the e-service id as `sp_esvcId`
    pub fn create_redirect_url(&self, options: RedirectOptions) -> String {
        self.client
            .redirect_url_with(options, Some((PARAM_ESERVICE_ID, self.eservice_id.as_str())))
    }

    /// # Access Token
    /// See [Client::exchange_token_async]
    pub async fn get_access_token_async<T>(
        &self,
        http_client: &T,
        auth_code: &str,
        relay_state: Option<&str>,
    ) -> ClientReturnType<String>
    where
        T: MyInfoHttpClient,
    {
        self.client
            .exchange_token_async(http_client, auth_code, relay_state)
            .await
    }

    /// # Person
    /// Fetches the `person` resource of the UIN/FIN in the access token, without opening it.
    pub async fn fetch_person_async<T>(
        &self,
        http_client: &T,
        access_token: &str,
        requested_attributes: &[String],
    ) -> ClientReturnType<ResourcePayload>
    where
        T: MyInfoHttpClient,
    {
        let uinfin = self.resolve_uinfin(access_token)?;

        self.fetch_for_uinfin(http_client, &uinfin, access_token, requested_attributes)
            .await
    }

    /// # Person
    /// Fetches, decrypts and verifies the `person` resource.
    ///
    /// `Ok(None)` when the decrypted payload does not verify.
    pub async fn get_person_async<T>(
        &self,
        http_client: &T,
        access_token: &str,
        requested_attributes: &[String],
    ) -> ClientReturnType<Option<VerifiedClaims>>
    where
        T: MyInfoHttpClient,
    {
        let payload = self
            .fetch_person_async(http_client, access_token, requested_attributes)
            .await?;

        self.client.open_payload(payload)
    }

    fn resolve_uinfin(&self, access_token: &str) -> ClientReturnType<String> {
        let claims = self.client.access_token_claims(access_token)?;

        match claims.subject() {
            Some(uinfin) if !uinfin.is_empty() => Ok(uinfin.to_string()),
            _ => {
                let e = MyInfoClientError::Verification(
                    "unable to extract UIN/FIN from access token".to_string(),
                );
                self.client.logger.error(&e.to_string());
                Err(Box::new(e))
            }
        }
    }

    async fn fetch_for_uinfin<T>(
        &self,
        http_client: &T,
        uinfin: &str,
        access_token: &str,
        requested_attributes: &[String],
    ) -> ClientReturnType<ResourcePayload>
    where
        T: MyInfoHttpClient,
    {
        // trailing slash is part of the signed url
        let url = self.client.endpoint(&format!("{ENDPOINT_PERSON}/{uinfin}/"));

        let mut params = CanonicalParams::new();
        params.insert("client_id", self.client.config.client_id.as_str());
        params.insert("attributes", attributes_csv(requested_attributes));
        params.insert(PARAM_ESERVICE_ID, self.eservice_id.as_str());

        self.client
            .fetch_resource_async(http_client, &url, &params, access_token)
            .await
    }
}

impl RelyingPartyClient for PersonalClient {
    fn build_login_url(&self, options: RedirectOptions) -> String {
        self.create_redirect_url(options)
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
        let access_token = self
            .get_access_token_async(http_client, auth_code, relay_state)
            .await?;

        let uinfin = self.resolve_uinfin(&access_token)?;

        let payload = self
            .fetch_for_uinfin(
                http_client,
                &uinfin,
                &access_token,
                &self.client.config.requested_attributes,
            )
            .await?;

        let profile = self
            .client
            .open_payload(payload)?
            .map(|claims| Profile {
                subject: uinfin,
                entity: None,
                claims,
            });

        if profile.is_some() {
            self.client.logger.info("MyInfo login completed");
        }

        Ok(profile)
    }
}
