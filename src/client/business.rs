use crate::{
    helpers::attributes_csv,
    query::CanonicalParams,
    subject::parse_subject,
    types::{
        ClientConfig, ClientReturnType, CompositeSubject, Logger, MyInfoClientError,
        MyInfoHttpClient, Profile, RedirectOptions, ResourcePayload, VerifiedClaims,
    },
};

use super::{Client, RelyingPartyClient};

const ENDPOINT_ENTITY_PERSON: &str = "entity-person";

/// # MyInfo Business client
/// Retrieves the attributes of an entity and of the person logging in on its behalf.
///
/// The access token `sub` carries both identifiers as `<UEN>_<UUID>`.
#[derive(Debug, Clone)]
pub struct BusinessClient {
    pub(crate) client: Client,
}

impl BusinessClient {
    /// Validates `config` and builds the client
    pub fn new(config: ClientConfig) -> ClientReturnType<Self> {
        Ok(Self {
            client: Client::new(config)?,
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
    /// Consent url. Unlike MyInfo, MyInfo Business takes no e-service id.
    pub fn create_redirect_url(&self, options: RedirectOptions) -> String {
        self.client.create_redirect_url(options)
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

    /// # Entity Person
    /// Fetches the `entity-person` resource without opening it.
    ///
    /// Fails if the UEN and UUID cannot be taken from a verified access token.
    pub async fn fetch_entity_person_async<T>(
        &self,
        http_client: &T,
        access_token: &str,
        requested_attributes: &[String],
    ) -> ClientReturnType<ResourcePayload>
    where
        T: MyInfoHttpClient,
    {
        let subject = self.resolve_subject(access_token)?;

        self.fetch_for_subject(http_client, &subject, access_token, requested_attributes)
            .await
    }

    /// # Entity Person
    /// Fetches, decrypts and verifies the `entity-person` resource.
    ///
    /// `Ok(None)` when the decrypted payload does not verify.
    pub async fn get_entity_person_async<T>(
        &self,
        http_client: &T,
        access_token: &str,
        requested_attributes: &[String],
    ) -> ClientReturnType<Option<VerifiedClaims>>
    where
        T: MyInfoHttpClient,
    {
        let payload = self
            .fetch_entity_person_async(http_client, access_token, requested_attributes)
            .await?;

        self.client.open_payload(payload)
    }

    fn resolve_subject(&self, access_token: &str) -> ClientReturnType<CompositeSubject> {
        let claims = self.client.access_token_claims(access_token)?;

        parse_subject(&claims).ok_or_else(|| {
            let e = MyInfoClientError::Verification(
                "unable to extract UEN/UUID from access token".to_string(),
            );
            self.client.logger.error(&e.to_string());
            Box::new(e)
        })
    }

    async fn fetch_for_subject<T>(
        &self,
        http_client: &T,
        subject: &CompositeSubject,
        access_token: &str,
        requested_attributes: &[String],
    ) -> ClientReturnType<ResourcePayload>
    where
        T: MyInfoHttpClient,
    {
        let url = self.client.endpoint(&format!(
            "{ENDPOINT_ENTITY_PERSON}/{}/{}",
            subject.primary_id, subject.secondary_id
        ));

        let mut params = CanonicalParams::new();
        params.insert("client_id", self.client.config.client_id.as_str());
        params.insert("attributes", attributes_csv(requested_attributes));

        self.client
            .fetch_resource_async(http_client, &url, &params, access_token)
            .await
    }
}

impl RelyingPartyClient for BusinessClient {
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

        let subject = self.resolve_subject(&access_token)?;

        let payload = self
            .fetch_for_subject(
                http_client,
                &subject,
                &access_token,
                &self.client.config.requested_attributes,
            )
            .await?;

        let profile = self.client.open_payload(payload)?.map(|claims| Profile {
            subject: subject.secondary_id,
            entity: Some(subject.primary_id),
            claims,
        });

        if profile.is_some() {
            self.client.logger.info("MyInfo Business login completed");
        }

        Ok(profile)
    }
}
