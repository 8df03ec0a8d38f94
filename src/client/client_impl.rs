use serde_json::Value;
use url::Url;

use crate::{
    envelope::decrypt,
    helpers::{attributes_csv, convert_json_to},
    http::request_async,
    query::CanonicalParams,
    signer::sign,
    types::{
        ClientReturnType, HttpMethod, HttpRequest, MyInfoClientError, MyInfoHttpClient,
        RedirectOptions, ResourcePayload, ResponseFormat, VerifiedClaims,
    },
    verifier::verify_token,
};

use super::Client;

const ENDPOINT_AUTHORISE: &str = "authorise";
const ENDPOINT_TOKEN: &str = "token";

/// Implementation for Client
impl Client {
    /// # Redirect Url
    /// Builds the url the user visits to log in and consent to sharing the requested
    /// attributes. No request is made.
    ///
    /// - `options` - [RedirectOptions] : purpose, attributes, state and redirect endpoint.
    ///   Missing values fall back to the config.
    pub fn create_redirect_url(&self, options: RedirectOptions) -> String {
        self.redirect_url_with(options, None)
    }

    pub(crate) fn redirect_url_with(
        &self,
        options: RedirectOptions,
        extra: Option<(&str, &str)>,
    ) -> String {
        let attributes = options
            .requested_attributes
            .unwrap_or_else(|| self.config.requested_attributes.clone());

        let mut query_params = CanonicalParams::new();
        query_params.insert_optional(
            "purpose",
            options.purpose.as_deref().or(self.config.purpose.as_deref()),
        );
        query_params.insert("attributes", attributes_csv(&attributes));
        query_params.insert_optional("state", options.relay_state.as_deref());
        query_params.insert("client_id", self.config.client_id.as_str());
        query_params.insert(
            "redirect_uri",
            options
                .redirect_endpoint
                .unwrap_or_else(|| self.config.redirect_endpoint.clone()),
        );

        if let Some((key, value)) = extra {
            query_params.insert(key, value);
        }

        format!(
            "{}?{}",
            self.endpoint(ENDPOINT_AUTHORISE),
            query_params.to_query_string(true)
        )
    }

    /// # Token Exchange
    /// Exchanges the authorization code handed to the redirect endpoint for an access token.
    ///
    /// Transport failures, non 2xx responses, invalid JSON and a missing `access_token` are all
    /// reported as [MyInfoClientError::TokenExchange] wrapping the cause. Nothing is retried.
    ///
    /// - `http_client` - The http client to make the request
    /// - `auth_code` - Authorization code received on the redirect endpoint
    /// - `relay_state` - State that was sent with the redirect url
    pub async fn exchange_token_async<T>(
        &self,
        http_client: &T,
        auth_code: &str,
        relay_state: Option<&str>,
    ) -> ClientReturnType<String>
    where
        T: MyInfoHttpClient,
    {
        let token_url = parse_url(&self.endpoint(ENDPOINT_TOKEN))?;

        let mut body = CanonicalParams::new();
        body.insert("grant_type", "authorization_code");
        body.insert("code", auth_code);
        if let Some(state) = relay_state {
            body.insert("state", state);
        }
        body.insert("redirect_uri", self.config.redirect_endpoint.as_str());
        body.insert("client_id", self.config.client_id.as_str());
        body.insert("client_secret", self.config.client_secret.as_str());

        let signed = sign(HttpMethod::POST, token_url.as_str(), &body, &self.config)
            .map_err(|e| {
                self.logger.error(&e.to_string());
                e
            })?;

        self.logger.debug(&format!("requesting access token from {token_url}"));

        let req = HttpRequest::new(token_url)
            .method(HttpMethod::POST)
            .header("cache-control", "no-cache")
            .header("authorization", signed.authorization_header())
            .timeout(self.config.timeout)
            .form(body.to_query_string(true));

        let access_token = async {
            let response = request_async(req, http_client).await?;
            extract_access_token(response.body.as_deref().unwrap_or_default())
                .map_err(|message| {
                    Box::new(MyInfoClientError::new_response_format_error(
                        message,
                        Some(response),
                    ))
                })
        }
        .await
        .map_err(|e| {
            self.logger.error(&format!("token exchange failed: {e}"));
            Box::new(MyInfoClientError::TokenExchange(e))
        })?;

        Ok(access_token)
    }

    /// # Resource Fetch
    /// Signed GET of a protected resource on behalf of the user holding `access_token`.
    ///
    /// The signature covers `url` without query string, the query carries `params`.
    /// The body is returned untouched when responses are encrypted, parsed otherwise.
    ///
    /// - `http_client` - The http client to make the request
    /// - `url` - Resource url without query string
    /// - `params` - Query parameters, not encoded
    /// - `access_token` - Token returned by [Client::exchange_token_async]
    pub async fn fetch_resource_async<T>(
        &self,
        http_client: &T,
        url: &str,
        params: &CanonicalParams,
        access_token: &str,
    ) -> ClientReturnType<ResourcePayload>
    where
        T: MyInfoHttpClient,
    {
        // the signature covers the url as it is sent, without query string
        let mut resource_url = parse_url(url)?;
        resource_url.set_query(None);

        let signed = sign(HttpMethod::GET, resource_url.as_str(), params, &self.config)
            .map_err(|e| {
                self.logger.error(&e.to_string());
                e
            })?;

        if !params.is_empty() {
            resource_url.set_query(Some(&params.to_query_string(true)));
        }

        let plain = self.config.response_format == ResponseFormat::Plain;

        let req = HttpRequest::new(resource_url)
            .method(HttpMethod::GET)
            .header("cache-control", "no-cache")
            .header(
                "authorization",
                signed.authorization_header_with_bearer(access_token),
            )
            .timeout(self.config.timeout)
            .expect_json_body(plain);

        self.logger.debug(&format!("requesting resource {url}"));

        let response = request_async(req, http_client).await.map_err(|e| {
            self.logger.error(&format!("resource request failed: {e}"));
            e
        })?;

        let body = response.body.clone().unwrap_or_default();

        if !plain {
            return Ok(ResourcePayload::Encrypted(body));
        }

        let json = convert_json_to::<Value>(&body).map_err(|e| {
            MyInfoClientError::new_response_format_error(&e, Some(response))
        })?;

        Ok(ResourcePayload::Plain(json))
    }

    /// # Decrypt
    /// Decrypts a compact JWE with the client private key, returning the inner token
    pub fn decrypt_envelope(&self, envelope: &str) -> ClientReturnType<String> {
        decrypt(envelope, &self.config.client_private_key).map_err(|e| {
            self.logger.error(&e.to_string());
            e
        })
    }

    /// # Verify
    /// Verifies a token signed by MyInfo. `None` means the claims cannot be trusted.
    pub fn verify(&self, token: &str) -> Option<VerifiedClaims> {
        match verify_token(
            token,
            &self.config.counterparty_public_key,
            &self.verification_policy(),
        ) {
            Ok(claims) => Some(claims),
            Err(e) => {
                self.logger.warn(&e.to_string());
                None
            }
        }
    }

    /// Decrypts and verifies a resource payload. Plain payloads are taken as they are.
    pub(crate) fn open_payload(
        &self,
        payload: ResourcePayload,
    ) -> ClientReturnType<Option<VerifiedClaims>> {
        match payload {
            ResourcePayload::Encrypted(envelope) => {
                let inner = self.decrypt_envelope(&envelope)?;
                Ok(self.verify(&inner))
            }
            ResourcePayload::Plain(Value::Object(claims)) => {
                Ok(Some(VerifiedClaims::new(claims)))
            }
            ResourcePayload::Plain(_) => Err(Box::new(
                MyInfoClientError::new_response_format_error(
                    "resource response is not a JSON object",
                    None,
                ),
            )),
        }
    }

    /// Claims of the access token. Unlike [Client::verify] a bad token is an error here, the
    /// resource cannot be addressed without them.
    pub(crate) fn access_token_claims(&self, access_token: &str) -> ClientReturnType<VerifiedClaims> {
        self.verify(access_token).ok_or(Box::new(MyInfoClientError::Verification(
            "access token could not be verified".to_string(),
        )))
    }
}

fn parse_url(url: &str) -> ClientReturnType<Url> {
    Url::parse(url).map_err(|e| {
        Box::new(MyInfoClientError::Configuration(format!(
            "invalid url {url} ({e})"
        )))
    })
}

fn extract_access_token(body: &str) -> Result<String, &'static str> {
    let json = convert_json_to::<Value>(body).map_err(|_| "unexpected body type")?;

    let non_empty = |value: &Value| match value {
        Value::String(token) if !token.is_empty() => Some(token.to_string()),
        _ => None,
    };

    json.get("access_token")
        .and_then(non_empty)
        .or_else(|| {
            json.get("data")
                .and_then(|data| data.get("access_token"))
                .and_then(non_empty)
        })
        .ok_or("missing access token in response")
}
