//! # Canonical Request Signer
//! Produces the `PKI_SIGN` authorization header MyInfo expects on every API call.
//!
//! The signature covers `METHOD&URL&PARAMS` where `PARAMS` is the unencoded canonical query
//! string of the request parameters merged with `app_id`, `nonce`, `signature_method` and
//! `timestamp`.

use base64::{engine::general_purpose, Engine};
use josekit::jws::{JwsSigner, RS256};

use crate::{
    helpers::{generate_random, now_millis},
    query::CanonicalParams,
    types::{ClientConfig, ClientReturnType, HttpMethod, MyInfoClientError},
};

/// Only RSA with SHA-256 is accepted by MyInfo
pub const SIGNATURE_METHOD: &str = "RS256";

/// # SignedRequest
/// A request with its computed signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Http method
    pub method: HttpMethod,
    /// Url without query string
    pub url: String,
    /// Request parameters merged with the signing parameters
    pub params: CanonicalParams,
    /// Client id, sent as `app_id`
    pub app_id: String,
    /// Milliseconds since epoch
    pub timestamp: String,
    /// Base64 of 32 random bytes
    pub nonce: String,
    /// The exact string that was signed
    pub base_string: String,
    /// Base64 RSA-SHA256 signature of `base_string`
    pub signature: String,
}

impl SignedRequest {
    /// Value of the `Authorization` header
    pub fn authorization_header(&self) -> String {
        format!(
            "PKI_SIGN timestamp=\"{}\",nonce=\"{}\",app_id=\"{}\",signature_method=\"{SIGNATURE_METHOD}\",signature=\"{}\"",
            self.timestamp, self.nonce, self.app_id, self.signature
        )
    }

    /// Value of the `Authorization` header for calls that also carry an access token
    pub fn authorization_header_with_bearer(&self, access_token: &str) -> String {
        format!("{},Bearer {access_token}", self.authorization_header())
    }
}

/// Signs a request with the client private key of `config`.
///
/// Each call uses a fresh timestamp and nonce, so a signed request must not be reused for a
/// retry.
///
/// - `method` - Http method of the request
/// - `url` - Url of the request without the query string
/// - `params` - Query or form parameters, not encoded
pub fn sign(
    method: HttpMethod,
    url: &str,
    params: &CanonicalParams,
    config: &ClientConfig,
) -> ClientReturnType<SignedRequest> {
    sign_with(
        method,
        url,
        params,
        &config.client_id,
        &config.client_private_key,
        now_millis().to_string(),
        generate_random(Some(32)),
    )
}

pub(crate) fn sign_with(
    method: HttpMethod,
    url: &str,
    params: &CanonicalParams,
    app_id: &str,
    private_key: &str,
    timestamp: String,
    nonce: String,
) -> ClientReturnType<SignedRequest> {
    let mut merged = params.clone();
    merged.insert("app_id", app_id);
    merged.insert("nonce", nonce.as_str());
    merged.insert("signature_method", SIGNATURE_METHOD);
    merged.insert("timestamp", timestamp.as_str());

    let base_string = format!(
        "{}&{url}&{}",
        method.as_str(),
        merged.to_query_string(false)
    );

    let signer = RS256.signer_from_pem(private_key.as_bytes()).map_err(|e| {
        MyInfoClientError::Signing(format!("client private key is unusable ({e})"))
    })?;

    let signature = signer.sign(base_string.as_bytes()).map_err(|e| {
        MyInfoClientError::Signing(format!("error while signing the request ({e})"))
    })?;

    Ok(SignedRequest {
        method,
        url: url.to_string(),
        params: merged,
        app_id: app_id.to_string(),
        timestamp,
        nonce,
        base_string,
        signature: general_purpose::STANDARD.encode(signature),
    })
}
