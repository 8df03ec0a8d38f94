//! # Signature Verifier
//! Verifies MyInfo signed tokens (access tokens and decrypted resource payloads).
//!
//! A token that does not verify is an expected outcome (foreign, tampered, expired) and is
//! reported as `None` by [verify], never as an error.

use std::time::Duration;

use josekit::{jws::RS256, jwt};
use openssl::x509::X509;
use serde_json::{Map, Value};

use crate::{
    helpers::{decode_json_segment, now},
    signer::SIGNATURE_METHOD,
    types::{ClientConfig, ClientReturnType, MyInfoClientError, VerifiedClaims},
};

/// # VerificationPolicy
/// Time related checks applied after the signature is verified
#[derive(Debug, Clone, Copy)]
pub struct VerificationPolicy {
    /// Skip the `nbf` check. `exp` is always checked.
    pub ignore_not_before: bool,
    /// Leeway for `exp` and `nbf`
    pub clock_tolerance: Duration,
    /// Clock in seconds since epoch
    pub now: fn() -> i64,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self {
            ignore_not_before: false,
            clock_tolerance: Duration::from_secs(0),
            now,
        }
    }
}

impl VerificationPolicy {
    pub(crate) fn from_config(config: &ClientConfig, now: fn() -> i64) -> Self {
        Self {
            ignore_not_before: config.ignore_not_before,
            clock_tolerance: config.clock_tolerance,
            now,
        }
    }
}

/// Verifies `token` with `public_key` (PEM public key or X.509 certificate) and returns its
/// claims. `None` when the token is malformed, not RS256, badly signed or expired.
pub fn verify(
    token: &str,
    public_key: &str,
    policy: &VerificationPolicy,
) -> Option<VerifiedClaims> {
    verify_token(token, public_key, policy).ok()
}

/// Same as [verify] but tells why a token was rejected
pub(crate) fn verify_token(
    token: &str,
    public_key: &str,
    policy: &VerificationPolicy,
) -> ClientReturnType<VerifiedClaims> {
    let segments: Vec<&str> = token.split('.').collect();

    if segments.len() != 3 {
        return Err(Box::new(MyInfoClientError::Verification(
            "JWS must have three components".to_string(),
        )));
    }

    let header = decode_json_segment(segments[0]).ok_or(MyInfoClientError::Verification(
        "JWS header is malformed".to_string(),
    ))?;

    match header.get("alg").and_then(Value::as_str) {
        Some(SIGNATURE_METHOD) => {}
        Some(alg) => {
            return Err(Box::new(MyInfoClientError::Verification(format!(
                "unexpected JWS alg received, expected {SIGNATURE_METHOD}, got: {alg}"
            ))))
        }
        None => {
            return Err(Box::new(MyInfoClientError::Verification(
                "JWS header has no alg".to_string(),
            )))
        }
    }

    let key = public_key_pem(public_key)?;

    let verifier = RS256.verifier_from_pem(key.as_bytes()).map_err(|e| {
        MyInfoClientError::Verification(format!("public key is unusable ({e})"))
    })?;

    let (payload, _) = jwt::decode_with_verifier(token, &verifier).map_err(|e| {
        MyInfoClientError::Verification(format!("signature verification failed ({e})"))
    })?;

    let claims = payload.claims_set().clone();

    check_validity_window(&claims, policy)?;

    Ok(VerifiedClaims::new(claims))
}

fn check_validity_window(
    claims: &Map<String, Value>,
    policy: &VerificationPolicy,
) -> ClientReturnType<()> {
    let timestamp = (policy.now)();
    let tolerance = i64::try_from(policy.clock_tolerance.as_secs()).unwrap_or(i64::MAX);

    if let Some(exp) = claims.get("exp") {
        let exp_value = exp.as_f64().map(|v| v as i64).ok_or(
            MyInfoClientError::Verification(
                "JWT exp claim must be a JSON numeric value".to_string(),
            ),
        )?;

        if timestamp.saturating_sub(tolerance) >= exp_value {
            return Err(Box::new(MyInfoClientError::Verification(format!(
                "JWT expired, now {}, exp {exp_value}",
                timestamp.saturating_sub(tolerance)
            ))));
        }
    }

    if policy.ignore_not_before {
        return Ok(());
    }

    if let Some(nbf) = claims.get("nbf") {
        let nbf_value = nbf.as_f64().map(|v| v as i64).ok_or(
            MyInfoClientError::Verification(
                "JWT nbf claim must be a JSON numeric value".to_string(),
            ),
        )?;

        if nbf_value > timestamp.saturating_add(tolerance) {
            return Err(Box::new(MyInfoClientError::Verification(format!(
                "JWT not active yet, now {}, nbf {nbf_value}",
                timestamp.saturating_add(tolerance)
            ))));
        }
    }

    Ok(())
}

/// Returns a PEM public key. Certificates are reduced to their subject public key.
pub(crate) fn public_key_pem(material: &str) -> ClientReturnType<String> {
    if !material.contains("-----BEGIN CERTIFICATE-----") {
        return Ok(material.to_string());
    }

    let to_error =
        |e: openssl::error::ErrorStack| MyInfoClientError::Verification(format!("invalid certificate ({e})"));

    let certificate = X509::from_pem(material.as_bytes()).map_err(to_error)?;
    let pem = certificate
        .public_key()
        .and_then(|key| key.public_key_to_pem())
        .map_err(to_error)?;

    String::from_utf8(pem).map_err(|_| {
        Box::new(MyInfoClientError::Verification(
            "certificate public key is not valid UTF-8".to_string(),
        ))
    })
}
