//! # Envelope Decryptor
//! MyInfo encrypts resource responses as a compact JWE whose plaintext is a compact JWS.

use josekit::jwe::{self, RSA1_5, RSA_OAEP, RSA_OAEP_256};
use serde_json::{Map, Value};

use crate::{
    helpers::decode_json_segment,
    types::{ClientReturnType, MyInfoClientError},
};

/// # EncryptedEnvelope
/// A compact JWE split into its five segments
#[derive(Debug, Clone)]
pub struct EncryptedEnvelope {
    raw: String,
    /// Decoded protected header
    pub header: Map<String, Value>,
    /// Content encryption key, wrapped with the client public key
    pub encrypted_key: String,
    /// Initialization vector
    pub iv: String,
    /// Encrypted payload
    pub ciphertext: String,
    /// Authentication tag
    pub tag: String,
}

impl EncryptedEnvelope {
    /// Splits `envelope` into its segments and decodes the header.
    /// Anything other than exactly five segments is rejected.
    pub fn parse(envelope: &str) -> ClientReturnType<Self> {
        let raw = envelope.trim();
        let segments: Vec<&str> = raw.split('.').collect();

        if segments.len() != 5 {
            return Err(Box::new(MyInfoClientError::Decryption(format!(
                "envelope must have five segments, got {}",
                segments.len()
            ))));
        }

        let header = decode_json_segment(segments[0]).ok_or(MyInfoClientError::Decryption(
            "envelope header is not base64url encoded JSON".to_string(),
        ))?;

        Ok(Self {
            raw: raw.to_string(),
            header,
            encrypted_key: segments[1].to_string(),
            iv: segments[2].to_string(),
            ciphertext: segments[3].to_string(),
            tag: segments[4].to_string(),
        })
    }

    /// Key management algorithm (`alg`)
    pub fn algorithm(&self) -> Option<&str> {
        self.header.get("alg").and_then(Value::as_str)
    }

    /// Content encryption algorithm (`enc`)
    pub fn encryption(&self) -> Option<&str> {
        self.header.get("enc").and_then(Value::as_str)
    }

    /// Unwraps the content encryption key with `private_key` (PEM) and decrypts the payload.
    /// Returns the inner token.
    pub fn decrypt(&self, private_key: &str) -> ClientReturnType<String> {
        let alg = self.algorithm().ok_or(MyInfoClientError::Decryption(
            "envelope header has no alg".to_string(),
        ))?;

        if self.encryption().is_none() {
            return Err(Box::new(MyInfoClientError::Decryption(
                "envelope header has no enc".to_string(),
            )));
        }

        let decrypter = match alg {
            "RSA-OAEP" => RSA_OAEP.decrypter_from_pem(private_key.as_bytes()),
            "RSA-OAEP-256" => RSA_OAEP_256.decrypter_from_pem(private_key.as_bytes()),
            "RSA1_5" => RSA1_5.decrypter_from_pem(private_key.as_bytes()),
            other => {
                return Err(Box::new(MyInfoClientError::Decryption(format!(
                    "unsupported key management algorithm {other}"
                ))))
            }
        }
        .map_err(|e| {
            MyInfoClientError::Decryption(format!("client private key is unusable ({e})"))
        })?;

        let (plaintext, _) = jwe::deserialize_compact(&self.raw, &decrypter).map_err(|e| {
            MyInfoClientError::Decryption(format!("failed to decrypt envelope ({e})"))
        })?;

        let inner = String::from_utf8(plaintext).map_err(|_| {
            MyInfoClientError::Decryption("decrypted payload is not valid UTF-8".to_string())
        })?;

        // Some producers serialize the inner token as a JSON string
        Ok(inner.trim_matches('"').to_string())
    }
}

/// Decrypts a compact JWE with the client private key and returns the inner token
pub fn decrypt(envelope: &str, private_key: &str) -> ClientReturnType<String> {
    EncryptedEnvelope::parse(envelope)?.decrypt(private_key)
}
