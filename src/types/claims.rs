use serde::Serialize;
use serde_json::{Map, Value};

/// # VerifiedClaims
/// Claims of a token whose signature checked out against the MyInfo public key.
///
/// Only [crate::verifier::verify] and the plain response mode create these, so holding one
/// means the content can be trusted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VerifiedClaims(Map<String, Value>);

impl VerifiedClaims {
    pub(crate) fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    /// Gets a claim by name
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// `sub` claim, when it is a string
    pub fn subject(&self) -> Option<&str> {
        self.0.get("sub").and_then(Value::as_str)
    }

    /// `iss` claim, when it is a string
    pub fn issuer(&self) -> Option<&str> {
        self.0.get("iss").and_then(Value::as_str)
    }

    /// `exp` claim in seconds since epoch
    pub fn expires_at(&self) -> Option<i64> {
        self.0.get("exp").and_then(Value::as_i64)
    }

    /// `nbf` claim in seconds since epoch
    pub fn not_before(&self) -> Option<i64> {
        self.0.get("nbf").and_then(Value::as_i64)
    }

    /// `scope` claim. MyInfo sends an array; a space separated string is split.
    pub fn scopes(&self) -> Vec<String> {
        match self.0.get("scope") {
            Some(Value::Array(scopes)) => scopes
                .iter()
                .filter_map(|s| s.as_str().map(str::to_string))
                .collect(),
            Some(Value::String(scopes)) => scopes.split_whitespace().map(str::to_string).collect(),
            _ => vec![],
        }
    }

    /// Borrows the claim set
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns the claim set
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// # CompositeSubject
/// Two identifiers packed in a `sub` claim as `<primary>_<secondary>`.
/// For MyInfo Business these are the UEN of the entity and the UUID of the person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeSubject {
    /// Part before the delimiter
    pub primary_id: String,
    /// Part after the delimiter
    pub secondary_id: String,
}

/// # Profile
/// Outcome of a completed login
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// The person: UUID for MyInfo Business, UIN/FIN for MyInfo
    pub subject: String,
    /// UEN of the entity the person logged in for. Business only.
    pub entity: Option<String>,
    /// Attributes returned by the resource endpoint
    pub claims: VerifiedClaims,
}
