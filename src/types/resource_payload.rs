use serde_json::Value;

/// # ResourcePayload
/// Body of a resource endpoint response, before any decryption or verification
#[derive(Debug, Clone, PartialEq)]
pub enum ResourcePayload {
    /// Compact JWE, returned untouched
    Encrypted(String),
    /// Parsed JSON, returned by deployments that do not encrypt
    Plain(Value),
}
