//! # Helpers
//! Clock, randomness and JSON utilities shared by the clients

use std::time::{SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose, Engine};
use rand::Rng;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Gets a Unix Timestamp in seconds. Uses [`SystemTime::now`]
pub fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Gets a Unix Timestamp in milliseconds. Uses [`SystemTime::now`]
pub fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// Generates `bytes_to_generate` random bytes using [rand::thread_rng], base64 encoded
/// with padding. Defaults to 32 bytes.
pub fn generate_random(bytes_to_generate: Option<u32>) -> String {
    let mut random_bytes = vec![];

    for _ in 0..bytes_to_generate.unwrap_or(32) {
        random_bytes.push(rand::thread_rng().gen::<u8>());
    }

    general_purpose::STANDARD.encode(&random_bytes)
}

/// Converts plain JSON to a struct/enum that impl's serde's [Deserialize]. Uses [serde_json::from_str] under
/// the hood
pub fn convert_json_to<T: for<'a> Deserialize<'a>>(plain: &str) -> Result<T, String> {
    serde_json::from_str::<T>(plain).map_err(|e| format!("Parse Error: {e}"))
}

/// Joins attribute names with `,`. Names are sorted so the same set always renders the same.
pub(crate) fn attributes_csv(attributes: &[String]) -> String {
    let mut sorted: Vec<&str> = attributes.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join(",")
}

/// Base64url decodes a JOSE segment and parses it as a JSON object
pub(crate) fn decode_json_segment(segment: &str) -> Option<Map<String, Value>> {
    let bytes = base64_url::decode(segment).ok()?;
    serde_json::from_slice::<Map<String, Value>>(&bytes).ok()
}
