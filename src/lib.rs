#![warn(missing_docs)]
//! # MyInfo Client
//!
//! Relying party library for the MyInfo and MyInfo Business APIs.
//!
//! Every API call is signed with the client private key (`PKI_SIGN`), resource responses come
//! back as a compact JWE wrapping a compact JWS which is decrypted with the same key and
//! verified with the MyInfo public key.
//!
//! ## Clients
//!
//! ### New Instance
//! - [client::BusinessClient::new]
//! - [client::PersonalClient::new]
//! - [client::RelyingParty::from_config]
//!
//! ### Login flow
//! - [client::RelyingPartyClient::build_login_url]
//! - [client::RelyingPartyClient::complete_login_async]
//!
//! ### MyInfo Business
//! - [client::BusinessClient::create_redirect_url]
//! - [client::BusinessClient::get_access_token_async]
//! - [client::BusinessClient::fetch_entity_person_async]
//! - [client::BusinessClient::get_entity_person_async]
//!
//! ### MyInfo
//! - [client::PersonalClient::create_redirect_url]
//! - [client::PersonalClient::get_access_token_async]
//! - [client::PersonalClient::fetch_person_async]
//! - [client::PersonalClient::get_person_async]
//!
//! ### Protocol steps
//! - [client::Client::create_redirect_url]
//! - [client::Client::exchange_token_async]
//! - [client::Client::fetch_resource_async]
//! - [client::Client::decrypt_envelope]
//! - [client::Client::verify]
//!
//! ## Building blocks
//! - [query::canonical_query_string]
//! - [signer::sign]
//! - [envelope::decrypt]
//! - [verifier::verify]
//! - [subject::parse_subject]
//!
//! The `http_client` feature (on by default) provides [http_client::DefaultHttpClient]. Any
//! other transport can be plugged in through [types::MyInfoHttpClient].

pub mod client;
pub mod envelope;
pub mod helpers;
mod http;
#[cfg(feature = "http_client")]
pub mod http_client;
pub mod query;
pub mod signer;
pub mod subject;
pub mod types;
pub mod verifier;

/// Re exports from the crate
pub mod re_exports {
    pub use josekit::{self};
    pub use serde_json::{self, json, Value};
    pub use url;
}
