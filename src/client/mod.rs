//! # MyInfo Client module
//! Contains the protocol client and the MyInfo / MyInfo Business clients built on it

#[allow(clippy::module_inception)]
mod client;

/// Implementation of the protocol steps
pub mod client_impl;

mod business;
mod personal;
mod relying_party;

pub use business::BusinessClient;
pub use client::Client;
pub use personal::PersonalClient;
pub use relying_party::{RelyingParty, RelyingPartyClient};
