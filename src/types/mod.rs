//! # Types Module
//! All the types, config, response, request, error etc are in this module

mod claims;
mod client_config;
mod errors;
pub mod http_client;
mod logger;
mod redirect_options;
mod resource_payload;

pub use claims::{CompositeSubject, Profile, VerifiedClaims};
pub use client_config::{ApiVariant, ClientConfig, ResponseFormat};
pub use errors::{ClientReturnType, MyInfoClientError};
pub use http_client::{HttpMethod, HttpRequest, HttpResponse, MyInfoHttpClient};
pub use logger::{Logger, NoopLogger, TracingLogger};
pub use redirect_options::RedirectOptions;
pub use resource_payload::ResourcePayload;
