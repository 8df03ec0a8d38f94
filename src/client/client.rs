use std::sync::Arc;

use crate::{
    helpers::now,
    types::{ClientConfig, ClientReturnType, Logger, NoopLogger},
    verifier::VerificationPolicy,
};

/// # Client instance
/// Holds the validated config and the protocol steps shared by the MyInfo APIs: consent url,
/// token exchange, signed resource fetch, envelope decryption and token verification.
///
/// [super::BusinessClient] and [super::PersonalClient] build on top of it.
///
/// ## Blocking work
/// RSA signing, [Client::decrypt_envelope] and [Client::verify] run synchronously on the task
/// that calls them. On a multi-threaded runtime serving many logins, run
/// [Client::decrypt_envelope] and [Client::verify] on a blocking pool (for example tokio's
/// `spawn_blocking` with a cloned client) and pass the result on. `Client` is cheap to clone and
/// `Send + Sync`.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) config: ClientConfig,
    pub(crate) logger: Arc<dyn Logger>,
    pub(crate) now: fn() -> i64,
}

impl Client {
    /// Validates and sanitizes `config`.
    ///
    /// Fails with [crate::types::MyInfoClientError::Configuration] if a required parameter is
    /// empty or a url is not absolute. A trailing slash is removed from the base url and a
    /// trailing newline from the keys.
    pub fn new(config: ClientConfig) -> ClientReturnType<Self> {
        Ok(Self {
            config: config.sanitize()?,
            logger: Arc::new(NoopLogger),
            now,
        })
    }

    /// Replaces the logger. Defaults to [NoopLogger].
    pub fn with_logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Arc::new(logger);
        self
    }

    /// The sanitized config
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.api_base_url)
    }

    pub(crate) fn verification_policy(&self) -> VerificationPolicy {
        VerificationPolicy::from_config(&self.config, self.now)
    }
}
