use thiserror::Error;

use super::HttpResponse;

/// # MyInfoClientError
/// Error that will be returned to the end user of this library
#[derive(Debug, Error)]
pub enum MyInfoClientError {
    /// A required configuration parameter is missing, empty or invalid.
    /// Raised when constructing a client.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The client private key could not be used to sign a request
    #[error("signing error: {0}")]
    Signing(String),
    /// Connection failure, timeout or a non 2xx status from the server
    #[error("network error: {message}")]
    Network {
        /// Description of the failure
        message: String,
        /// The response, if the server answered at all
        response: Option<HttpResponse>,
    },
    /// Body could not be parsed or an expected field is absent
    #[error("response format error: {message}")]
    ResponseFormat {
        /// Description of the failure
        message: String,
        /// The offending response
        response: Option<HttpResponse>,
    },
    /// Malformed envelope or failed authenticated decryption
    #[error("decryption error: {0}")]
    Decryption(String),
    /// Signature invalid, algorithm mismatch or claims outside their validity window
    #[error("verification error: {0}")]
    Verification(String),
    /// The authorization code could not be exchanged for an access token
    #[error("token exchange failed: {0}")]
    TokenExchange(#[source] Box<MyInfoClientError>),
}

impl MyInfoClientError {
    pub(crate) fn new_network_error(message: &str, response: Option<HttpResponse>) -> Self {
        Self::Network {
            message: message.to_string(),
            response,
        }
    }

    pub(crate) fn new_response_format_error(
        message: &str,
        response: Option<HttpResponse>,
    ) -> Self {
        Self::ResponseFormat {
            message: message.to_string(),
            response,
        }
    }

    /// Returns the error that started the failure chain.
    /// [MyInfoClientError::TokenExchange] is unwrapped, every other variant returns itself.
    pub fn root_cause(&self) -> &MyInfoClientError {
        match self {
            Self::TokenExchange(cause) => cause.root_cause(),
            other => other,
        }
    }

    /// The response attached to the error, if any
    pub fn response(&self) -> Option<&HttpResponse> {
        match self.root_cause() {
            Self::Network { response, .. } | Self::ResponseFormat { response, .. } => {
                response.as_ref()
            }
            _ => None,
        }
    }

    /// Network failures are the only ones a caller may reasonably retry.
    /// A retried call signs again with a fresh timestamp and nonce.
    pub fn is_retryable(&self) -> bool {
        matches!(self.root_cause(), Self::Network { .. })
    }
}

/// Return type of the fallible operations of this crate
pub type ClientReturnType<T> = Result<T, Box<MyInfoClientError>>;
