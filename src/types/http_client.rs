//! # Http Client Interface for Custom Http Clients

use std::collections::HashMap;
use std::fmt::Debug;
use std::time::Duration;

use url::Url;

/// The Http methods used against the MyInfo API
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// The GET method is used to retrieve data from a server.
    #[default]
    GET,
    /// The POST method is used to submit data to a server.
    POST,
}

impl HttpMethod {
    /// Upper case name of the method, as used in the signature base string
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
        }
    }
}

/// The expectations set by token exchange and resource fetch
#[derive(Debug, Clone, Copy)]
pub struct HttpResponseExpectations {
    /// Whether or not to expect body with the response
    pub body: bool,
    /// Specifies if the response should be of type json and validates it
    pub json_body: bool,
}

/// # Request
/// Request is an internal struct used to create the MyInfo API requests.
#[derive(Debug)]
pub struct HttpRequest {
    /// Url of the request, including the query string
    pub url: Url,
    /// Http method of the request
    pub method: HttpMethod,
    /// Headers that are sent in the request
    pub headers: HashMap<String, Vec<String>>,
    /// The request body to be sent
    pub body: Option<String>,
    /// Deadline for the whole request. `None` leaves it to the http client.
    pub timeout: Option<Duration>,
    /// Expectations to be fullfilled by the response
    pub(crate) expectations: HttpResponseExpectations,
}

impl HttpRequest {
    pub(crate) fn new(url: Url) -> Self {
        Self {
            url,
            headers: HashMap::new(),
            method: HttpMethod::GET,
            body: None,
            timeout: None,
            expectations: HttpResponseExpectations {
                body: true,
                json_body: true,
            },
        }
    }

    pub(crate) fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub(crate) fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();

        if let Some(values) = self.headers.get_mut(&name) {
            values.push(value);
        } else {
            let values = vec![value];
            self.headers.insert(name, values);
        }
        self
    }

    /// Sets an already url encoded form body
    pub(crate) fn form(mut self, form_body: String) -> Self {
        self.headers.insert(
            "content-type".to_string(),
            vec!["application/x-www-form-urlencoded".to_string()],
        );
        self.body(form_body)
    }

    pub(crate) fn body(mut self, body: String) -> Self {
        self.headers.insert(
            "content-length".to_string(),
            vec![body.len().to_string()],
        );
        self.body = Some(body);
        self
    }

    pub(crate) fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn expect_json_body(mut self, expect: bool) -> Self {
        self.expectations.json_body = expect;
        self
    }
}

/// Represents an HTTP response received from a server.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The HTTP status code of the response (e.g., 200 for success, 404 for Not Found).
    pub status_code: u16,
    /// The content type header
    pub content_type: Option<String>,
    /// The optional body content of the response. None if there is no body content (String).
    pub body: Option<String>,
}

/// This trait defines the interface for making HTTP requests used by this library.
/// Users who need custom HTTP clients need to implement this trait.
pub trait MyInfoHttpClient: Send + Sync {
    /// Makes an HTTP request using the provided HttpRequest object.
    ///
    /// The future resolves to either a `Result<HttpResponse, String>`.
    ///  * On success, the result is `Ok(HttpResponse)` containing the HTTP response, whatever
    ///    its status code.
    ///  * On error (connection refused, timeout...), the result is `Err(String)` with an error
    ///    message describing the failure.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, String>> + Send;
}
