//! Default Http Client

use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, ClientBuilder, Method, Response};

use crate::types::http_client::{HttpMethod, HttpRequest, HttpResponse, MyInfoHttpClient};

/// The default HttpClient, backed by [reqwest]
#[derive(Debug, Clone)]
pub struct DefaultHttpClient {
    client: reqwest::Client,
}

impl DefaultHttpClient {
    /// Builds the client. Connecting is capped at 10 seconds, the rest of the request is bounded
    /// by [HttpRequest::timeout].
    pub fn new() -> Result<Self, String> {
        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("myinfo-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| format!("{e}"))?;

        Ok(Self { client })
    }

    async fn to_response(response: Response) -> HttpResponse {
        let status_code = response.status().as_u16();

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .map(|ct| ct.to_string());

        let body = match response.text().await {
            Ok(body_string) if !body_string.is_empty() => Some(body_string),
            _ => None,
        };

        HttpResponse {
            body,
            status_code,
            content_type,
        }
    }
}

impl MyInfoHttpClient for DefaultHttpClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, String> {
        let method = match req.method {
            HttpMethod::GET => Method::GET,
            HttpMethod::POST => Method::POST,
        };

        let mut req_builder = self.client.request(method, req.url);

        if let Some(timeout) = req.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        if let Some(body) = req.body {
            req_builder = req_builder.body(body);
        }

        for (name, values) in req.headers {
            for value in values {
                req_builder = req_builder.header(name.clone(), value);
            }
        }

        match req_builder.send().await {
            Ok(res) => Ok(Self::to_response(res).await),
            Err(e) if e.is_timeout() => Err(format!("request timed out ({e})")),
            Err(e) => Err(format!("{e}")),
        }
    }
}
