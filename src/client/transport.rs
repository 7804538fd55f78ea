use crate::error::D1Error;
use std::fmt;
use std::time::Duration;

/// A fully built outbound request.
#[derive(Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    /// Value of the first header with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if k.eq_ignore_ascii_case("authorization") {
                    (k.as_str(), "[REDACTED]")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();
        f.debug_struct("HttpRequest")
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body", &self.body)
            .finish()
    }
}

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Blocking HTTP POST used by the client.
///
/// Implementations return `D1Error::Transport` only when no response was
/// received. Any HTTP status, including 4xx and 5xx, is a successful
/// exchange at this layer.
pub trait Transport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, D1Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, D1Error> {
        (**self).send(request)
    }
}

/// Default transport backed by `reqwest`'s blocking client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, D1Error> {
        Self::with_timeout(None)
    }

    /// Build a transport with an overall per-request timeout; `None`
    /// disables reqwest's 30s default.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, D1Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("d1query/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| D1Error::Transport {
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }

    /// Wrap a preconfigured client (proxies, TLS roots, custom headers).
    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, D1Error> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let resp = builder
            .body(request.body)
            .send()
            .map_err(|e| D1Error::Transport {
                message: format!("request to {} failed: {}", request.url, e),
            })?;

        let status = resp.status().as_u16();
        let body = resp.text().map_err(|e| D1Error::Transport {
            message: format!("failed to read response body: {}", e),
        })?;

        Ok(HttpResponse { status, body })
    }
}
