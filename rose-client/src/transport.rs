//! HTTP transport abstraction.
//!
//! The client only needs "send this verb to this path, give me the body".
//! [`HttpTransport`] does that over `reqwest`; tests can substitute anything
//! implementing [`Transport`].

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{TransportError, TransportResult};

/// The HTTP verbs used by the entity protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

/// Sends one request and returns the raw response body.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `path` is rooted at the server's API prefix and starts with `/`.
    async fn send(&self, method: Method, path: &str, body: Option<String>)
    -> TransportResult<String>;
}

/// [`Transport`] over a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    config: ClientConfig,
    client: Client,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> TransportResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> TransportResult<String> {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let mut request = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "text/plain; charset=utf-8")
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.text().await?)
    }
}
