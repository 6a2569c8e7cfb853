//! Transport boundary between the client and the remote endpoint.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::error::QueryError;

/// Public Rick and Morty GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://rickandmortyapi.com/graphql";

/// Executes one GraphQL POST and returns the raw response body.
///
/// Implementations are called from worker threads.
pub trait Transport: Send + Sync {
    fn post_json(&self, body: &serde_json::Value) -> Result<Vec<u8>, QueryError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransportBuilder {
    endpoint: String,
    user_agent: String,
    timeout: Duration,
}

impl HttpTransportBuilder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_agent: concat!("charpage/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<HttpTransport, QueryError> {
        let client = Client::builder()
            .user_agent(self.user_agent)
            .timeout(self.timeout)
            .build()?;
        Ok(HttpTransport {
            endpoint: self.endpoint,
            client,
        })
    }
}

/// Blocking HTTP transport over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: String,
    client: Client,
}

impl HttpTransport {
    pub fn builder(endpoint: impl Into<String>) -> HttpTransportBuilder {
        HttpTransportBuilder::new(endpoint)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, body: &serde_json::Value) -> Result<Vec<u8>, QueryError> {
        let payload = serde_json::to_vec(body)?;
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(payload)
            .send()?;

        let status = response.status();
        let bytes = response.bytes()?;
        if status.is_success() {
            Ok(bytes.to_vec())
        } else {
            Err(QueryError::HttpStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            })
        }
    }
}
