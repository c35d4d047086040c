//! Request transport
//!
//! [`RequestSender`] is the seam between resolved requests and the wire.
//! [`ReqwestSender`] talks to a live deployment; tests use
//! [`crate::fakes::RecordingSender`].

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use orb_bdd_state::ResponseState;
use reqwest::Method;
use tracing::{debug, info, warn};

use crate::config::HttpConfig;
use crate::error::HttpError;
use crate::request::HttpRequest;
use crate::Result;

/// Sends a resolved request and returns the response.
///
/// Implementations must be shareable across concurrent requests.
#[async_trait]
pub trait RequestSender: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> Result<ResponseState>;
}

/// [`RequestSender`] backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestSender {
    config: HttpConfig,
    client: reqwest::Client,
}

impl ReqwestSender {
    /// Create a sender with the given configuration
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(ReqwestSender { config, client })
    }

    /// Create a sender from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(HttpConfig::from_env())
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Convert to a `reqwest::Request` without sending it
    pub fn build_request(&self, request: &HttpRequest) -> Result<reqwest::Request> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| HttpError::InvalidMethod(request.method.clone()))?;

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        Ok(builder.build()?)
    }
}

#[async_trait]
impl RequestSender for ReqwestSender {
    async fn send(&self, request: &HttpRequest) -> Result<ResponseState> {
        let built = self.build_request(request)?;
        info!(method = %request.method, url = %request.url, "Sending request");

        let response = self.client.execute(built).await.map_err(|e| {
            warn!(method = %request.method, url = %request.url, error = %e, "Request failed");
            HttpError::from(e)
        })?;

        let status = response.status().as_u16();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        debug!(status, bytes = body.len(), "Received response");

        Ok(ResponseState {
            status,
            headers,
            body,
        })
    }
}
