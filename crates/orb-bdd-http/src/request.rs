//! Resolved request description

use std::collections::BTreeMap;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::HttpError;
use crate::Result;

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A request whose URL and body are fully resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Add a header (builder pattern).
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the body and its content type.
    pub fn with_body(self, body: impl Into<String>, content_type: &str) -> Self {
        let mut request = self.with_header(CONTENT_TYPE, content_type);
        request.body = Some(body.into());
        request
    }

    /// Attach `Authorization: Bearer <token>` unless the token is empty.
    pub fn with_bearer_token(self, token: &str) -> Self {
        if token.is_empty() {
            return self;
        }
        self.with_header(AUTHORIZATION, format!("Bearer {token}"))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Body template of a request, resolved before sending
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON document; string leaves are resolved
    Json(Value),
    /// Raw text template with an explicit content type
    Raw { content: String, content_type: String },
}

impl RequestBody {
    pub fn raw(content: impl Into<String>, content_type: impl Into<String>) -> Self {
        RequestBody::Raw {
            content: content.into(),
            content_type: content_type.into(),
        }
    }
}

/// Path component of a URL, used as the auth token key.
pub fn url_path(url: &str) -> Result<String> {
    Url::parse(url)
        .map(|u| u.path().to_string())
        .map_err(|e| HttpError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_path() {
        assert_eq!(
            url_path("https://orb.domain1.com/services/orb/outbox?page=true").unwrap(),
            "/services/orb/outbox"
        );
        assert!(matches!(
            url_path("/relative/only"),
            Err(HttpError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_empty_token_sends_unauthenticated() {
        let request = HttpRequest::new("GET", "https://a/b").with_bearer_token("");
        assert_eq!(request.header(AUTHORIZATION), None);

        let request = HttpRequest::new("GET", "https://a/b").with_bearer_token("T1");
        assert_eq!(request.header(AUTHORIZATION), Some("Bearer T1"));
    }

    #[test]
    fn test_with_body_sets_content_type() {
        let request = HttpRequest::new("POST", "https://a/b").with_body("{}", JSON_CONTENT_TYPE);
        assert_eq!(request.header(CONTENT_TYPE), Some(JSON_CONTENT_TYPE));
        assert_eq!(request.body.as_deref(), Some("{}"));
    }
}
