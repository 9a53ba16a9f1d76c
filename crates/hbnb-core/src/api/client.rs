//! API client for communicating with the HBnB REST API.
//!
//! This module provides the `Transport` trait and the `ApiClient` struct,
//! which sends JSON POST requests with an optional bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::ApiError;

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| {
            ApiError::InvalidResponse(format!(
                "{} (body: {})",
                e,
                ApiError::truncate_body(&self.body)
            ))
        })
    }

    /// The server-provided `message` field of an error body, if any
    pub fn message(&self) -> Option<String> {
        serde_json::from_str::<ErrorBody>(&self.body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
    }

    /// Server message, falling back to the status line when the body has none
    pub fn error_message(&self) -> String {
        self.message().unwrap_or_else(|| {
            match reqwest::StatusCode::from_u16(self.status) {
                Ok(status) => status.to_string(),
                Err(_) => format!("HTTP {}", self.status),
            }
        })
    }
}

/// A single JSON POST against a remote endpoint.
///
/// Implementations must not retry: one call is one request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &serde_json::Value,
    ) -> Result<HttpReply, ApiError>;
}

/// API client for the HBnB endpoints.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    /// Create a new API client; `timeout` bounds each request
    pub fn with_timeout(timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    fn headers(bearer: Option<&str>) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(token) = bearer {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::InvalidHeader(e.to_string()))?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn post_json(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &serde_json::Value,
    ) -> Result<HttpReply, ApiError> {
        let response = self
            .client
            .post(url)
            .headers(Self::headers(bearer)?)
            .body(body.to_string())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(url = url, status = status, "POST completed");

        Ok(HttpReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_success_range() {
        assert!(HttpReply::new(200, "").is_success());
        assert!(HttpReply::new(201, "").is_success());
        assert!(!HttpReply::new(302, "").is_success());
        assert!(!HttpReply::new(401, "").is_success());
    }

    #[test]
    fn test_reply_message() {
        let reply = HttpReply::new(401, r#"{"message":"bad creds"}"#);
        assert_eq!(reply.message().as_deref(), Some("bad creds"));
        assert_eq!(reply.error_message(), "bad creds");

        // Non-JSON bodies fall back to the status line
        let reply = HttpReply::new(500, "<html>oops</html>");
        assert_eq!(reply.message(), None);
        assert_eq!(reply.error_message(), "500 Internal Server Error");

        // Empty messages are treated as absent
        let reply = HttpReply::new(400, r#"{"message":""}"#);
        assert_eq!(reply.error_message(), "400 Bad Request");
    }

    #[test]
    fn test_reply_json() {
        #[derive(Deserialize)]
        struct Token {
            access_token: String,
        }

        let reply = HttpReply::new(200, r#"{"access_token":"T"}"#);
        let token: Token = reply.json().expect("valid token body");
        assert_eq!(token.access_token, "T");

        let reply = HttpReply::new(200, "not json");
        assert!(matches!(
            reply.json::<Token>(),
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_headers() {
        let headers = ApiClient::headers(Some("abc")).expect("valid headers");
        assert_eq!(headers[header::AUTHORIZATION], "Bearer abc");
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");

        let headers = ApiClient::headers(None).expect("valid headers");
        assert!(headers.get(header::AUTHORIZATION).is_none());

        // Control characters cannot travel in a header
        assert!(matches!(
            ApiClient::headers(Some("bad\ntoken")),
            Err(ApiError::InvalidHeader(_))
        ));
    }
}
