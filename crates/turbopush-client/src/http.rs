//! HTTP backend abstraction for the Turbo Push API.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest against the loopback service.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use serde_json::Value;

/// Trait for HTTP backends that can talk to the local service.
///
/// This abstraction allows for dependency injection of HTTP clients,
/// making it easy to test code that depends on HTTP requests.
///
/// The token is passed per request because a successful login rotates it.
/// It is sent raw in the `Authorization` header (no `Bearer` prefix); that
/// is the service's wire contract.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Issue a GET with optional query parameters, returning the raw body.
    async fn get(
        &self,
        url: &str,
        token: Option<&str>,
        query: &[(&'static str, String)],
    ) -> ClientResult<Value>;

    /// Issue a POST with an optional JSON body, returning the raw body.
    async fn post(
        &self,
        url: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> ClientResult<Value>;
}

/// Production HTTP backend using reqwest.
///
/// The service sometimes answers with plain text instead of JSON (e.g. raw
/// error pages); those bodies are surfaced as JSON strings rather than
/// errors, matching how callers of the service treat them.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .expect("failed to create HTTP client");

        Self { client }
    }

    fn apply_token(
        request: reqwest::RequestBuilder,
        token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        match token {
            Some(token) => request.header("Authorization", token),
            None => request,
        }
    }

    async fn read_body(response: reqwest::Response) -> ClientResult<Value> {
        let text = response.text().await?;
        // Parsed JSON when possible, raw text otherwise
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get(
        &self,
        url: &str,
        token: Option<&str>,
        query: &[(&'static str, String)],
    ) -> ClientResult<Value> {
        let request = Self::apply_token(self.client.get(url), token).query(query);
        let response = request.send().await?;
        Self::read_body(response).await
    }

    async fn post(
        &self,
        url: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> ClientResult<Value> {
        let mut request = Self::apply_token(self.client.post(url), token);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        Self::read_body(response).await
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================


#[cfg(test)]
mod tests {
    use super::testing::FakeBackend;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reqwest_backend_creation() {
        let config = ClientConfig::for_port(8910);
        let _backend = ReqwestBackend::new(&config);
    }

    #[tokio::test]
    async fn test_fake_backend_returns_canned_response() {
        let backend =
            FakeBackend::new().with_response("/account/list", json!({"code": 0, "data": []}));

        let result = backend
            .get("http://127.0.0.1:8910/account/list", None, &[])
            .await
            .unwrap();
        assert_eq!(result["code"], 0);
    }

    #[tokio::test]
    async fn test_fake_backend_errors_for_unknown_url() {
        let backend = FakeBackend::new();
        let result = backend.get("http://127.0.0.1:8910/unknown", None, &[]).await;
        assert!(matches!(result, Err(ClientError::InvalidResponse { .. })));
    }

    #[tokio::test]
    async fn test_fake_backend_records_requests() {
        let backend = FakeBackend::new().with_response("/user/login", json!({"code": 0}));

        backend
            .post(
                "http://127.0.0.1:8910/user/login",
                None,
                Some(&json!({"code": "123456"})),
            )
            .await
            .unwrap();

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].body, Some(json!({"code": "123456"})));
    }
}
