//! The Turbo Push API client.
//!
//! Every method is a one-to-one mapping of an HTTP endpoint served by the
//! launched binary; there is no logic here beyond envelope unwrapping and
//! the login token rotation.

use crate::config::ClientConfig;
use crate::envelope::Envelope;
use crate::error::ClientResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::{
    Account, ContentPayload, LoginData, PlatformQuery, PublishRequest, RecordQuery,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

/// Client for the REST API served by a running Turbo Push binary.
///
/// Construct one from a [`ClientConfig`], typically via the launcher's
/// `client()` once the handshake has been observed.
pub struct TurboPushClient {
    backend: Arc<dyn HttpBackend>,
    base_url: String,
    token: Option<String>,
}

impl TurboPushClient {
    /// Create a client with the production reqwest backend.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let backend = Arc::new(ReqwestBackend::new(&config));
        Self::with_backend(config, backend)
    }

    /// Create a client over a custom HTTP backend (dependency injection
    /// seam, used by tests).
    #[must_use]
    pub fn with_backend(config: ClientConfig, backend: Arc<dyn HttpBackend>) -> Self {
        Self {
            backend,
            base_url: config.base_url,
            token: config.token,
        }
    }

    /// The current auth token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Replace the auth token.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> ClientResult<T> {
        let body = self
            .backend
            .get(&self.url(path), self.token.as_deref(), query)
            .await?;
        Envelope::decode(body)?.into_data()
    }

    async fn post_data<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&Value>,
    ) -> ClientResult<T> {
        let body = self
            .backend
            .post(&self.url(path), self.token.as_deref(), body)
            .await?;
        Envelope::decode(body)?.into_data()
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    /// `POST /user/login` with a verification code from the Turbo Push UI.
    ///
    /// On success the returned `secure.openID` becomes this client's auth
    /// token for subsequent requests.
    pub async fn login(&mut self, code: &str) -> ClientResult<LoginData> {
        let data: LoginData = self
            .post_data("/user/login", Some(&json!({"code": code})))
            .await?;
        if let Some(open_id) = data.secure.open_id.clone() {
            debug!("login succeeded, rotating auth token");
            self.token = Some(open_id);
        }
        Ok(data)
    }

    // ------------------------------------------------------------------
    // Accounts & platforms
    // ------------------------------------------------------------------

    /// `GET /account/list` — every account the binary knows about.
    pub async fn accounts(&self) -> ClientResult<Vec<Account>> {
        self.get_data("/account/list", &[]).await
    }

    /// `GET /account/logged` — accounts with a live platform session.
    pub async fn logged_accounts(&self) -> ClientResult<Vec<Account>> {
        self.get_data("/account/logged", &[]).await
    }

    /// `GET /platform/list` with optional capability filters.
    pub async fn platforms(&self, query: &PlatformQuery) -> ClientResult<Value> {
        self.get_data("/platform/list", &query.to_query()).await
    }

    // ------------------------------------------------------------------
    // Content creation
    // ------------------------------------------------------------------

    /// `POST /article/create` — open a fresh article draft.
    pub async fn create_article(&self) -> ClientResult<Value> {
        self.post_data("/article/create", None).await
    }

    /// `POST /graphText/create` — create an image-and-text draft.
    pub async fn create_graph_text(&self, payload: &ContentPayload) -> ClientResult<Value> {
        self.post_data("/graphText/create", Some(&serde_json::to_value(payload)?))
            .await
    }

    /// `POST /video/create` — create a video draft (single file).
    pub async fn create_video(&self, payload: &ContentPayload) -> ClientResult<Value> {
        self.post_data("/video/create", Some(&serde_json::to_value(payload)?))
            .await
    }

    // ------------------------------------------------------------------
    // Publishing
    // ------------------------------------------------------------------

    /// `POST /sse/article/{id}` — publish an article draft.
    pub async fn publish_article(
        &self,
        article_id: &str,
        request: &PublishRequest,
    ) -> ClientResult<Value> {
        self.post_data(
            &format!("/sse/article/{article_id}"),
            Some(&serde_json::to_value(request)?),
        )
        .await
    }

    /// `POST /sse/graphText/{id}` — publish a graph-text draft.
    pub async fn publish_graph_text(
        &self,
        graph_text_id: &str,
        request: &PublishRequest,
    ) -> ClientResult<Value> {
        self.post_data(
            &format!("/sse/graphText/{graph_text_id}"),
            Some(&serde_json::to_value(request)?),
        )
        .await
    }

    /// `POST /sse/video/{id}` — publish a video draft.
    pub async fn publish_video(
        &self,
        video_id: &str,
        request: &PublishRequest,
    ) -> ClientResult<Value> {
        self.post_data(
            &format!("/sse/video/{video_id}"),
            Some(&serde_json::to_value(request)?),
        )
        .await
    }

    // ------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------

    /// `GET /record/list` — publish history, filtered and paged.
    pub async fn records(&self, query: &RecordQuery) -> ClientResult<Value> {
        self.get_data("/record/list", &query.to_query()).await
    }

    /// `GET /record/info/{id}` — detail for one publish record.
    pub async fn record_info(&self, record_id: &str) -> ClientResult<Value> {
        self.get_data(&format!("/record/info/{record_id}"), &[])
            .await
    }
}
