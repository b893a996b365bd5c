use super::{ApiRequest, Transport};
use crate::error::{ApiError, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

/// Base URL of the public Web API, `v1` path included.
pub const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1";

/// Transport backed by reqwest. One attempt per request: no retry, no
/// backoff, no timeout beyond what the underlying client does.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    /// Build on top of an existing reqwest client (shared connection pool,
    /// custom TLS settings).
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        Url::parse(base_url)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
            ..self
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Absolute URL for a path fragment.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn handle_response(response: Response) -> Result<Value> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("Spotify API error ({}): {}", status, text);
            return Err(ApiError::from_status(status.as_u16(), text));
        }

        // 201/204 on write endpoints may come back without a body
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value> {
        // Snapshot the token once; a concurrent rotation only affects later requests.
        let token = self.token.read().await.clone();
        if request.auth && token.is_none() {
            warn!("{} {} requires an access token", request.method, request.path);
            return Err(ApiError::MissingToken { path: request.path });
        }

        let url = self.url_for(&request.path);
        debug!(
            "{} {} ({} query params, body: {})",
            request.method,
            url,
            request.query.len(),
            request.body.is_some()
        );

        let mut builder = self
            .client
            .request(request.method, &url)
            .header(ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        Self::handle_response(response).await
    }

    async fn set_token(&self, token: Option<String>) {
        let mut lock = self.token.write().await;
        *lock = token;
    }

    async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }
}
