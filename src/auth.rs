use crate::error::{ApiError, Result};
use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_AUTH_BASE: &str = "https://accounts.spotify.com";

/// An app access token obtained from the accounts service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: i64, // epoch seconds
    pub scope: Option<String>,
}

impl AccessToken {
    /// True once the token is within 30 seconds of expiry.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() + 30 >= self.expires_at
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
    scope: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".into()
}

fn default_expires_in() -> i64 {
    3600
}

/// Client-credentials grant: exchanges the app's id and secret for a token
/// that can read public catalog data. It carries no user scopes, so
/// playlist writes still fail with 401/403. Single attempt.
pub async fn request_client_token(
    client: &Client,
    auth_base: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<AccessToken> {
    let url = format!("{}/api/token", auth_base.trim_end_matches('/'));
    let auth_header = format!(
        "Basic {}",
        general_purpose::STANDARD.encode(format!("{}:{}", client_id, client_secret))
    );
    debug!("requesting client-credentials token from {}", url);
    let resp = client
        .post(&url)
        .header(AUTHORIZATION, auth_header)
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        warn!("token request failed: {} => {}", status, text);
        return Err(ApiError::from_status(status.as_u16(), text));
    }
    let tr: TokenResponse = serde_json::from_str(&text)?;
    Ok(AccessToken {
        access_token: tr.access_token,
        token_type: tr.token_type,
        expires_at: Utc::now().timestamp() + tr.expires_in,
        scope: tr.scope,
    })
}
