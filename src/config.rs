use crate::api::http::DEFAULT_API_BASE;
use crate::auth::DEFAULT_AUTH_BASE;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_auth_base")]
    pub auth_base: String,

    // Credentials: either a ready-made bearer token, or an app id/secret
    // pair exchanged through the client-credentials grant.
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Default market for catalog lookups (ISO 3166-1 alpha-2).
    #[serde(default)]
    pub market: Option<String>,

    /// Directory for daily-rotated log files; stderr only when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_api_base() -> String { DEFAULT_API_BASE.into() }
fn default_auth_base() -> String { DEFAULT_AUTH_BASE.into() }

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            auth_base: default_auth_base(),
            access_token: None,
            client_id: None,
            client_secret: None,
            market: None,
            log_dir: None,
        }
    }
}

impl Config {
    pub fn from_path(path: &std::path::Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&s)?;
        Ok(cfg.without_blank_credentials())
    }

    /// Overlay `SPOTIFY_*` environment variables on top of the file values.
    pub fn apply_env(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`; empty values are ignored.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(v) = get("SPOTIFY_API_BASE") {
            self.api_base = v;
        }
        if let Some(v) = get("SPOTIFY_AUTH_BASE") {
            self.auth_base = v;
        }
        if let Some(v) = get("SPOTIFY_ACCESS_TOKEN") {
            self.access_token = Some(v);
        }
        if let Some(v) = get("SPOTIFY_CLIENT_ID") {
            self.client_id = Some(v);
        }
        if let Some(v) = get("SPOTIFY_CLIENT_SECRET") {
            self.client_secret = Some(v);
        }
        if let Some(v) = get("SPOTIFY_MARKET") {
            self.market = Some(v);
        }
        self
    }

    /// Configured bearer token, ignoring a blank `access_token = ""`.
    pub fn bearer_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.trim().is_empty())
    }

    fn without_blank_credentials(mut self) -> Self {
        let blank = |v: &Option<String>| v.as_ref().map_or(false, |s| s.trim().is_empty());
        if blank(&self.access_token) {
            self.access_token = None;
        }
        if blank(&self.client_id) {
            self.client_id = None;
        }
        if blank(&self.client_secret) {
            self.client_secret = None;
        }
        self
    }

    /// Both halves of the client-credentials pair are present and non-empty.
    pub fn has_client_credentials(&self) -> bool {
        matches!(
            (&self.client_id, &self.client_secret),
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty()
        )
    }
}
