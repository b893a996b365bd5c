use crate::api::http::HttpTransport;
use crate::api::Transport;
use crate::auth;
use crate::config::Config;
use crate::error::Result;
use crate::handlers::{AlbumHandler, ArtistHandler, PlaylistHandler, TrackHandler, UserHandler};
use std::sync::Arc;
use tracing::{info, warn};

/// Entry point: one transport shared by one handler per resource family.
///
/// ```no_run
/// # async fn run() -> spotify_web_handlers::error::Result<()> {
/// use spotify_web_handlers::{Config, Spotify};
/// use spotify_web_handlers::options::SearchOptions;
///
/// let spotify = Spotify::new(&Config::default())?;
/// let found = spotify.playlists().search("chill", &SearchOptions::default()).await?;
/// println!("{} playlists", found.total());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Spotify {
    transport: Arc<dyn Transport>,
    playlists: PlaylistHandler,
    tracks: TrackHandler,
    albums: AlbumHandler,
    artists: ArtistHandler,
    users: UserHandler,
}

impl Spotify {
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            playlists: PlaylistHandler::new(Arc::clone(&transport)),
            tracks: TrackHandler::new(Arc::clone(&transport)),
            albums: AlbumHandler::new(Arc::clone(&transport)),
            artists: ArtistHandler::new(Arc::clone(&transport)),
            users: UserHandler::new(Arc::clone(&transport)),
            transport,
        }
    }

    /// HTTP transport against `config.api_base`, seeded with
    /// `config.access_token` when present.
    pub fn new(config: &Config) -> Result<Self> {
        let mut transport = HttpTransport::new(&config.api_base)?;
        if let Some(token) = config.bearer_token() {
            transport = transport.with_token(token);
        }
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Like [`Spotify::new`], but when no usable access token is configured
    /// and a client id/secret pair is, obtain an app token first.
    pub async fn connect(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(&config.api_base)?;
        let token = match (config.bearer_token(), &config.client_id, &config.client_secret) {
            (Some(token), _, _) => Some(token.to_string()),
            (None, Some(id), Some(secret)) if config.has_client_credentials() => {
                let tok =
                    auth::request_client_token(transport.client(), &config.auth_base, id, secret)
                        .await?;
                info!(
                    "obtained client-credentials {} token (scope: {:?}, expires_at={})",
                    tok.token_type, tok.scope, tok.expires_at
                );
                if tok.is_expired() {
                    warn!("client-credentials token expires within 30 seconds");
                }
                Some(tok.access_token)
            }
            _ => None,
        };
        let transport = match token {
            Some(t) => transport.with_token(t),
            None => transport,
        };
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn playlists(&self) -> &PlaylistHandler {
        &self.playlists
    }

    pub fn tracks(&self) -> &TrackHandler {
        &self.tracks
    }

    pub fn albums(&self) -> &AlbumHandler {
        &self.albums
    }

    pub fn artists(&self) -> &ArtistHandler {
        &self.artists
    }

    pub fn users(&self) -> &UserHandler {
        &self.users
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Rotate the bearer token for every handler. Requests already in
    /// flight keep the token they were built with.
    pub async fn set_token(&self, token: impl Into<String>) {
        self.transport.set_token(Some(token.into())).await;
    }

    pub async fn clear_token(&self) {
        self.transport.set_token(None).await;
    }

    pub async fn token(&self) -> Option<String> {
        self.transport.token().await
    }
}
