//! Retrieving playlists and managing their tracks.
//!
//! Endpoint reference: https://developer.spotify.com/documentation/web-api/reference/

use super::{fetch_one, fetch_page, search_request, ResourceHandler};
use crate::api::{ApiRequest, Transport};
use crate::error::{ApiError, Result};
use crate::models::{Collection, Model, Playlist};
use crate::options::{BrowseOptions, MarketOptions, ModifyTracksOptions, SearchOptions};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct PlaylistHandler {
    transport: Arc<dyn Transport>,
}

impl PlaylistHandler {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Playlists matching a keyword string. No token required.
    pub async fn search(&self, query: &str, options: &SearchOptions) -> Result<Collection<Playlist>> {
        fetch_page(
            self.transport(),
            search_request("playlist", query, options),
            "playlists",
        )
        .await
    }

    /// Editorially featured playlists. Requires a token.
    pub async fn featured_playlists(&self, options: &BrowseOptions) -> Result<Collection<Playlist>> {
        let request = ApiRequest::get("/browse/featured-playlists")
            .params(options)
            .authenticated();
        fetch_page(self.transport(), request, "playlists").await
    }

    /// Playlists tagged with a browse category. Requires a token.
    pub async fn categories_playlists(
        &self,
        category_id: &str,
        options: &BrowseOptions,
    ) -> Result<Collection<Playlist>> {
        let request = ApiRequest::get(format!("/browse/categories/{}/playlists", category_id))
            .params(options)
            .authenticated();
        fetch_page(self.transport(), request, "playlists").await
    }

    /// Single item by id, resolved through `/tracks/{id}`.
    ///
    /// Kept for parity with existing callers that rely on this path; use
    /// [`PlaylistHandler::lookup`] to hit `/playlists/{id}`.
    pub async fn get(&self, id: &str) -> Result<Playlist> {
        fetch_one(self.transport(), ApiRequest::get(format!("/tracks/{}", id))).await
    }

    /// Single playlist from `/playlists/{id}`.
    pub async fn lookup(&self, id: &str, options: &MarketOptions) -> Result<Playlist> {
        let request = ApiRequest::get(format!("/playlists/{}", id)).params(options);
        fetch_one(self.transport(), request).await
    }

    /// Add track URIs to a user's playlist. Requires a token with a
    /// playlist-modify scope; the API answers 403 otherwise.
    pub async fn add_tracks<S: AsRef<str>>(
        &self,
        uris: &[S],
        playlist: &Playlist,
        options: &ModifyTracksOptions,
    ) -> Result<()> {
        let request = ApiRequest::post(tracks_path(playlist)?)
            .params(options)
            .json(uris_body(uris))
            .authenticated();
        debug!("adding {} tracks to playlist {:?}", uris.len(), playlist.id());
        self.transport.execute(request).await?;
        Ok(())
    }

    /// Remove track URIs from a user's playlist. Same path and body shape as
    /// [`PlaylistHandler::add_tracks`], sent with DELETE.
    pub async fn remove_tracks<S: AsRef<str>>(&self, uris: &[S], playlist: &Playlist) -> Result<()> {
        let request = ApiRequest::delete(tracks_path(playlist)?)
            .json(uris_body(uris))
            .authenticated();
        debug!("removing {} tracks from playlist {:?}", uris.len(), playlist.id());
        self.transport.execute(request).await?;
        Ok(())
    }
}

impl ResourceHandler for PlaylistHandler {
    type Model = Playlist;

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}

fn tracks_path(playlist: &Playlist) -> Result<String> {
    let owner = playlist.owner_id().ok_or(ApiError::MissingField("owner.id"))?;
    let id = playlist.id().ok_or(ApiError::MissingField("id"))?;
    Ok(format!("/users/{}/playlists/{}/tracks", owner, id))
}

fn uris_body<S: AsRef<str>>(uris: &[S]) -> serde_json::Value {
    let uris: Vec<&str> = uris.iter().map(AsRef::as_ref).collect();
    json!({ "uris": uris })
}
