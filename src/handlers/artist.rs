use super::{fetch_one, fetch_page, search_request, ResourceHandler};
use crate::api::{ApiRequest, Transport};
use crate::error::Result;
use crate::models::{Album, Artist, Collection, Track};
use crate::options::{PageOptions, SearchOptions};
use std::sync::Arc;

#[derive(Clone)]
pub struct ArtistHandler {
    transport: Arc<dyn Transport>,
}

impl ArtistHandler {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn search(&self, query: &str, options: &SearchOptions) -> Result<Collection<Artist>> {
        fetch_page(self.transport(), search_request("artist", query, options), "artists").await
    }

    pub async fn get(&self, id: &str) -> Result<Artist> {
        fetch_one(self.transport(), ApiRequest::get(format!("/artists/{}", id))).await
    }

    pub async fn albums(&self, id: &str, options: &PageOptions) -> Result<Collection<Album>> {
        let request = ApiRequest::get(format!("/artists/{}/albums", id)).params(options);
        fetch_page(self.transport(), request, "items").await
    }

    /// Top tracks in a market. The API answers a bare array, so the
    /// collection is always a single page.
    pub async fn top_tracks(&self, id: &str, market: &str) -> Result<Collection<Track>> {
        let request = ApiRequest::get(format!("/artists/{}/top-tracks", id)).query("market", market);
        fetch_page(self.transport(), request, "tracks").await
    }
}

impl ResourceHandler for ArtistHandler {
    type Model = Artist;

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}
