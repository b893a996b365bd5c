use super::{fetch_one, fetch_page, search_request, ResourceHandler};
use crate::api::{ApiRequest, Transport};
use crate::error::Result;
use crate::models::{Album, Collection, Track};
use crate::options::{MarketOptions, PageOptions, SearchOptions};
use std::sync::Arc;

#[derive(Clone)]
pub struct AlbumHandler {
    transport: Arc<dyn Transport>,
}

impl AlbumHandler {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn search(&self, query: &str, options: &SearchOptions) -> Result<Collection<Album>> {
        fetch_page(self.transport(), search_request("album", query, options), "albums").await
    }

    pub async fn get(&self, id: &str, options: &MarketOptions) -> Result<Album> {
        let request = ApiRequest::get(format!("/albums/{}", id)).params(options);
        fetch_one(self.transport(), request).await
    }

    /// Track listing of an album. Items are simplified tracks without an
    /// embedded album object.
    pub async fn tracks(&self, id: &str, options: &PageOptions) -> Result<Collection<Track>> {
        let request = ApiRequest::get(format!("/albums/{}/tracks", id)).params(options);
        fetch_page(self.transport(), request, "items").await
    }
}

impl ResourceHandler for AlbumHandler {
    type Model = Album;

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}
