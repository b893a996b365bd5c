use super::{fetch_one, fetch_page, search_request, ResourceHandler};
use crate::api::{ApiRequest, Transport};
use crate::error::Result;
use crate::models::{Collection, Track};
use crate::options::{MarketOptions, SearchOptions};
use std::sync::Arc;

#[derive(Clone)]
pub struct TrackHandler {
    transport: Arc<dyn Transport>,
}

impl TrackHandler {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn search(&self, query: &str, options: &SearchOptions) -> Result<Collection<Track>> {
        fetch_page(self.transport(), search_request("track", query, options), "tracks").await
    }

    pub async fn get(&self, id: &str, options: &MarketOptions) -> Result<Track> {
        let request = ApiRequest::get(format!("/tracks/{}", id)).params(options);
        fetch_one(self.transport(), request).await
    }

    /// Several tracks in one call (the API caps `ids` at 50).
    pub async fn several(&self, ids: &[&str], options: &MarketOptions) -> Result<Collection<Track>> {
        let request = ApiRequest::get("/tracks")
            .query("ids", ids.join(","))
            .params(options);
        fetch_page(self.transport(), request, "tracks").await
    }
}

impl ResourceHandler for TrackHandler {
    type Model = Track;

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}
