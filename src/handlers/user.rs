use super::{fetch_one, fetch_page, ResourceHandler};
use crate::api::{ApiRequest, Transport};
use crate::error::Result;
use crate::models::{Collection, Playlist, User};
use crate::options::PageOptions;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserHandler {
    transport: Arc<dyn Transport>,
}

impl UserHandler {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Profile of the token's owner.
    pub async fn me(&self) -> Result<User> {
        fetch_one(self.transport(), ApiRequest::get("/me").authenticated()).await
    }

    pub async fn get(&self, user_id: &str) -> Result<User> {
        fetch_one(self.transport(), ApiRequest::get(format!("/users/{}", user_id))).await
    }

    /// Public playlists owned or followed by a user.
    pub async fn playlists(&self, user_id: &str, options: &PageOptions) -> Result<Collection<Playlist>> {
        let request = ApiRequest::get(format!("/users/{}/playlists", user_id)).params(options);
        fetch_page(self.transport(), request, "items").await
    }
}

impl ResourceHandler for UserHandler {
    type Model = User;

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}
