//! One handler per resource family. A handler method formats an
//! [`ApiRequest`] and hands it to the shared transport; converting the
//! answer is a plain wrap into the model type.

pub mod album;
pub mod artist;
pub mod playlist;
pub mod track;
pub mod user;

pub use album::AlbumHandler;
pub use artist::ArtistHandler;
pub use playlist::PlaylistHandler;
pub use track::TrackHandler;
pub use user::UserHandler;

use crate::api::{ApiRequest, Transport};
use crate::error::Result;
use crate::models::{Collection, Model};
use crate::options::SearchOptions;
use serde_json::Value;

pub trait ResourceHandler {
    type Model: Model;

    fn transport(&self) -> &dyn Transport;

    /// Wrap one raw item into the model type. Pure: no I/O, payload untouched.
    fn convert(&self, item: Value) -> Self::Model {
        Self::Model::from_raw(item)
    }
}

pub(crate) async fn fetch_one<M: Model>(transport: &dyn Transport, request: ApiRequest) -> Result<M> {
    let body = transport.execute(request).await?;
    Ok(M::from_raw(body))
}

pub(crate) async fn fetch_page<M: Model>(
    transport: &dyn Transport,
    request: ApiRequest,
    key: &str,
) -> Result<Collection<M>> {
    let body = transport.execute(request).await?;
    Collection::from_json(body, key)
}

/// `GET /search?type={kind}&q={query}` followed by the caller's options.
pub(crate) fn search_request(kind: &str, query: &str, options: &SearchOptions) -> ApiRequest {
    ApiRequest::get("/search")
        .query("type", kind)
        .query("q", query)
        .params(options)
}
