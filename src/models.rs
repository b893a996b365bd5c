use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A thin wrapper over one raw JSON object returned by the API.
/// Wrapping never alters the payload; accessors read from it lazily.
pub trait Model: Sized {
    fn from_raw(raw: Value) -> Self;
    fn raw(&self) -> &Value;
    fn into_raw(self) -> Value;

    fn id(&self) -> Option<&str> {
        str_at(self.raw(), &["id"])
    }

    fn name(&self) -> Option<&str> {
        str_at(self.raw(), &["name"])
    }

    fn uri(&self) -> Option<&str> {
        str_at(self.raw(), &["uri"])
    }

    fn href(&self) -> Option<&str> {
        str_at(self.raw(), &["href"])
    }
}

fn str_at<'a>(raw: &'a Value, path: &[&str]) -> Option<&'a str> {
    path.iter()
        .try_fold(raw, |v, key| v.get(*key))
        .and_then(Value::as_str)
}

fn u64_at(raw: &Value, path: &[&str]) -> Option<u64> {
    path.iter()
        .try_fold(raw, |v, key| v.get(*key))
        .and_then(Value::as_u64)
}

fn names_of<'a>(raw: &'a Value, key: &str) -> Vec<&'a str> {
    raw.get(key)
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(|x| x["name"].as_str()).collect())
        .unwrap_or_default()
}

fn first_image(raw: &Value) -> Option<&str> {
    raw.get("images")
        .and_then(Value::as_array)
        .and_then(|a| a.first())
        .and_then(|img| img["url"].as_str())
}

macro_rules! json_model {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Value);

        impl Model for $name {
            fn from_raw(raw: Value) -> Self {
                Self(raw)
            }
            fn raw(&self) -> &Value {
                &self.0
            }
            fn into_raw(self) -> Value {
                self.0
            }
        }
    };
}

json_model!(
    /// A playlist object (simplified or full).
    Playlist
);
json_model!(Track);
json_model!(Album);
json_model!(Artist);
json_model!(
    /// A public or private user profile.
    User
);

impl Playlist {
    /// Id of the owning user; required to address the tracks endpoint.
    pub fn owner_id(&self) -> Option<&str> {
        str_at(&self.0, &["owner", "id"])
    }

    pub fn owner_display_name(&self) -> Option<&str> {
        str_at(&self.0, &["owner", "display_name"])
    }

    pub fn description(&self) -> Option<&str> {
        str_at(&self.0, &["description"])
    }

    pub fn is_public(&self) -> Option<bool> {
        self.0.get("public").and_then(Value::as_bool)
    }

    pub fn is_collaborative(&self) -> bool {
        self.0
            .get("collaborative")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn snapshot_id(&self) -> Option<&str> {
        str_at(&self.0, &["snapshot_id"])
    }

    pub fn tracks_total(&self) -> Option<u64> {
        u64_at(&self.0, &["tracks", "total"])
    }

    pub fn image_url(&self) -> Option<&str> {
        first_image(&self.0)
    }
}

impl Track {
    pub fn duration_ms(&self) -> Option<u64> {
        u64_at(&self.0, &["duration_ms"])
    }

    pub fn is_explicit(&self) -> bool {
        self.0.get("explicit").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn popularity(&self) -> Option<u64> {
        u64_at(&self.0, &["popularity"])
    }

    pub fn track_number(&self) -> Option<u64> {
        u64_at(&self.0, &["track_number"])
    }

    pub fn preview_url(&self) -> Option<&str> {
        str_at(&self.0, &["preview_url"])
    }

    pub fn artist_names(&self) -> Vec<&str> {
        names_of(&self.0, "artists")
    }

    /// Name of the album the track appears on (absent on album track listings).
    pub fn album_name(&self) -> Option<&str> {
        str_at(&self.0, &["album", "name"])
    }

    pub fn isrc(&self) -> Option<&str> {
        str_at(&self.0, &["external_ids", "isrc"])
    }
}

impl Album {
    /// `album`, `single` or `compilation`.
    pub fn album_type(&self) -> Option<&str> {
        str_at(&self.0, &["album_type"])
    }

    pub fn release_date(&self) -> Option<&str> {
        str_at(&self.0, &["release_date"])
    }

    pub fn total_tracks(&self) -> Option<u64> {
        u64_at(&self.0, &["total_tracks"])
    }

    pub fn artist_names(&self) -> Vec<&str> {
        names_of(&self.0, "artists")
    }

    pub fn image_url(&self) -> Option<&str> {
        first_image(&self.0)
    }
}

impl Artist {
    pub fn genres(&self) -> Vec<&str> {
        self.0
            .get("genres")
            .and_then(Value::as_array)
            .map(|a| a.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn popularity(&self) -> Option<u64> {
        u64_at(&self.0, &["popularity"])
    }

    pub fn followers(&self) -> Option<u64> {
        u64_at(&self.0, &["followers", "total"])
    }

    pub fn image_url(&self) -> Option<&str> {
        first_image(&self.0)
    }
}

impl User {
    pub fn display_name(&self) -> Option<&str> {
        str_at(&self.0, &["display_name"])
    }

    pub fn country(&self) -> Option<&str> {
        str_at(&self.0, &["country"])
    }

    /// Subscription level (`premium`, `free`); only on the current user's profile.
    pub fn product(&self) -> Option<&str> {
        str_at(&self.0, &["product"])
    }

    pub fn email(&self) -> Option<&str> {
        str_at(&self.0, &["email"])
    }
}

/// Ordered page of models with the paging metadata the API returned.
/// Order is the server's and is never changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
    offset: u64,
    limit: u64,
    total: u64,
    next: Option<String>,
    previous: Option<String>,
}

impl<T: Model> Collection<T> {
    /// Build from a response body. The paging object is either the body itself
    /// (it has an `items` array) or sits under `key`, as in search and browse
    /// responses (`{"playlists": {...}}`). A bare array under `key` becomes a
    /// single page.
    pub fn from_json(mut body: Value, key: &str) -> Result<Self> {
        let page = if body.get("items").map_or(false, Value::is_array) {
            body
        } else {
            match body.get_mut(key).map(Value::take) {
                Some(Value::Array(items)) => {
                    return Ok(Self::from_items(items.into_iter().map(T::from_raw).collect()))
                }
                Some(page) if page.get("items").map_or(false, Value::is_array) => page,
                _ => return Err(ApiError::MissingField("items")),
            }
        };
        Ok(Self::from_page(page))
    }

    fn from_page(mut page: Value) -> Self {
        let items: Vec<T> = match page.get_mut("items").map(Value::take) {
            Some(Value::Array(items)) => items.into_iter().map(T::from_raw).collect(),
            _ => Vec::new(),
        };
        let len = items.len() as u64;
        Self {
            offset: u64_at(&page, &["offset"]).unwrap_or(0),
            limit: u64_at(&page, &["limit"]).unwrap_or(len),
            total: u64_at(&page, &["total"]).unwrap_or(len),
            next: str_at(&page, &["next"]).map(str::to_string),
            previous: str_at(&page, &["previous"]).map(str::to_string),
            items,
        }
    }
}

impl<T> Collection<T> {
    /// A single, complete page holding `items`.
    pub fn from_items(items: Vec<T>) -> Self {
        let len = items.len() as u64;
        Self {
            items,
            offset: 0,
            limit: len,
            total: len,
            next: None,
            previous: None,
        }
    }

    /// First item, or `ApiError::EmptyCollection`.
    pub fn first(&self) -> Result<&T> {
        self.items.first().ok_or(ApiError::EmptyCollection)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Total number of items available server-side, across all pages.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
