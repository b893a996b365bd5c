use serde_json::json;

use spotify_web_handlers::models::{Collection, Model, Playlist, Track};
use spotify_web_handlers::ApiError;

#[test]
fn paging_object_under_key() {
    let body = json!({
        "playlists": {
            "href": "https://api.spotify.com/v1/search?query=x&type=playlist&offset=20&limit=20",
            "items": [{ "id": "a" }, { "id": "b" }, { "id": "c" }],
            "limit": 3, "offset": 20, "total": 57,
            "next": "https://api.spotify.com/v1/search?offset=23",
            "previous": "https://api.spotify.com/v1/search?offset=17"
        }
    });
    let page: Collection<Playlist> = Collection::from_json(body, "playlists").unwrap();
    let ids: Vec<_> = page.iter().map(|p| p.id().unwrap()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(page.offset(), 20);
    assert_eq!(page.limit(), 3);
    assert_eq!(page.total(), 57);
    assert_eq!(page.next(), Some("https://api.spotify.com/v1/search?offset=23"));
    assert_eq!(page.previous(), Some("https://api.spotify.com/v1/search?offset=17"));
}

#[test]
fn top_level_items_take_precedence() {
    let body = json!({ "items": [{ "name": "R U Mine?" }] });
    let page: Collection<Track> = Collection::from_json(body, "tracks").unwrap();
    assert_eq!(page.first().unwrap().name(), Some("R U Mine?"));
    assert_eq!(page.total(), 1);
    assert_eq!(page.offset(), 0);
    assert!(!page.has_next());
}

#[test]
fn first_on_empty_collection_fails() {
    let page: Collection<Playlist> =
        Collection::from_json(json!({ "playlists": { "items": [], "total": 0 } }), "playlists").unwrap();
    assert!(page.is_empty());
    assert!(matches!(page.first(), Err(ApiError::EmptyCollection)));
}

#[test]
fn missing_paging_object_is_an_error() {
    let res: Result<Collection<Playlist>, _> = Collection::from_json(json!({ "error": "nope" }), "playlists");
    assert!(matches!(res, Err(ApiError::MissingField("items"))));
}

#[test]
fn items_are_wrapped_untouched_and_in_order() {
    let items = vec![
        json!({ "id": "3", "nested": { "k": [1, 2] } }),
        json!({ "id": "1" }),
        json!({ "id": "2", "name": null }),
    ];
    let body = json!({ "items": items.clone() });
    let page: Collection<Track> = Collection::from_json(body, "tracks").unwrap();
    let raws: Vec<_> = page.into_iter().map(Model::into_raw).collect();
    assert_eq!(raws, items);
}

#[test]
fn models_serialize_back_to_the_same_json() {
    let raw = json!({ "id": "p", "owner": { "id": "o" }, "tracks": { "total": 7 } });
    let pl = Playlist::from_raw(raw.clone());
    assert_eq!(serde_json::to_value(&pl).unwrap(), raw);
    let back: Playlist = serde_json::from_value(raw).unwrap();
    assert_eq!(back, pl);
    assert_eq!(back.tracks_total(), Some(7));
}
