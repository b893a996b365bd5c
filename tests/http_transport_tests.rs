use mockito::{Matcher, Server};
use serde_json::json;

use spotify_web_handlers::api::http::HttpTransport;
use spotify_web_handlers::api::{ApiRequest, Transport};
use spotify_web_handlers::ApiError;

#[tokio::test]
async fn attaches_bearer_token_and_returns_json_untouched() {
    let mut server = Server::new_async().await;
    let body = json!({ "id": "mock_user", "images": [], "followers": { "total": 3 } });
    let m = server
        .mock("GET", "/me")
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let transport = HttpTransport::new(&server.url()).unwrap().with_token("tok");
    let value = transport
        .execute(ApiRequest::get("/me").authenticated())
        .await
        .unwrap();
    assert_eq!(value, body);
    m.assert_async().await;
}

#[tokio::test]
async fn anonymous_request_sends_no_authorization_header() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/tracks/abc")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"id":"abc"}"#)
        .create_async()
        .await;

    let transport = HttpTransport::new(&server.url()).unwrap();
    transport.execute(ApiRequest::get("/tracks/abc")).await.unwrap();
    m.assert_async().await;
}

#[tokio::test]
async fn missing_token_fails_before_network() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/browse/featured-playlists")
        .expect(0)
        .create_async()
        .await;

    let transport = HttpTransport::new(&server.url()).unwrap();
    let err = transport
        .execute(ApiRequest::get("/browse/featured-playlists").authenticated())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::MissingToken { ref path } if path == "/browse/featured-playlists"));
    assert!(err.is_auth_error());
    m.assert_async().await;
}

#[tokio::test]
async fn non_success_carries_status_and_body() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/playlists/missing")
        .with_status(404)
        .with_body(r#"{"error":{"status":404,"message":"Not found."}}"#)
        .create_async()
        .await;

    let transport = HttpTransport::new(&server.url()).unwrap();
    let err = transport
        .execute(ApiRequest::get("/playlists/missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 404, .. }));
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.body(), Some(r#"{"error":{"status":404,"message":"Not found."}}"#));
}

#[tokio::test]
async fn unauthorized_and_forbidden_are_distinguished() {
    let mut server = Server::new_async().await;
    let _m401 = server
        .mock("GET", "/me")
        .with_status(401)
        .with_body("The access token expired")
        .create_async()
        .await;
    let _m403 = server
        .mock("POST", "/users/alice/playlists/pl1/tracks")
        .with_status(403)
        .with_body("Insufficient client scope")
        .create_async()
        .await;

    let transport = HttpTransport::new(&server.url()).unwrap().with_token("stale");
    let err = transport.execute(ApiRequest::get("/me")).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { ref body } if body == "The access token expired"));

    let err = transport
        .execute(
            ApiRequest::post("/users/alice/playlists/pl1/tracks")
                .json(json!({ "uris": ["spotify:track:1"] }))
                .authenticated(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Forbidden { .. }));
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/me")
        .with_status(502)
        .with_body("bad gateway")
        .expect(1)
        .create_async()
        .await;

    let transport = HttpTransport::new(&server.url()).unwrap().with_token("tok");
    let err = transport.execute(ApiRequest::get("/me")).await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    m.assert_async().await;
}

#[tokio::test]
async fn query_and_json_body_are_sent() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("DELETE", "/users/alice/playlists/pl1/tracks")
        .match_query(Matcher::UrlEncoded("position".into(), "2".into()))
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({ "uris": ["a", "b"] })))
        .with_status(200)
        .with_body(r#"{"snapshot_id":"s2"}"#)
        .create_async()
        .await;

    let transport = HttpTransport::new(&server.url()).unwrap().with_token("tok");
    let value = transport
        .execute(
            ApiRequest::delete("/users/alice/playlists/pl1/tracks")
                .query("position", "2")
                .json(json!({ "uris": ["a", "b"] })),
        )
        .await
        .unwrap();
    assert_eq!(value["snapshot_id"], "s2");
    m.assert_async().await;
}

#[tokio::test]
async fn empty_success_body_is_null() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("PUT", "/playlists/pl1")
        .with_status(200)
        .create_async()
        .await;

    let transport = HttpTransport::new(&server.url()).unwrap().with_token("tok");
    let value = transport
        .execute(ApiRequest::put("/playlists/pl1").json(json!({ "name": "x" })))
        .await
        .unwrap();
    assert!(value.is_null());
}

#[tokio::test]
async fn invalid_json_on_success_is_a_decode_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/me")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let transport = HttpTransport::new(&server.url()).unwrap().with_token("tok");
    let err = transport.execute(ApiRequest::get("/me")).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn rotated_token_applies_to_later_requests() {
    let mut server = Server::new_async().await;
    let m_old = server
        .mock("GET", "/me")
        .match_header("authorization", "Bearer old")
        .with_status(200)
        .with_body(r#"{"id":"u"}"#)
        .expect(1)
        .create_async()
        .await;
    let m_new = server
        .mock("GET", "/me")
        .match_header("authorization", "Bearer new")
        .with_status(200)
        .with_body(r#"{"id":"u"}"#)
        .expect(1)
        .create_async()
        .await;

    let transport = HttpTransport::new(&server.url()).unwrap().with_token("old");
    transport.execute(ApiRequest::get("/me")).await.unwrap();
    transport.set_token(Some("new".into())).await;
    transport.execute(ApiRequest::get("/me")).await.unwrap();

    m_old.assert_async().await;
    m_new.assert_async().await;
}

#[tokio::test]
async fn connection_failure_is_a_network_error() {
    // Nothing listens on port 9 of the loopback interface.
    let transport = HttpTransport::new("http://127.0.0.1:9").unwrap();
    let err = transport.execute(ApiRequest::get("/me")).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.status(), None);
}
