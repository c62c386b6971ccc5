mod common;

use std::sync::Arc;

use common::*;
use serde_json::json;
use spotwidget::{
    management::PlaybackFetcher,
    types::{PlaybackSnapshot, TrackSnapshot},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path},
};

async fn fetcher(server: &MockServer) -> PlaybackFetcher {
    let tokens = token_manager(server);
    login_fresh(server, &tokens).await;
    PlaybackFetcher::new(Arc::clone(&tokens), endpoints(server).api_url)
}

async fn mount_player(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/v1/me/player"))
        .and(header("authorization", "Bearer fresh-access"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_active_track_is_normalized() {
    let server = MockServer::start().await;
    let fetcher = fetcher(&server).await;
    mount_player(
        &server,
        ResponseTemplate::new(200).set_body_json(playback_json(
            "Song A",
            &["Artist X", "Artist Y"],
            30000,
            200000,
            true,
        )),
    )
    .await;

    let snapshot = fetcher.fetch_current_playback().await;
    assert_eq!(
        snapshot,
        PlaybackSnapshot::active(TrackSnapshot {
            playing: true,
            title: "Song A".to_string(),
            artist: "Artist X, Artist Y".to_string(),
            album: "Album Z".to_string(),
            cover: Some("https://i.scdn.co/image/large".to_string()),
            progress_ms: 30000,
            duration_ms: 200000,
        })
    );
}

#[tokio::test]
async fn test_no_content_is_inactive() {
    let server = MockServer::start().await;
    let fetcher = fetcher(&server).await;
    mount_player(&server, ResponseTemplate::new(204)).await;

    assert_eq!(
        fetcher.fetch_current_playback().await,
        PlaybackSnapshot::inactive()
    );
}

#[tokio::test]
async fn test_missing_item_is_inactive() {
    let server = MockServer::start().await;
    let fetcher = fetcher(&server).await;
    mount_player(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "is_playing": true,
            "progress_ms": 1000,
            "item": null
        })),
    )
    .await;

    assert!(!fetcher.fetch_current_playback().await.active);
}

#[tokio::test]
async fn test_upstream_error_is_inactive() {
    let server = MockServer::start().await;
    let fetcher = fetcher(&server).await;
    mount_player(
        &server,
        ResponseTemplate::new(502).set_body_string("Bad gateway"),
    )
    .await;

    assert_eq!(
        fetcher.fetch_current_playback().await,
        PlaybackSnapshot::inactive()
    );
}

#[tokio::test]
async fn test_partial_track_defaults() {
    let server = MockServer::start().await;
    let fetcher = fetcher(&server).await;
    mount_player(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "is_playing": false,
            "item": {
                "name": "Untitled",
                "artists": [],
                "album": { "name": "Demo", "images": [] }
            }
        })),
    )
    .await;

    let snapshot = fetcher.fetch_current_playback().await;
    let track = snapshot.track.expect("active track");
    assert!(snapshot.active);
    assert!(!track.playing);
    assert_eq!(track.artist, "");
    assert_eq!(track.cover, None);
    assert_eq!(track.progress_ms, 0);
    assert_eq!(track.duration_ms, 0);
}

#[tokio::test]
async fn test_unauthenticated_is_inactive_without_upstream_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me/player"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let fetcher = PlaybackFetcher::new(token_manager(&server), endpoints(&server).api_url);
    assert_eq!(
        fetcher.fetch_current_playback().await,
        PlaybackSnapshot::inactive()
    );

    server.verify().await;
}

#[test]
fn test_snapshot_serialization_shape() {
    let inactive = serde_json::to_value(PlaybackSnapshot::inactive()).unwrap();
    assert_eq!(inactive, json!({ "active": false }));

    let active = serde_json::to_value(PlaybackSnapshot::active(TrackSnapshot {
        playing: false,
        title: "T".to_string(),
        artist: "A".to_string(),
        album: "B".to_string(),
        cover: None,
        progress_ms: 1,
        duration_ms: 2,
    }))
    .unwrap();
    assert_eq!(
        active,
        json!({
            "active": true,
            "playing": false,
            "title": "T",
            "artist": "A",
            "album": "B",
            "cover": null,
            "progress_ms": 1,
            "duration_ms": 2
        })
    );
}

#[tokio::test]
async fn test_rejected_token_is_refreshed_on_next_poll() {
    let server = MockServer::start().await;
    let fetcher = fetcher(&server).await;
    mount_player(
        &server,
        ResponseTemplate::new(401).set_body_json(json!({
            "error": { "status": 401, "message": "The access token expired" }
        })),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(token_json("refreshed", None, 3600)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/me/player"))
        .and(header("authorization", "Bearer refreshed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(playback_json(
            "Song A",
            &["Artist X"],
            1000,
            2000,
            true,
        )))
        .mount(&server)
        .await;

    assert_eq!(
        fetcher.fetch_current_playback().await,
        PlaybackSnapshot::inactive()
    );

    let snapshot = fetcher.fetch_current_playback().await;
    assert!(snapshot.active);
    assert_eq!(snapshot.track.unwrap().title, "Song A");

    // the new token is served from the store
    assert!(fetcher.fetch_current_playback().await.active);

    server.verify().await;
}

#[tokio::test]
async fn test_other_errors_do_not_force_refresh() {
    let server = MockServer::start().await;
    let fetcher = fetcher(&server).await;
    mount_player(&server, ResponseTemplate::new(503)).await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    fetcher.fetch_current_playback().await;
    fetcher.fetch_current_playback().await;

    server.verify().await;
}

#[tokio::test]
async fn test_empty_success_body_is_inactive() {
    let server = MockServer::start().await;
    let fetcher = fetcher(&server).await;
    mount_player(&server, ResponseTemplate::new(200)).await;

    assert_eq!(
        fetcher.fetch_current_playback().await,
        PlaybackSnapshot::inactive()
    );
}

#[tokio::test]
async fn test_undecodable_body_is_inactive() {
    let server = MockServer::start().await;
    let fetcher = fetcher(&server).await;
    mount_player(
        &server,
        ResponseTemplate::new(200).set_body_string("{not json"),
    )
    .await;

    assert_eq!(
        fetcher.fetch_current_playback().await,
        PlaybackSnapshot::inactive()
    );
}

#[tokio::test]
async fn test_transport_failure_is_inactive() {
    let server = MockServer::start().await;
    let tokens = token_manager(&server);
    login_fresh(&server, &tokens).await;

    let fetcher = PlaybackFetcher::new(tokens, unreachable_endpoints().api_url);
    assert_eq!(
        fetcher.fetch_current_playback().await,
        PlaybackSnapshot::inactive()
    );
}
