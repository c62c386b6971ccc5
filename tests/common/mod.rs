#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};
use spotwidget::{
    config::{Credentials, Endpoints},
    management::{PlaybackFetcher, TokenManager},
    server::AppState,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path},
};

pub const BASIC_AUTH: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";

pub fn credentials() -> Credentials {
    Credentials {
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
        redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
        scopes: vec![
            "user-read-currently-playing".to_string(),
            "user-read-playback-state".to_string(),
        ],
    }
}

pub fn endpoints(server: &MockServer) -> Endpoints {
    Endpoints {
        auth_url: format!("{}/authorize", server.uri()),
        token_url: format!("{}/api/token", server.uri()),
        api_url: format!("{}/v1", server.uri()),
    }
}

pub fn token_manager(server: &MockServer) -> Arc<TokenManager> {
    Arc::new(TokenManager::new(credentials(), endpoints(server)))
}

pub fn app_state(server: &MockServer) -> AppState {
    let tokens = token_manager(server);
    let playback = Arc::new(PlaybackFetcher::new(
        Arc::clone(&tokens),
        endpoints(server).api_url,
    ));
    AppState::new(tokens, playback)
}

pub fn token_json(access: &str, refresh: Option<&str>, expires_in: i64) -> Value {
    let mut body = json!({
        "access_token": access,
        "token_type": "Bearer",
        "scope": "user-read-currently-playing user-read-playback-state",
        "expires_in": expires_in,
    });
    if let Some(refresh) = refresh {
        body["refresh_token"] = json!(refresh);
    }
    body
}

pub fn playback_json(
    title: &str,
    artists: &[&str],
    progress_ms: u64,
    duration_ms: u64,
    is_playing: bool,
) -> Value {
    json!({
        "is_playing": is_playing,
        "progress_ms": progress_ms,
        "item": {
            "name": title,
            "duration_ms": duration_ms,
            "artists": artists.iter().map(|name| json!({ "name": name })).collect::<Vec<_>>(),
            "album": {
                "name": "Album Z",
                "images": [
                    { "url": "https://i.scdn.co/image/large", "height": 640, "width": 640 },
                    { "url": "https://i.scdn.co/image/small", "height": 64, "width": 64 }
                ]
            }
        }
    })
}

/// Token endpoint answering the authorization-code grant.
pub async fn mount_code_exchange(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", BASIC_AUTH))
        .and(body_string_contains("grant_type=authorization_code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Logs in with a token whose lifetime is shorter than the safety margin,
/// so the next `ensure_valid_access_token` has to refresh.
pub async fn login_stale(server: &MockServer, tokens: &TokenManager) {
    mount_code_exchange(server, token_json("stale-access", Some("refresh-1"), 30)).await;
    tokens
        .complete_authorization("auth-code")
        .await
        .expect("code exchange");
}

pub async fn login_fresh(server: &MockServer, tokens: &TokenManager) {
    mount_code_exchange(server, token_json("fresh-access", Some("refresh-1"), 3600)).await;
    tokens
        .complete_authorization("auth-code")
        .await
        .expect("code exchange");
}

/// URL of a local port nothing listens on.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Endpoints that all fail at the transport level.
pub fn unreachable_endpoints() -> Endpoints {
    let base = closed_port_url();
    Endpoints {
        auth_url: format!("{base}/authorize"),
        token_url: format!("{base}/api/token"),
        api_url: format!("{base}/v1"),
    }
}
