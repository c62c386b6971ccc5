use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::cors::CorsLayer;

use crate::{
    Res, api,
    config::Settings,
    management::{PlaybackFetcher, TokenManager},
};

/// Everything the handlers share. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenManager>,
    pub playback: Arc<PlaybackFetcher>,
    /// `state` value sent with the latest `/login` redirect.
    pub pending_state: Arc<Mutex<Option<String>>>,
}

impl AppState {
    pub fn new(tokens: Arc<TokenManager>, playback: Arc<PlaybackFetcher>) -> Self {
        Self {
            tokens,
            playback,
            pending_state: Arc::new(Mutex::new(None)),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let tokens = Arc::new(TokenManager::new(
            settings.credentials.clone(),
            settings.endpoints.clone(),
        ));
        let playback = Arc::new(PlaybackFetcher::new(
            Arc::clone(&tokens),
            settings.endpoints.api_url.clone(),
        ));
        Self::new(tokens, playback)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/current-track", get(api::current_track))
        .route("/current-track.txt", get(api::current_track_text))
        .route("/widget", get(api::widget))
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
}

/// Binds `addr` (`host:port`, hostnames allowed) and serves until the
/// listener fails.
pub async fn start_api_server(addr: &str, state: AppState) -> Res<()> {
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
