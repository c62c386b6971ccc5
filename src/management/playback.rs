use std::sync::Arc;

use reqwest::{Client, StatusCode};

use crate::{
    management::{TokenError, TokenManager},
    spotify,
    types::{PlaybackResponse, PlaybackSnapshot, TrackSnapshot},
    warning,
};

/// Produces the normalized snapshot served to the widget.
pub struct PlaybackFetcher {
    tokens: Arc<TokenManager>,
    client: Client,
    api_url: String,
}

impl PlaybackFetcher {
    pub fn new(tokens: Arc<TokenManager>, api_url: String) -> Self {
        Self::with_client(tokens, api_url, Client::new())
    }

    pub fn with_client(tokens: Arc<TokenManager>, api_url: String, client: Client) -> Self {
        Self {
            tokens,
            client,
            api_url,
        }
    }

    /// Never fails: every failure degrades to an inactive snapshot and is
    /// logged for the operator instead.
    pub async fn fetch_current_playback(&self) -> PlaybackSnapshot {
        let token = match self.tokens.ensure_valid_access_token().await {
            Ok(token) => token,
            Err(TokenError::Unauthenticated) => return PlaybackSnapshot::inactive(),
            Err(e) => {
                warning!("{}", e);
                return PlaybackSnapshot::inactive();
            }
        };

        match spotify::player::get_current_playback(&self.client, &self.api_url, &token).await {
            Ok(PlaybackResponse::ActiveSession(track)) => {
                PlaybackSnapshot::active(TrackSnapshot::from(track))
            }
            Ok(PlaybackResponse::NoSession) => PlaybackSnapshot::inactive(),
            Ok(PlaybackResponse::ErrorResponse { status, message }) => {
                warning!("Playback request returned {}: {}", status, message);
                if status == StatusCode::UNAUTHORIZED {
                    self.tokens.invalidate_access_token(&token).await;
                }
                PlaybackSnapshot::inactive()
            }
            Err(e) => {
                warning!("Playback request failed: {}", e);
                PlaybackSnapshot::inactive()
            }
        }
    }
}
