use reqwest::{Client, StatusCode};

use crate::{
    spotify::auth::truncate,
    types::{ActiveTrack, PlaybackResponse, PlaybackState},
};

/// Retrieves the playback state of the authenticated user.
///
/// Calls `GET {api_url}/me/player` and classifies the answer so callers never
/// have to probe optional fields:
///
/// - `204 No Content`, an empty body or a body without `item` becomes
///   [`PlaybackResponse::NoSession`]
/// - any other non-success status becomes [`PlaybackResponse::ErrorResponse`]
/// - a success with a track becomes [`PlaybackResponse::ActiveSession`]
///
/// # Errors
///
/// Only transport failures and undecodable bodies are returned as `Err`.
/// No retry is performed; the widget polls again two seconds later.
pub async fn get_current_playback(
    client: &Client,
    api_url: &str,
    token: &str,
) -> Result<PlaybackResponse, reqwest::Error> {
    let url = format!("{uri}/me/player", uri = api_url.trim_end_matches('/'));
    let response = client.get(&url).bearer_auth(token).send().await?;

    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        return Ok(PlaybackResponse::NoSession);
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Ok(PlaybackResponse::ErrorResponse {
            status,
            message: truncate(&body).to_string(),
        });
    }

    let body = response.bytes().await?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(PlaybackResponse::NoSession);
    }

    let state: PlaybackState = match serde_json::from_slice(&body) {
        Ok(state) => state,
        Err(e) => {
            return Ok(PlaybackResponse::ErrorResponse {
                status,
                message: format!("undecodable playback body: {e}"),
            });
        }
    };

    Ok(match state.item {
        Some(item) => PlaybackResponse::ActiveSession(ActiveTrack {
            is_playing: state.is_playing,
            progress_ms: state.progress_ms,
            item,
        }),
        None => PlaybackResponse::NoSession,
    })
}
