use axum::{Extension, response::Json};

use crate::{server::AppState, types::PlaybackSnapshot, utils};

pub async fn current_track(Extension(state): Extension<AppState>) -> Json<PlaybackSnapshot> {
    Json(state.playback.fetch_current_playback().await)
}

/// One-line rendering for text sources in broadcast software.
pub async fn current_track_text(Extension(state): Extension<AppState>) -> String {
    let snapshot = state.playback.fetch_current_playback().await;
    let Some(track) = snapshot.track else {
        return String::new();
    };

    let ratio = utils::progress_ratio(track.progress_ms, track.duration_ms);
    let line = format!(
        "{} - {} ({} / {}, {:.0}%)",
        track.title,
        track.artist,
        utils::format_duration(track.progress_ms.min(track.duration_ms)),
        utils::format_duration(track.duration_ms),
        ratio * 100.0,
    );

    if track.playing {
        line
    } else {
        format!("[paused] {line}")
    }
}
