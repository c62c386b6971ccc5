use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Body of a successful response from the token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    pub expires_in: i64,
    /// Not every grant rotates the refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackState {
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub item: Option<PlaybackItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackItem {
    pub name: String,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub artists: Vec<PlaybackArtist>,
    #[serde(default)]
    pub album: Option<PlaybackAlbum>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackAlbum {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

/// A playback session that has a track attached.
#[derive(Debug, Clone)]
pub struct ActiveTrack {
    pub is_playing: bool,
    pub progress_ms: Option<u64>,
    pub item: PlaybackItem,
}

/// Outcome of asking upstream what is currently playing.
#[derive(Debug, Clone)]
pub enum PlaybackResponse {
    /// No active device, or a session without a track (private session, ads).
    NoSession,
    ErrorResponse { status: StatusCode, message: String },
    ActiveSession(ActiveTrack),
}

/// Point-in-time view served to the widget as `/current-track`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub active: bool,
    #[serde(flatten)]
    pub track: Option<TrackSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSnapshot {
    pub playing: bool,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub cover: Option<String>,
    pub progress_ms: u64,
    pub duration_ms: u64,
}

impl PlaybackSnapshot {
    pub fn inactive() -> Self {
        Self {
            active: false,
            track: None,
        }
    }

    pub fn active(track: TrackSnapshot) -> Self {
        Self {
            active: true,
            track: Some(track),
        }
    }
}

impl From<ActiveTrack> for TrackSnapshot {
    fn from(active: ActiveTrack) -> Self {
        let ActiveTrack {
            is_playing,
            progress_ms,
            item,
        } = active;

        let artist = item
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        // upstream orders images largest first
        let (album, cover) = match item.album {
            Some(album) => (
                album.name,
                album.images.into_iter().next().map(|image| image.url),
            ),
            None => (String::new(), None),
        };

        TrackSnapshot {
            playing: is_playing,
            title: item.name,
            artist,
            album,
            cover,
            progress_ms: progress_ms.unwrap_or(0),
            duration_ms: item.duration_ms.unwrap_or(0),
        }
    }
}
